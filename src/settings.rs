//! Game settings and preferences
//!
//! Persisted separately from scores as JSON in the user data directory.

use std::fs;

use serde::{Deserialize, Serialize};

use crate::highscores::data_file;
use crate::renderer::RenderOptions;

const SETTINGS_FILE: &str = "settings.json";

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Draw platform id labels (dev aid)
    pub show_platform_ids: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_platform_ids: false,
        }
    }
}

impl Settings {
    /// Load persisted settings, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = data_file(SETTINGS_FILE) else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings");
                    settings
                }
                Err(err) => {
                    log::warn!("settings file corrupt ({err}), using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the current settings
    pub fn save(&self) {
        let Some(path) = data_file(SETTINGS_FILE) else {
            return;
        };
        let result = path
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| {
                let json = serde_json::to_string_pretty(self).unwrap_or_default();
                fs::write(&path, json)
            });
        if let Err(err) = result {
            log::warn!("failed to save settings: {err}");
        }
    }

    /// Renderer toggles derived from these preferences
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_platform_ids: self.show_platform_ids,
        }
    }
}
