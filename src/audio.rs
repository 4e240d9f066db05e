//! Sound-effect sink
//!
//! The simulation emits game events; the session maps them to sound
//! effects and feeds them here. The sink applies volume/mute policy and
//! queues playbacks for whatever audio backend the shell wires up. No
//! synthesis happens in the core.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Gravity flip whoosh
    Flip,
    /// Drop hit
    DropHit,
    /// Flame heal chime
    FlameHeal,
    /// Game over jingle
    GameOver,
}

/// A queued playback request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub effect: SoundEffect,
    /// Effective volume, 0.0 - 1.0
    pub volume: f32,
}

/// Volume-aware sound queue
#[derive(Debug, Clone)]
pub struct AudioSink {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    queue: Vec<Playback>,
}

impl Default for AudioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            queue: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Queue a sound effect at the current effective volume
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        log::debug!("sound {effect:?} at volume {volume:.2}");
        self.queue.push(Playback { effect, volume });
    }

    /// Hand queued playbacks to the backend
    pub fn drain(&mut self) -> Vec<Playback> {
        std::mem::take(&mut self.queue)
    }
}
