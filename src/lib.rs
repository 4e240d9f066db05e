//! Flip Runner - a gravity-flip endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, damage machine, generation)
//! - `renderer`: Pure draw-list composition from game state
//! - `session`: Shell driver (commands, countdown, deferred events)
//! - `highscores` / `settings`: JSON persistence
//! - `assets` / `audio`: asset load registry and sound-effect sink

pub mod assets;
pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::ScoreHistory;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Canvas dimensions
    pub const CANVAS_W: f32 = 390.0;
    pub const CANVAS_H: f32 = 640.0;
    pub const TOP_BOUND: f32 = 0.0;
    pub const BOTTOM_BOUND: f32 = CANVAS_H;

    /// Runner sprite bounding box (square)
    pub const RUNNER_SIZE: f32 = 44.0;
    /// Spacing reference height used by the generator (not the sprite box)
    pub const RUNNER_HEIGHT: f32 = 33.0;
    /// Minimum vertical gap between consecutive platforms on opposite
    /// gravity tracks. Never violated by any generation rule.
    pub const MIN_VERTICAL_GAP: f32 = RUNNER_HEIGHT * 2.0;

    /// Platform geometry
    pub const PLATFORM_HEIGHT: f32 = 6.0;
    pub const PLATFORM_MIN_WIDTH: f32 = 60.0;
    pub const PLATFORM_MAX_WIDTH: f32 = 300.0;
    /// Top/bottom margin of the platform placement bands
    pub const TRACK_MARGIN: f32 = 64.0;

    /// Constant-velocity pull gravity (5.2 px/frame at 60 Hz)
    pub const PULL_SPEED: f32 = 312.0;

    /// World auto-scroll (1.8 px/frame at 60 Hz), scaled per level
    pub const BASE_SCROLL_SPEED: f32 = 108.0;
    pub const LEVEL_SPEED_FACTOR: f32 = 1.2;
    pub const PLATFORMS_PER_LEVEL: u32 = 20;

    /// Dead-state fall animation
    pub const DEAD_FALL_ACCEL: f32 = 400.0;
    pub const DEAD_FALL_MAX_SPEED: f32 = 600.0;

    /// Timers, in simulation ticks
    pub const GAME_OVER_DELAY_TICKS: u64 = 120; // 2000 ms
    pub const INVULNERABILITY_TICKS: u64 = 60; // 1000 ms
    pub const COUNTDOWN_TICKS: u32 = 30; // 500 ms "READY"
    pub const HEAL_FLASH_TICKS: u64 = 30; // 500 ms heal flash

    pub const MAX_LIVES: u8 = 3;
    /// Fatal cumulative drop damage
    pub const MAX_DROP_HITS: u8 = 3;

    /// Hazard sprite boxes
    pub const FIRE_W: f32 = 27.0;
    pub const FIRE_H: f32 = 32.0;
    pub const DROP_W: f32 = 18.0;
    pub const DROP_H: f32 = 24.0;
    /// Fraction of the runner box that must overlap a fire to count
    pub const FIRE_OVERLAP_FRACTION: f32 = 0.3;

    /// Generation window
    pub const GEN_LOOKAHEAD: f32 = 800.0;
    pub const GEN_BATCH: usize = 12;
    /// Platforms fully behind the camera by this margin are pruned
    pub const CULL_BEHIND: f32 = 400.0;

    /// Game ends once this fraction of the runner box leaves the world
    /// bounds (skipped entirely while dead)
    pub const WORLD_EXIT_FRACTION: f32 = 0.6;
}
