//! Game state and core simulation types
//!
//! One `GameState` is the single shared mutable context for a play session.
//! It is created on start/restart, threaded through the frame tick, and
//! discarded on the next restart. No ambient globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::generate;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay (the damage machine may still mark the runner dead)
    Playing,
    /// Frozen by the shell
    Paused,
    /// Run ended; state is frozen until the next restart
    GameOver,
}

/// Which vertical band a platform is anchored to. Platforms near the top
/// bound serve the upward-pull track, platforms near the bottom bound the
/// downward-pull track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Top,
    Bottom,
}

impl Track {
    pub fn opposite(self) -> Self {
        match self {
            Track::Top => Track::Bottom,
            Track::Bottom => Track::Top,
        }
    }
}

/// Declared fall direction of a drop relative to its platform.
///
/// Cosmetic data only: nothing branches on it, and drops render unmirrored
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDir {
    Up,
    Down,
}

/// A single platform in the endless sequence
#[derive(Debug, Clone)]
pub struct Platform {
    /// Monotonic id in generation order; the opening platform is id 1
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub track: Track,
    /// Flame hazard on top of the platform (heals one damage level)
    pub has_fire: bool,
    /// Drop hazard hanging under the platform (damages one level)
    pub has_drop: bool,
    pub drop_dir: DropDir,
    /// Set once the runner has cleared the platform (scored)
    pub passed: bool,
}

impl Platform {
    /// Collision box of the flame, if present
    pub fn fire_box(&self) -> Option<(f32, f32, f32, f32)> {
        self.has_fire.then(|| {
            let x = self.x + (self.width - FIRE_W) / 2.0;
            let y = self.y - FIRE_H - 1.0;
            (x, y, FIRE_W, FIRE_H)
        })
    }

    /// Collision box of the drop, if present. Placement is fixed under the
    /// platform regardless of `drop_dir`.
    pub fn drop_box(&self) -> Option<(f32, f32, f32, f32)> {
        self.has_drop.then(|| {
            let x = self.x + (self.width - DROP_W) / 2.0;
            let y = self.y + self.height + 1.0;
            (x, y, DROP_W, DROP_H)
        })
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed square bounding box
    pub size: Vec2,
    pub on_ground: bool,
    /// Invulnerability window expiry (tick), if active
    pub invulnerable_until: Option<u64>,
}

impl Player {
    fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(RUNNER_SIZE),
            on_ground: true,
            invulnerable_until: None,
        }
    }

    pub fn is_invulnerable(&self, now: u64) -> bool {
        self.invulnerable_until.is_some_and(|until| now < until)
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }
}

/// Cumulative drop damage machine.
///
/// Idle -> Hit1 -> Hit2 -> Dead on drop hits; flames heal one level back.
/// Dead is terminal until the session restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageState {
    Idle,
    Hit1,
    Hit2,
    Dead {
        /// Tick at which the runner died; drives the fall animation and
        /// the deferred game-over
        start_tick: u64,
    },
}

impl DamageState {
    /// Damage level 0-3
    pub fn level(&self) -> u8 {
        match self {
            DamageState::Idle => 0,
            DamageState::Hit1 => 1,
            DamageState::Hit2 => 2,
            DamageState::Dead { .. } => 3,
        }
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, DamageState::Dead { .. })
    }

    /// Next state after a drop hit at `now`
    pub fn after_drop_hit(self, now: u64) -> DamageState {
        match self {
            DamageState::Idle => DamageState::Hit1,
            DamageState::Hit1 => DamageState::Hit2,
            DamageState::Hit2 | DamageState::Dead { .. } => DamageState::Dead { start_tick: now },
        }
    }

    /// Next state after a flame heal (one level back, saturating at Idle;
    /// the dead never heal)
    pub fn healed(self) -> DamageState {
        match self {
            DamageState::Idle | DamageState::Hit1 => DamageState::Idle,
            DamageState::Hit2 => DamageState::Hit1,
            dead @ DamageState::Dead { .. } => dead,
        }
    }
}

/// Side effects emitted by the tick, drained by the shell once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Pull direction inverted by player input
    Flipped,
    /// Drop collision registered; carries the resulting damage level
    DropHit { level: u8 },
    /// Flame contact healed one damage level
    FlameHealed,
    /// Runner entered the dead state (drop damage or out of lives); the
    /// shell schedules the deferred game-over from this
    Died,
    /// Runner left the world bounds while alive; immediate game-over
    WorldExited,
}

/// Complete game state for one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Owning session id; deferred events from other sessions are stale
    pub session: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Active platforms, generation order (sorted by id)
    pub platforms: Vec<Platform>,
    pub camera_x: f32,
    /// Current auto-scroll speed (px/s), scales with level
    pub scroll_speed: f32,
    pub pull_speed: f32,
    /// Pull gravity direction: +1 down, -1 up
    pub pull_dir: i8,
    pub lives: u8,
    /// Platforms passed
    pub score: u32,
    pub level: u32,
    pub damage: DamageState,
    /// Heal flash expiry for the renderer, if active
    pub heal_flash_until: Option<u64>,
    /// Pending side effects for the shell
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
    /// Generation cursor: x where the next platform batch starts
    pub last_platform_x: f32,
}

impl GameState {
    /// Create a fresh session state: the opening platform centered on the
    /// canvas with the runner grounded on top, plus the generated window
    /// ahead of it.
    pub fn new(seed: u64, session: u64) -> Self {
        let opening_y = CANVAS_H / 2.0 - PLATFORM_HEIGHT / 2.0;
        let mut state = Self {
            seed,
            session,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::new(Vec2::new(20.0, opening_y - RUNNER_SIZE)),
            platforms: Vec::new(),
            camera_x: 0.0,
            scroll_speed: BASE_SCROLL_SPEED,
            pull_speed: PULL_SPEED,
            pull_dir: 1,
            lives: MAX_LIVES,
            score: 0,
            level: 1,
            damage: DamageState::Idle,
            heal_flash_until: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            last_platform_x: 0.0,
        };

        // Opening platform: double width, hazard-free, vertically centered
        let width = generate::pick_ratio_width(&mut state.rng) * 2.0;
        let id = state.next_platform_id();
        state.platforms.push(Platform {
            id,
            x: 0.0,
            y: opening_y,
            width,
            height: PLATFORM_HEIGHT,
            track: Track::Top,
            has_fire: false,
            has_drop: false,
            drop_dir: DropDir::Down,
            passed: false,
        });
        state.last_platform_x = width + 120.0;

        generate::extend_ahead(&mut state);
        state
    }

    /// Allocate the next platform id
    pub fn next_platform_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_dead(&self) -> bool {
        self.damage.is_dead()
    }

    /// Damage level 0-3 (the "drop hit count")
    pub fn drop_hit_count(&self) -> u8 {
        self.damage.level()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the pending events to the shell
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
