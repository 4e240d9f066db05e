//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod generate;
pub mod state;
pub mod tick;

pub use state::{
    DamageState, DropDir, GameEvent, GamePhase, GameState, Platform, Player, Track,
};
pub use tick::{TickInput, tick};
