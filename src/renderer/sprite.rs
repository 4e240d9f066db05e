//! State-dependent runner sprite selection
//!
//! A pure function from (damage level, pull direction) to sprite, mirror
//! flag, and filter parameters. Priority order is strict: Dead beats Hit2
//! beats Hit1 beats Idle.

use crate::assets::{AssetId, AssetStore};
use crate::sim::DamageState;

/// CSS-style color filter applied to a sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// 1.0 = unchanged
    pub saturate: f32,
    /// 1.0 = unchanged
    pub brightness: f32,
}

impl FilterParams {
    /// No color adjustment
    pub const NONE: FilterParams = FilterParams {
        saturate: 1.0,
        brightness: 1.0,
    };
    pub const IDLE: FilterParams = FilterParams {
        saturate: 1.2,
        brightness: 1.0,
    };
    pub const HIT1: FilterParams = FilterParams {
        saturate: 0.6,
        brightness: 0.8,
    };
    pub const HIT2: FilterParams = FilterParams {
        saturate: 0.0,
        brightness: 0.5,
    };
    pub const DEAD: FilterParams = FilterParams {
        saturate: 0.1,
        brightness: 0.5,
    };
}

/// Selected runner sprite before asset availability is considered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSpec {
    pub preferred: AssetId,
    /// Vertically mirrored about the sprite's own center (upward pull)
    pub mirrored: bool,
    pub filter: FilterParams,
}

/// What the renderer should actually draw for the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedSprite {
    Asset(AssetId),
    /// No usable asset loaded; draw the solid fallback rectangle
    FallbackRect,
}

/// Pick the runner sprite for the current damage state and pull direction.
/// `anim_frame` indexes the run cycle for the living states.
pub fn runner_sprite(damage: &DamageState, pull_dir: i8, anim_frame: u64) -> SpriteSpec {
    let (preferred, filter) = match damage {
        DamageState::Dead { .. } => (AssetId::DeadSprite, FilterParams::DEAD),
        DamageState::Hit2 => (AssetId::idle_frame(anim_frame), FilterParams::HIT2),
        DamageState::Hit1 => (AssetId::idle_frame(anim_frame), FilterParams::HIT1),
        DamageState::Idle => (AssetId::idle_frame(anim_frame), FilterParams::IDLE),
    };
    SpriteSpec {
        preferred,
        mirrored: pull_dir < 0,
        filter,
    }
}

/// Apply the asset fallback chain. The dead state degrades dedicated sprite
/// -> idle frame 0 under the same filter -> solid rectangle; living states
/// degrade straight to the rectangle.
pub fn resolve_runner(spec: &SpriteSpec, assets: &AssetStore) -> ResolvedSprite {
    if assets.is_loaded(spec.preferred) {
        return ResolvedSprite::Asset(spec.preferred);
    }
    if spec.preferred == AssetId::DeadSprite && assets.is_loaded(AssetId::Idle0) {
        return ResolvedSprite::Asset(AssetId::Idle0);
    }
    ResolvedSprite::FallbackRect
}
