//! Pure frame composition
//!
//! `render` is a pure function from game state + asset load status to a
//! draw-command list. It never mutates state; the shell executes the
//! commands against whatever surface it owns. Commands carry world
//! coordinates; the frame's `camera_x` maps them to the screen.

pub mod sprite;

use crate::assets::{AssetId, AssetStore};
use crate::consts::*;
use crate::sim::GameState;
use self::sprite::{FilterParams, ResolvedSprite};

/// RGBA color, straight alpha
pub type Color = [f32; 4];

const PLATFORM_BROWN: Color = [0.545, 0.271, 0.075, 1.0];
const RUNNER_FALLBACK_RED: Color = [0.545, 0.0, 0.0, 1.0];
const FIRE_FALLBACK_ORANGE: Color = [1.0, 0.55, 0.1, 1.0];
const DROP_FALLBACK_BLUE: Color = [0.25, 0.55, 0.95, 1.0];
const HEAL_FLASH: Color = [1.0, 0.85, 0.3, 0.35];
const LABEL_GREY: Color = [0.9, 0.9, 0.9, 0.8];

/// How far past the canvas edges platforms are still drawn
const DRAW_MARGIN: f32 = 50.0;
/// Run-cycle frame advance cadence (ticks per frame)
const RUN_ANIM_TICKS: u64 = 9;
const FIRE_ANIM_TICKS: u64 = 12;

/// One draw command, world coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Sprite {
        asset: AssetId,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        /// Vertical mirror about the sprite's own center
        mirrored: bool,
        filter: FilterParams,
    },
    /// Small overlay label (platform ids, when enabled)
    Label { text: String, x: f32, y: f32, color: Color },
}

/// Rendering toggles sourced from settings
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Draw platform ids above each platform (dev aid, off by default)
    pub show_platform_ids: bool,
}

/// A composed frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub camera_x: f32,
    pub cmds: Vec<DrawCmd>,
}

/// Compose the current frame from read-only state
pub fn render(state: &GameState, assets: &AssetStore, options: &RenderOptions) -> Frame {
    let mut cmds = Vec::new();
    let view_min = state.camera_x - DRAW_MARGIN;
    let view_max = state.camera_x + CANVAS_W + DRAW_MARGIN;

    let fire_asset = AssetId::fire_frame(state.time_ticks / FIRE_ANIM_TICKS);

    for platform in &state.platforms {
        if platform.right() < view_min || platform.x > view_max {
            continue;
        }

        cmds.push(DrawCmd::Rect {
            x: platform.x,
            y: platform.y,
            w: platform.width,
            h: platform.height,
            color: PLATFORM_BROWN,
        });

        // Hazard sprites render unmirrored regardless of drop direction
        if let Some((x, y, w, h)) = platform.fire_box() {
            if assets.is_loaded(fire_asset) {
                cmds.push(DrawCmd::Sprite {
                    asset: fire_asset,
                    x,
                    y,
                    w,
                    h,
                    mirrored: false,
                    filter: FilterParams::NONE,
                });
            } else {
                cmds.push(DrawCmd::Rect {
                    x,
                    y,
                    w,
                    h,
                    color: FIRE_FALLBACK_ORANGE,
                });
            }
        }
        if let Some((x, y, w, h)) = platform.drop_box() {
            if assets.is_loaded(AssetId::Drop) {
                cmds.push(DrawCmd::Sprite {
                    asset: AssetId::Drop,
                    x,
                    y,
                    w,
                    h,
                    mirrored: false,
                    filter: FilterParams::NONE,
                });
            } else {
                cmds.push(DrawCmd::Rect {
                    x,
                    y,
                    w,
                    h,
                    color: DROP_FALLBACK_BLUE,
                });
            }
        }

        if options.show_platform_ids {
            cmds.push(DrawCmd::Label {
                text: platform.id.to_string(),
                x: platform.x + platform.width / 2.0,
                y: platform.y - 12.0,
                color: LABEL_GREY,
            });
        }
    }

    draw_runner(state, assets, &mut cmds);

    Frame {
        camera_x: state.camera_x,
        cmds,
    }
}

fn draw_runner(state: &GameState, assets: &AssetStore, cmds: &mut Vec<DrawCmd>) {
    let player = &state.player;
    let anim_frame = state.time_ticks / RUN_ANIM_TICKS;
    let spec = sprite::runner_sprite(&state.damage, state.pull_dir, anim_frame);

    match sprite::resolve_runner(&spec, assets) {
        ResolvedSprite::Asset(asset) => {
            if asset != spec.preferred {
                log::warn!("runner sprite {:?} not loaded, substituting {asset:?}", spec.preferred);
            }
            cmds.push(DrawCmd::Sprite {
                asset,
                x: player.pos.x,
                y: player.pos.y,
                w: player.width(),
                h: player.height(),
                mirrored: spec.mirrored,
                filter: spec.filter,
            });
        }
        ResolvedSprite::FallbackRect => {
            log::warn!("no runner sprite loaded, drawing fallback rect");
            cmds.push(DrawCmd::Rect {
                x: player.pos.x,
                y: player.pos.y,
                w: player.width(),
                h: player.height(),
                color: RUNNER_FALLBACK_RED,
            });
        }
    }

    if state
        .heal_flash_until
        .is_some_and(|until| state.time_ticks < until)
    {
        cmds.push(DrawCmd::Rect {
            x: player.pos.x - 4.0,
            y: player.pos.y - 4.0,
            w: player.width() + 8.0,
            h: player.height() + 8.0,
            color: HEAL_FLASH,
        });
    }
}
