//! Procedural platform and hazard generation
//!
//! Purely forward-producing: platforms are emitted ahead of the camera in id
//! order and never revisited, except for clearing a collected drop flag.
//! Every placement honors the minimum vertical gap between consecutive
//! platforms on opposite gravity tracks; when a proposal would undercut it,
//! the offset is pushed apart and, failing that, the horizontal packing is
//! relaxed and the placement retried.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::state::{DropDir, GameState, Platform, Track};

/// Placement attempts before falling back to the unconstrained same-track
/// band
const MAX_PLACEMENT_ATTEMPTS: u32 = 8;
/// Extra horizontal step added per relaxed retry
const RELAX_STEP: f32 = 40.0;

/// Opening-style platform width: difficulty-free base times a 1/2/3 ratio
pub fn pick_ratio_width(rng: &mut Pcg32) -> f32 {
    let r: f32 = rng.random();
    let ratio: f32 = if r < 0.34 {
        1.0
    } else if r < 0.67 {
        2.0
    } else {
        3.0
    };
    (100.0 * ratio).clamp(PLATFORM_MIN_WIDTH, PLATFORM_MAX_WIDTH)
}

/// Flame placement probability, rising with score and run time with an
/// early-game grace factor
pub fn fire_probability(score: u32, elapsed_secs: f32) -> f32 {
    let base = 0.1;
    let score_term = (score as f32 / 100.0 * 0.05).min(0.5);
    let time_term = (elapsed_secs / 60.0 * 0.05).min(0.25);
    let grace = (score as f32 / 50.0).clamp(0.5, 1.0);
    ((base + score_term + time_term) * grace).clamp(0.0, 0.85)
}

/// Drop placement probability, rising gently with score
pub fn drop_probability(score: u32) -> f32 {
    (0.12 + score as f32 * 0.0004).min(0.45)
}

/// Vertical placement band for a track: `(min_y, max_y)` for the platform's
/// top edge
fn track_band(track: Track) -> (f32, f32) {
    match track {
        Track::Top => (TOP_BOUND + TRACK_MARGIN, CANVAS_H / 2.0 - PLATFORM_HEIGHT),
        Track::Bottom => (CANVAS_H / 2.0, BOTTOM_BOUND - TRACK_MARGIN - PLATFORM_HEIGHT),
    }
}

/// Extend the platform window until it covers the lookahead distance ahead
/// of the runner
pub fn extend_ahead(state: &mut GameState) {
    while state.last_platform_x < state.player.pos.x + GEN_LOOKAHEAD {
        let mut cursor = state.last_platform_x;
        for _ in 0..GEN_BATCH {
            let (platform, step) = propose_platform(state, cursor);
            log::debug!(
                "platform {} at ({:.0}, {:.0}) w={:.0} track={:?} fire={} drop={}",
                platform.id,
                platform.x,
                platform.y,
                platform.width,
                platform.track,
                platform.has_fire,
                platform.has_drop
            );
            state.platforms.push(platform);
            cursor += step;
        }
        state.last_platform_x = cursor;
    }
}

/// Drop platforms that are fully behind the camera (never reachable again)
pub fn prune_behind(state: &mut GameState) {
    let cutoff = state.camera_x - CULL_BEHIND;
    state.platforms.retain(|p| p.right() > cutoff);
}

/// Propose the next platform at `x`, returning it with the horizontal step
/// to the one after it
fn propose_platform(state: &mut GameState, x: f32) -> (Platform, f32) {
    let score = state.score;
    let elapsed_secs = state.time_ticks as f32 * SIM_DT;
    let prev = state.platforms.last().map(|p| (p.track, p.y));

    let difficulty = (score as f32 / 600.0).min(1.0);
    let mut base_width = 100.0 - 30.0 * difficulty;
    if score < 50 {
        base_width += (50 - score) as f32 * 0.4;
    }

    let rng = &mut state.rng;
    let ratio = {
        let r: f32 = rng.random();
        if r < 0.34 {
            1.0
        } else if r < 0.67 {
            2.0
        } else {
            3.0
        }
    };
    let jitter: f32 = rng.random_range(-6.0..6.0);
    let width = (base_width * ratio + jitter).clamp(PLATFORM_MIN_WIDTH, PLATFORM_MAX_WIDTH);

    // Keep a little horizontal overlap so the next platform stays reachable
    // at the current scroll speed; packing loosens as difficulty rises.
    let overlap = 25.0 - 10.0 * difficulty;
    let step_jitter: f32 = rng.random_range(-5.0..5.0);
    let mut step = (width - overlap + step_jitter).max(40.0);

    let mut placement = None;
    for attempt in 0..MAX_PLACEMENT_ATTEMPTS {
        let track = if rng.random_bool(0.5) {
            Track::Top
        } else {
            Track::Bottom
        };
        let (min_y, max_y) = track_band(track);
        let mut y = rng.random_range(min_y..=max_y);

        if let Some((prev_track, prev_y)) = prev {
            if prev_track != track && (y - prev_y).abs() < MIN_VERTICAL_GAP {
                // Push the offset apart until the gap holds
                y = if y > prev_y {
                    (prev_y + MIN_VERTICAL_GAP).min(max_y)
                } else {
                    (prev_y - MIN_VERTICAL_GAP).max(min_y)
                };
                if (y - prev_y).abs() < MIN_VERTICAL_GAP {
                    // Band cannot satisfy the gap here; relax packing and
                    // try again
                    step += RELAX_STEP;
                    log::debug!("placement attempt {attempt} violated min gap, relaxing");
                    continue;
                }
            }
        }

        placement = Some((track, y));
        break;
    }

    // Unconstrained fallback: the same track as the previous platform
    let (track, y) = placement.unwrap_or_else(|| {
        let track = prev.map_or(Track::Bottom, |(t, _)| t);
        let (min_y, max_y) = track_band(track);
        (track, state.rng.random_range(min_y..=max_y))
    });

    let rng = &mut state.rng;
    let has_fire = rng.random::<f32>() < fire_probability(score, elapsed_secs);
    let has_drop = !has_fire && rng.random::<f32>() < drop_probability(score);
    let drop_dir = match track {
        Track::Top => DropDir::Down,
        Track::Bottom => DropDir::Up,
    };

    let id = state.next_platform_id();
    let platform = Platform {
        id,
        x,
        y,
        width,
        height: PLATFORM_HEIGHT,
        track,
        has_fire,
        has_drop,
        drop_dir,
        passed: false,
    };
    (platform, step)
}
