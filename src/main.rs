//! Flip Runner entry point
//!
//! Headless demo run: drives the session with a panic-flip autopilot and
//! logs the outcome. A real shell would execute the draw commands and wire
//! the audio queue to a backend.

use flip_runner::assets::AssetStore;
use flip_runner::consts::*;
use flip_runner::sim::TickInput;
use flip_runner::{ScoreHistory, Session, Settings};

/// Flip whenever the runner gets this close to the bound it is pulled
/// toward
const PANIC_MARGIN: f32 = 90.0;

fn main() {
    env_logger::init();
    log::info!("Flip Runner (headless demo) starting...");

    let mut session = Session::new(12345, Settings::load(), ScoreHistory::load());
    session.assets = AssetStore::fully_loaded();
    session.start();

    let mut frames = 0u32;
    while frames < 3600 {
        let flip = session.state().is_some_and(|s| {
            !s.is_dead()
                && s.phase == flip_runner::sim::GamePhase::Playing
                && match s.pull_dir {
                    1 => s.player.pos.y + s.player.height() > BOTTOM_BOUND - PANIC_MARGIN,
                    _ => s.player.pos.y < TOP_BOUND + PANIC_MARGIN,
                }
        });
        session.frame(&TickInput { flip, pause: false });

        for playback in session.audio.drain() {
            log::debug!("audio backend would play {playback:?}");
        }

        frames += 1;
        if session.is_game_over() {
            break;
        }
    }

    let drawn = session.render().map_or(0, |frame| frame.cmds.len());
    println!(
        "demo over after {frames} frames: score {}, lives {}, best {}, {} draw commands in the last frame",
        session.score(),
        session.lives(),
        session.scores.best(),
        drawn
    );
}
