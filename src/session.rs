//! Shell driver
//!
//! Owns the game state across restarts and everything around it: the
//! READY countdown, the deferred game-over, audio fan-out, and score
//! persistence. Deferred actions are explicit scheduled events tagged with
//! the owning session id and checked for due-ness once per frame; a timer
//! scheduled by a previous session can never mutate the next one.

use crate::assets::AssetStore;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::highscores::ScoreHistory;
use crate::renderer::{self, Frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    GameOver,
}

/// A scheduled action owned by one session
#[derive(Debug, Clone, Copy)]
struct Deferred {
    session: u64,
    due_frame: u64,
    action: DeferredAction,
}

/// The presentation shell's handle on the game core
#[derive(Debug)]
pub struct Session {
    seed: u64,
    /// Bumped on every start/restart; stale deferred actions are dropped
    session_seq: u64,
    /// Monotonic frame counter across restarts
    frame_count: u64,
    state: Option<GameState>,
    /// READY countdown frames remaining, if counting down
    countdown: Option<u32>,
    deferred: Vec<Deferred>,
    score_saved: bool,
    pub settings: Settings,
    pub scores: ScoreHistory,
    pub audio: AudioSink,
    pub assets: AssetStore,
}

impl Session {
    pub fn new(seed: u64, settings: Settings, scores: ScoreHistory) -> Self {
        let mut audio = AudioSink::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        Self {
            seed,
            session_seq: 0,
            frame_count: 0,
            state: None,
            countdown: None,
            deferred: Vec::new(),
            score_saved: false,
            settings,
            scores,
            audio,
            assets: AssetStore::new(),
        }
    }

    /// Begin a run if none is active
    pub fn start(&mut self) {
        let run_active = self
            .state
            .as_ref()
            .is_some_and(|s| s.phase != GamePhase::GameOver);
        if run_active || self.countdown.is_some() {
            return;
        }
        self.begin_countdown();
    }

    /// Abandon the current run and begin a fresh one
    pub fn restart(&mut self) {
        self.begin_countdown();
    }

    fn begin_countdown(&mut self) {
        self.session_seq += 1;
        self.countdown = Some(COUNTDOWN_TICKS);
        log::info!("session {} counting down", self.session_seq);
    }

    /// Pause toggle; ignored during countdown and after game over
    pub fn pause(&mut self) {
        if self.countdown.is_some() {
            return;
        }
        if let Some(state) = &mut self.state {
            match state.phase {
                GamePhase::Playing => state.phase = GamePhase::Paused,
                GamePhase::Paused => state.phase = GamePhase::Playing,
                GamePhase::GameOver => {}
            }
        }
    }

    /// Advance one display frame
    pub fn frame(&mut self, input: &TickInput) {
        self.frame_count += 1;

        if let Some(remaining) = self.countdown {
            let remaining = remaining - 1;
            if remaining == 0 {
                // Countdown done: a fresh state for a fresh session
                self.countdown = None;
                self.score_saved = false;
                self.state = Some(GameState::new(self.seed, self.session_seq));
                log::info!("session {} playing", self.session_seq);
            } else {
                self.countdown = Some(remaining);
            }
            return;
        }

        let events = match &mut self.state {
            Some(state) => {
                tick(state, input, SIM_DT);
                state.drain_events()
            }
            None => Vec::new(),
        };
        for event in events {
            self.handle_event(event);
        }

        self.fire_due_deferred();
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Flipped => self.audio.play(SoundEffect::Flip),
            GameEvent::DropHit { .. } => self.audio.play(SoundEffect::DropHit),
            GameEvent::FlameHealed => self.audio.play(SoundEffect::FlameHeal),
            GameEvent::Died => {
                // Terminal path: game over fires after a fixed delay, and
                // nothing (including the dead runner falling out of view)
                // may preempt it
                self.deferred.push(Deferred {
                    session: self.session_seq,
                    due_frame: self.frame_count + GAME_OVER_DELAY_TICKS,
                    action: DeferredAction::GameOver,
                });
            }
            GameEvent::WorldExited => self.finish_run(),
        }
    }

    fn fire_due_deferred(&mut self) {
        let now = self.frame_count;
        let mut due = Vec::new();
        self.deferred.retain(|d| {
            if d.due_frame <= now {
                due.push(*d);
                false
            } else {
                true
            }
        });

        for deferred in due {
            if deferred.session != self.session_seq {
                log::debug!(
                    "dropping stale {:?} from session {}",
                    deferred.action,
                    deferred.session
                );
                continue;
            }
            match deferred.action {
                DeferredAction::GameOver => {
                    if let Some(state) = &mut self.state {
                        state.phase = GamePhase::GameOver;
                    }
                    self.finish_run();
                }
            }
        }
    }

    /// Persist the score (once) and play the game-over jingle
    fn finish_run(&mut self) {
        if self.score_saved {
            return;
        }
        self.score_saved = true;
        let score = self.score();
        let new_best = self.scores.save(score);
        log::info!("run over: score {score}{}", if new_best { " (new best)" } else { "" });
        self.audio.play(SoundEffect::GameOver);
    }

    /// Compose the current frame, if a run exists to draw
    pub fn render(&self) -> Option<Frame> {
        let state = self.state.as_ref()?;
        Some(renderer::render(
            state,
            &self.assets,
            &self.settings.render_options(),
        ))
    }

    // Read-only observables for the shell

    pub fn is_playing(&self) -> bool {
        self.countdown.is_none()
            && self
                .state
                .as_ref()
                .is_some_and(|s| s.phase == GamePhase::Playing)
    }

    pub fn is_game_over(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.phase == GamePhase::GameOver)
    }

    pub fn score(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.score)
    }

    pub fn lives(&self) -> u8 {
        self.state.as_ref().map_or(0, |s| s.lives)
    }

    /// Countdown frames remaining, if counting down
    pub fn countdown(&self) -> Option<u32> {
        self.countdown
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }
}
