//! Fixed timestep frame tick
//!
//! Advances one frame of the simulation: integrator, hazard/damage machine,
//! generator. The renderer runs strictly after `tick` returns, so it never
//! observes a mid-update state.

use crate::consts::*;
use crate::sim::collision;
use crate::sim::generate;
use crate::sim::state::{DamageState, GameEvent, GamePhase, GameState};

/// Input commands for a single tick (edge-triggered, consumed once)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Invert the pull direction
    pub flip: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }
    if !matches!(state.phase, GamePhase::Playing) {
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    // Expire the invulnerability window
    if state
        .player
        .invulnerable_until
        .is_some_and(|until| now >= until)
    {
        state.player.invulnerable_until = None;
    }

    // Flip input (ignored once dead). Flipping tears the runner off the
    // ground: the pull now points away from the contact face.
    if input.flip && !state.is_dead() {
        state.pull_dir = -state.pull_dir;
        state.player.on_ground = false;
        state.push_event(GameEvent::Flipped);
    }

    integrate(state, dt);

    if !state.is_dead() {
        resolve_platforms(state);
        // Support was re-evaluated above; an unsupported runner carries the
        // pull velocity from this frame on, so the airborne law holds on
        // the frame it leaves a platform edge
        if !state.player.on_ground {
            state.player.vel.y = state.pull_speed * state.pull_dir as f32;
        }
        apply_hazards(state);
        score_passed_platforms(state);
        update_level(state);

        generate::extend_ahead(state);
        generate::prune_behind(state);

        check_world_bounds(state);
    }

    // Camera tracks the runner every frame, dead included, so the dead
    // runner stays in view instead of scrolling off
    state.camera_x = state.player.pos.x - CANVAS_W / 3.0;
}

/// Position/velocity update for the frame
fn integrate(state: &mut GameState, dt: f32) {
    let player = &mut state.player;

    if let DamageState::Dead { start_tick } = state.damage {
        // Scripted fall-out: horizontal position frozen entirely, vertical
        // speed ramps linearly to its cap, independent of pull gravity
        let elapsed = (state.time_ticks - start_tick) as f32 * SIM_DT;
        player.vel.x = 0.0;
        player.vel.y = (DEAD_FALL_ACCEL * elapsed).min(DEAD_FALL_MAX_SPEED);
        player.pos.y += player.vel.y * dt;
        return;
    }

    // Auto-scroll
    player.pos.x += state.scroll_speed * dt;

    // Linear pull: constant velocity while airborne, hard lock on ground
    player.vel.y = if player.on_ground {
        0.0
    } else {
        state.pull_speed * state.pull_dir as f32
    };
    player.pos.y += player.vel.y * dt;
}

/// Resolve the runner against every nearby platform
fn resolve_platforms(state: &mut GameState) {
    state.player.on_ground = false;
    let pull_dir = state.pull_dir;
    for platform in &state.platforms {
        let contact = collision::resolve_player_platform(&mut state.player, platform, pull_dir);
        if contact.grounded {
            state.player.on_ground = true;
        }
    }
}

/// Flame heals and drop damage, including the death transitions.
///
/// A single frame registers at most one drop collision: the first hit either
/// consumes the drop and opens the invulnerability window or kills the
/// runner outright.
fn apply_hazards(state: &mut GameState) {
    let now = state.time_ticks;

    // Flame contact heals one damage level
    let mut healed = false;
    for platform in &state.platforms {
        if collision::touches_fire(&state.player, platform, FIRE_OVERLAP_FRACTION) {
            healed = true;
            break;
        }
    }
    if healed && state.drop_hit_count() > 0 {
        state.damage = state.damage.healed();
        state.heal_flash_until = Some(now + HEAL_FLASH_TICKS);
        log::debug!("flame heal, damage level {}", state.drop_hit_count());
        state.push_event(GameEvent::FlameHealed);
    }

    if state.player.is_invulnerable(now) {
        return;
    }

    let mut hit_platform = None;
    for (idx, platform) in state.platforms.iter().enumerate() {
        if collision::touches_drop(&state.player, platform) {
            hit_platform = Some(idx);
            break;
        }
    }
    let Some(idx) = hit_platform else {
        return;
    };

    // Consume the drop so it cannot re-trigger
    state.platforms[idx].has_drop = false;
    state.lives = state.lives.saturating_sub(1);
    state.damage = state.damage.after_drop_hit(now);
    state.heal_flash_until = None;
    let level = state.drop_hit_count();
    log::info!("drop hit: damage level {level}, lives {}", state.lives);
    state.push_event(GameEvent::DropHit { level });

    // The third drop is fatal regardless of remaining lives; running out of
    // lives is fatal regardless of damage level. Both take the same
    // terminal path: the shell fires game-over after a fixed delay.
    if !state.damage.is_dead() && state.lives == 0 {
        state.damage = DamageState::Dead { start_tick: now };
    }
    if state.damage.is_dead() {
        state.push_event(GameEvent::Died);
    } else {
        state.player.invulnerable_until = Some(now + INVULNERABILITY_TICKS);
    }
}

/// Score one point per platform cleared
fn score_passed_platforms(state: &mut GameState) {
    let player_x = state.player.pos.x;
    for platform in &mut state.platforms {
        if !platform.passed && player_x > platform.right() {
            platform.passed = true;
            state.score += 1;
        }
    }
}

/// Level progression: every 20 platforms the scroll speed steps up 20%
fn update_level(state: &mut GameState) {
    let level = state.score / PLATFORMS_PER_LEVEL + 1;
    if level != state.level {
        state.level = level;
        state.scroll_speed = BASE_SCROLL_SPEED * LEVEL_SPEED_FACTOR.powi(level as i32 - 1);
        log::info!(
            "level {} reached, scroll speed {:.0} px/s",
            level,
            state.scroll_speed
        );
    }
}

/// Alive-only: the run ends once most of the runner is outside the vertical
/// bounds. Suspended while dead so the fall-out animation cannot cut the
/// deferred game-over short.
fn check_world_bounds(state: &mut GameState) {
    let player = &state.player;
    let over_top = (TOP_BOUND - player.pos.y).max(0.0);
    let over_bottom = (player.pos.y + player.height() - BOTTOM_BOUND).max(0.0);
    let outside = over_top.max(over_bottom) / player.height();
    if outside >= WORLD_EXIT_FRACTION {
        log::info!("runner left the world bounds, ending run");
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::WorldExited);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{DropDir, Platform, Track};
    use glam::Vec2;
    use proptest::prelude::*;

    /// A state with one long platform under the runner and generation
    /// pushed far out so ticks stay within a controlled layout
    fn bare_state() -> GameState {
        let mut state = GameState::new(12345, 1);
        state.platforms.clear();
        state.platforms.push(test_platform(1, 0.0, 400.0, 10_000.0));
        state.player.pos = Vec2::new(50.0, 400.0 - RUNNER_SIZE);
        state.player.vel = Vec2::ZERO;
        state.player.on_ground = true;
        state.last_platform_x = 1_000_000.0;
        state
    }

    fn test_platform(id: u32, x: f32, y: f32, width: f32) -> Platform {
        Platform {
            id,
            x,
            y,
            width,
            height: PLATFORM_HEIGHT,
            track: Track::Bottom,
            has_fire: false,
            has_drop: false,
            drop_dir: DropDir::Down,
            passed: false,
        }
    }

    fn hit_drop(state: &mut GameState) {
        // Re-arm a drop directly under the runner and step one frame
        let drop_y = state.player.pos.y - PLATFORM_HEIGHT - 10.0;
        let platform_x = state.player.pos.x + state.player.width() / 2.0 - 100.0;
        let id = state.next_platform_id();
        let mut platform = test_platform(id, platform_x, drop_y, 200.0);
        platform.has_drop = true;
        state.platforms.push(platform);
        tick(state, &TickInput::default(), SIM_DT);
    }

    #[test]
    fn grounded_runner_has_zero_vertical_velocity() {
        let mut state = bare_state();
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert!(state.player.on_ground);
            assert_eq!(state.player.vel.y, 0.0);
        }
    }

    #[test]
    fn airborne_velocity_is_exactly_pull_speed() {
        let mut state = bare_state();
        // Walk the runner off the platform end
        state.player.pos.x = 20_000.0;
        state.player.on_ground = false;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase == GamePhase::GameOver {
                break;
            }
            assert_eq!(
                state.player.vel.y,
                state.pull_speed * state.pull_dir as f32
            );
        }
    }

    #[test]
    fn flip_inverts_pull_and_releases_ground() {
        let mut state = bare_state();
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.on_ground);

        let flip = TickInput {
            flip: true,
            ..Default::default()
        };
        tick(&mut state, &flip, SIM_DT);
        assert_eq!(state.pull_dir, -1);
        assert!(state.drain_events().contains(&GameEvent::Flipped));

        // Ground contact breaks on the flip frame; the runner rises at the
        // pull speed
        assert!(!state.player.on_ground);
        assert_eq!(state.player.vel.y, -state.pull_speed);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.vel.y, -state.pull_speed);
    }

    #[test]
    fn auto_scroll_advances_player_and_camera() {
        let mut state = bare_state();
        let x0 = state.player.pos.x;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.pos.x > x0);
        assert_eq!(state.camera_x, state.player.pos.x - CANVAS_W / 3.0);
    }

    #[test]
    fn drop_hit_damages_and_grants_invulnerability() {
        let mut state = bare_state();
        hit_drop(&mut state);
        assert_eq!(state.drop_hit_count(), 1);
        assert_eq!(state.lives, MAX_LIVES - 1);
        assert!(state.player.is_invulnerable(state.time_ticks));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::DropHit { level: 1 })
        );
        // The drop was consumed
        assert!(state.platforms.iter().all(|p| !p.has_drop));
    }

    #[test]
    fn invulnerability_blocks_second_hit_within_window() {
        let mut state = bare_state();
        hit_drop(&mut state);
        assert_eq!(state.drop_hit_count(), 1);
        // Immediately re-armed drop must not register
        hit_drop(&mut state);
        assert_eq!(state.drop_hit_count(), 1);
        assert_eq!(state.lives, MAX_LIVES - 1);
    }

    #[test]
    fn third_drop_kills_in_same_frame_regardless_of_lives() {
        let mut state = bare_state();
        state.lives = 200; // Plenty of lives left: the 3rd drop still kills
        for expected_level in 1..=3u8 {
            // Step past the invulnerability window between hits
            state.player.invulnerable_until = None;
            hit_drop(&mut state);
            assert_eq!(state.drop_hit_count(), expected_level);
        }
        assert!(state.is_dead());
        assert!(state.drain_events().contains(&GameEvent::Died));
    }

    #[test]
    fn out_of_lives_kills_even_at_low_damage() {
        let mut state = bare_state();
        state.lives = 1;
        hit_drop(&mut state);
        assert_eq!(state.drop_hit_count(), 1);
        assert_eq!(state.lives, 0);
        assert!(state.is_dead());
        assert!(state.drain_events().contains(&GameEvent::Died));
    }

    #[test]
    fn flame_heals_one_level_and_cancels_nothing_else() {
        let mut state = bare_state();
        hit_drop(&mut state);
        assert_eq!(state.drop_hit_count(), 1);

        // Put a flame where the runner stands: the flame box sits fully
        // inside the runner's box, well past the overlap threshold
        let fire_y = state.player.pos.y + 40.0;
        let platform_x = state.player.pos.x + state.player.width() / 2.0 - 100.0;
        let id = state.next_platform_id();
        let mut platform = test_platform(id, platform_x, fire_y, 200.0);
        platform.has_fire = true;
        state.platforms.push(platform);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.drop_hit_count(), 0);
        assert!(!state.is_dead());
        assert!(state.drain_events().contains(&GameEvent::FlameHealed));
    }

    #[test]
    fn dead_runner_freezes_horizontally_and_follows_fall_law() {
        let mut state = bare_state();
        state.damage = DamageState::Dead {
            start_tick: state.time_ticks,
        };
        let frozen_x = state.player.pos.x;

        for n in 1..=150u64 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert_eq!(state.player.pos.x, frozen_x);
            assert_eq!(state.camera_x, frozen_x - CANVAS_W / 3.0);
            let t = n as f32 * SIM_DT;
            let expected = (DEAD_FALL_ACCEL * t).min(DEAD_FALL_MAX_SPEED);
            assert!((state.player.vel.y - expected).abs() < 1e-3);
            // World-bounds exit is suspended: still ticking, not game over
            assert_ne!(state.phase, GamePhase::GameOver);
        }
        // Fall speed capped after 1.5 s
        assert_eq!(state.player.vel.y, DEAD_FALL_MAX_SPEED);
    }

    #[test]
    fn dead_runner_ignores_flip_input() {
        let mut state = bare_state();
        state.damage = DamageState::Dead {
            start_tick: state.time_ticks,
        };
        let flip = TickInput {
            flip: true,
            ..Default::default()
        };
        tick(&mut state, &flip, SIM_DT);
        assert_eq!(state.pull_dir, 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn world_exit_ends_run_while_alive() {
        let mut state = bare_state();
        state.platforms.clear();
        state.player.on_ground = false;
        state.player.pos.y = BOTTOM_BOUND - 5.0;
        // Falling out the bottom at pull speed
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::WorldExited));
    }

    #[test]
    fn passing_platforms_scores_once_each() {
        let mut state = bare_state();
        state.platforms.push(test_platform(2, 100.0, 200.0, 50.0));
        state.player.pos.x = 200.0; // Already past the small platform
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 1);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn level_up_raises_scroll_speed() {
        let mut state = bare_state();
        state.score = PLATFORMS_PER_LEVEL;
        // Pass one more platform to trigger the recompute
        state.platforms.push(test_platform(2, 100.0, 200.0, 50.0));
        state.player.pos.x = 200.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.level, 2);
        assert!((state.scroll_speed - BASE_SCROLL_SPEED * LEVEL_SPEED_FACTOR).abs() < 1e-3);
    }

    #[test]
    fn pause_freezes_and_resumes() {
        let mut state = bare_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let ticks_before = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks_before);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.time_ticks > ticks_before);
    }

    #[test]
    fn same_inputs_same_trajectory() {
        let mut a = GameState::new(777, 1);
        let mut b = GameState::new(777, 2);
        let flip_frames = [13usize, 40, 77, 120];
        for frame in 0..240 {
            let input = TickInput {
                flip: flip_frames.contains(&frame),
                ..Default::default()
            };
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.platforms.len(), b.platforms.len());
    }

    proptest! {
        /// The pull law holds exactly under arbitrary flip sequences: after
        /// any frame, the runner is either grounded with zero vertical
        /// velocity, dead on the fall ramp, or airborne at pull speed.
        #[test]
        fn pull_law_under_random_flips(flips in proptest::collection::vec(any::<bool>(), 120)) {
            let mut state = GameState::new(4242, 1);
            for flip in flips {
                let input = TickInput { flip, ..Default::default() };
                tick(&mut state, &input, SIM_DT);
                if state.phase != GamePhase::Playing {
                    break;
                }
                if state.is_dead() {
                    prop_assert_eq!(state.player.vel.x, 0.0);
                } else if state.player.on_ground {
                    prop_assert_eq!(state.player.vel.y, 0.0);
                } else {
                    prop_assert_eq!(
                        state.player.vel.y,
                        state.pull_speed * state.pull_dir as f32
                    );
                }
            }
        }
    }
}
