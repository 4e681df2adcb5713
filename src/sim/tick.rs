//! Per-frame simulation update
//!
//! One call to [`tick`] advances the whole game by one frame, in a fixed
//! order: input, player, controllers, projectiles, collisions, then the
//! wave/session lifecycle checks.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::state::{GameEvent, GamePhase, GameState, Projectile};
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Held pointer/touch position; left half of the field steers left
    pub pointer: Option<Vec2>,
    /// Fire (pressed this frame)
    pub fire: bool,
    /// Pause toggle (pressed this frame)
    pub pause: bool,
    /// Start a new game after game over
    pub restart: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        }
        return;
    }

    // Handle pause toggle
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            _ => GamePhase::Playing,
        };
    }
    if state.phase == GamePhase::Paused {
        return;
    }

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    update_player(state, &input, dt);
    if state.phase == GamePhase::GameOver {
        return;
    }

    {
        let GameState {
            tuning,
            swarm,
            target,
            enemy_shots,
            events,
            rng,
            ..
        } = state;
        swarm.update(dt, tuning, rng, enemy_shots, events);
        target.update(dt, tuning, rng, events);
    }

    update_projectiles(state, dt);
    update_explosions(state, dt);
    resolve_collisions(state);

    if wave_cleared(state) {
        next_wave(state);
    }
    check_swarm_landing(state);
}

/// Synthesize input that tracks the nearest alien column and keeps firing
fn autopilot(state: &GameState) -> TickInput {
    let ship_x = state.player.rect().center().x;
    let aim = state
        .swarm
        .active()
        .map(|(_, alien)| alien.rect().center().x)
        .min_by(|a, b| {
            (a - ship_x)
                .abs()
                .partial_cmp(&(b - ship_x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let (left, right) = match aim {
        Some(x) if x < ship_x - 4.0 => (true, false),
        Some(x) if x > ship_x + 4.0 => (false, true),
        _ => (false, false),
    };

    TickInput {
        left,
        right,
        fire: true,
        ..Default::default()
    }
}

/// Death-explosion countdown, or movement and firing while alive
fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.player.is_exploding() {
        state.player.explosion_timer -= dt;
        if !state.player.is_exploding() {
            state.player.lives = state.player.lives.saturating_sub(1);
            if state.player.lives == 0 {
                game_over(state, "out of lives");
            } else {
                log::debug!("Player respawned, {} lives left", state.player.lives);
                state.player.respawn();
            }
        }
        return;
    }

    let step = state.tuning.player_speed * dt;
    let mut dx = 0.0;
    if input.left {
        dx -= step;
    }
    if input.right {
        dx += step;
    }
    if let Some(pointer) = input.pointer {
        dx += if pointer.x < FIELD_WIDTH / 2.0 { -step } else { step };
    }
    state.player.pos.x = (state.player.pos.x + dx).clamp(0.0, FIELD_WIDTH - PLAYER_WIDTH);

    if input.fire {
        fire_player_shot(state);
    }
}

/// Launch the player's shot unless one is already in flight
///
/// Returns whether a new shot was created.
pub fn fire_player_shot(state: &mut GameState) -> bool {
    if state.player_shot.is_some() || state.player.is_exploding() {
        return false;
    }
    state.player_shot = Some(Projectile::player(
        &state.player.rect(),
        state.tuning.player_shot_speed,
    ));
    state.events.push(GameEvent::ShotFired);
    true
}

/// Move every shot and retire the ones that left the field
fn update_projectiles(state: &mut GameState, dt: f32) {
    if let Some(shot) = &mut state.player_shot {
        shot.advance(dt);
        if shot.rect().bottom() < 0.0 {
            state.player_shot = None;
        }
    }

    state.enemy_shots.retain(|shot| {
        shot.advance(dt);
        shot.rect().top() <= FIELD_HEIGHT
    });
}

fn update_explosions(state: &mut GameState, dt: f32) {
    state.explosions.retain(|explosion| {
        explosion.lifetime -= dt;
        explosion.lifetime > 0.0
    });
}

/// Swarm gone, no bonus target on screen, player not mid-explosion
pub fn wave_cleared(state: &GameState) -> bool {
    state.swarm.is_depleted() && !state.target.is_active() && !state.player.is_exploding()
}

/// Start the next wave: fresh grid and shields, cleared projectiles
pub fn next_wave(state: &mut GameState) {
    state.wave += 1;
    log::info!("Wave cleared, starting wave {} (score {})", state.wave, state.score);

    {
        let GameState {
            tuning,
            swarm,
            target,
            rng,
            wave,
            ..
        } = state;
        swarm.reset(tuning, *wave, rng);
        target.reschedule(tuning, rng);
    }

    state.player.respawn();
    state.player_shot = None;
    state.enemy_shots.clear();
    state.shields.reset_all();
    state.events.push(GameEvent::WaveCleared(state.wave));
}

/// Lose check and shield contact damage for the advancing swarm
///
/// Any alien reaching the player's line ends the game outright. Aliens
/// overlapping a shield stamp damage across their bottom edge.
fn check_swarm_landing(state: &mut GameState) {
    let player_y = state.player.pos.y;
    let stamps = state.tuning.shield_contact_stamps;

    for index in 0..state.swarm.aliens.len() {
        let alien = &state.swarm.aliens[index];
        if !alien.active {
            continue;
        }
        let rect = alien.rect();

        if rect.bottom() >= player_y {
            state.events.push(GameEvent::PlayerDestroyed);
            game_over(state, "swarm reached the player");
            return;
        }

        for s in 0..state.shields.len() {
            let shield = &state.shields.shields[s];
            if !shield.active || !rect.intersects(&shield.bounds) {
                continue;
            }
            for k in 0..stamps {
                let t = (k as f32 + 1.0) / (stamps as f32 + 1.0);
                let point = Vec2::new(rect.left() + rect.size.x * t, rect.bottom());
                state.shields.damage(s, point);
            }
        }
    }
}

fn game_over(state: &mut GameState, reason: &str) {
    state.phase = GamePhase::GameOver;
    state.player_shot = None;
    state.events.push(GameEvent::GameOver);
    log::info!(
        "Game over ({reason}): score {}, wave {}, hi-score {}",
        state.score,
        state.wave,
        state.hi_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::saucer::TargetState;

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = GameState::new(12345);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let move_timer = state.swarm.move_timer;
        let player_x = state.player.pos.x;
        let held = TickInput {
            left: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &held, SIM_DT);
        }
        assert_eq!(state.swarm.move_timer, move_timer);
        assert_eq!(state.player.pos.x, player_x);
        assert!(state.player_shot.is_none());
        assert_eq!(state.time_ticks, 0);

        // Unpause
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_player_moves_and_is_clamped() {
        let mut state = GameState::new(1);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let x = state.player.pos.x;
        tick(&mut state, &right, SIM_DT);
        assert!((state.player.pos.x - (x + 5.0)).abs() < 1e-3);

        for _ in 0..200 {
            tick(&mut state, &right, SIM_DT);
        }
        assert_eq!(state.player.pos.x, FIELD_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_pointer_steers_by_field_half() {
        let mut state = GameState::new(1);
        let x = state.player.pos.x;
        let touch_left = TickInput {
            pointer: Some(Vec2::new(100.0, 500.0)),
            ..Default::default()
        };
        tick(&mut state, &touch_left, SIM_DT);
        assert!(state.player.pos.x < x);

        let x = state.player.pos.x;
        let touch_right = TickInput {
            pointer: Some(Vec2::new(700.0, 500.0)),
            ..Default::default()
        };
        tick(&mut state, &touch_right, SIM_DT);
        assert!(state.player.pos.x > x);
    }

    #[test]
    fn test_player_shot_flies_off_field() {
        let mut state = GameState::new(1);
        // Park the ship in a gap between shields, below an empty column
        state.player.pos.x = 40.0;
        assert!(fire_player_shot(&mut state));
        let idle = TickInput::default();
        for _ in 0..120 {
            tick(&mut state, &idle, SIM_DT);
        }
        assert!(state.player_shot.is_none());
        assert!(fire_player_shot(&mut state));
    }

    #[test]
    fn test_enemy_shot_leaves_bottom() {
        let mut state = GameState::new(1);
        let speed = state.tuning.enemy_shot_speed;
        state.enemy_shots.spawn(Projectile::enemy(Vec2::new(20.0, 590.0), speed));
        update_projectiles(&mut state, SIM_DT);
        assert_eq!(state.enemy_shots.active_count(), 1);
        update_projectiles(&mut state, 0.1);
        assert_eq!(state.enemy_shots.active_count(), 0);
    }

    #[test]
    fn test_explosions_expire() {
        let mut state = GameState::new(1);
        state.spawn_explosion(Vec2::ZERO, crate::sim::state::ExplosionKind::AlienKill);
        update_explosions(&mut state, 0.2);
        assert_eq!(state.explosions.active_count(), 1);
        update_explosions(&mut state, 0.2);
        assert_eq!(state.explosions.active_count(), 0);
    }

    #[test]
    fn test_death_explosion_then_respawn() {
        let mut state = GameState::new(1);
        state.player.pos.x = 10.0;
        state.player.explosion_timer = 0.05;
        let idle = TickInput::default();
        for _ in 0..4 {
            tick(&mut state, &idle, SIM_DT);
        }
        assert_eq!(state.player.lives, 2);
        assert!(!state.player.is_exploding());
        assert_eq!(state.player.pos, crate::player_spawn_position());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = GameState::new(1);
        state.player.lives = 1;
        state.player.explosion_timer = 0.01;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_zero_explosion_time_still_costs_lives() {
        let tuning = crate::Tuning {
            player_explosion_time: 0.0,
            starting_lives: 1,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        let speed = state.tuning.enemy_shot_speed;
        state.enemy_shots.spawn(Projectile::enemy(Vec2::new(390.0, 550.0), speed));

        let idle = TickInput::default();
        let mut frames = 0;
        while state.phase == GamePhase::Playing && frames < 120 {
            tick(&mut state, &idle, SIM_DT);
            frames += 1;
        }
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_swarm_landing_signals_player_destroyed() {
        let mut state = GameState::new(1);
        state.swarm.aliens[0].pos.y = state.player.pos.y - ALIEN_HEIGHT;
        check_swarm_landing(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        let destroyed = state
            .events
            .iter()
            .position(|e| *e == GameEvent::PlayerDestroyed);
        let over = state.events.iter().position(|e| *e == GameEvent::GameOver);
        assert!(destroyed.is_some());
        assert!(destroyed < over);
    }

    #[test]
    fn test_exploding_player_cannot_move_or_fire() {
        let mut state = GameState::new(1);
        state.player.explosion_timer = 1.0;
        let x = state.player.pos.x;
        let input = TickInput {
            left: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player.pos.x, x);
        assert!(state.player_shot.is_none());
    }

    #[test]
    fn test_win_waits_for_target() {
        let mut state = GameState::new(1);
        state.swarm.clear();
        let tuning = state.tuning.clone();
        state.target.spawn(&tuning, &mut state.rng);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.wave, 1);

        state.target.state = TargetState::Idle;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.wave, 2);
    }

    #[test]
    fn test_win_waits_for_player_explosion() {
        let mut state = GameState::new(1);
        state.swarm.clear();
        state.player.explosion_timer = 0.5;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.wave, 1);
    }

    #[test]
    fn test_next_wave_resets_field() {
        let mut state = GameState::new(1);
        let center = state.shields.shields[0].bounds.center();
        state.shields.damage(0, center);
        state.swarm.clear();
        state.player.pos.x = 0.0;
        let speed = state.tuning.enemy_shot_speed;
        state.enemy_shots.spawn(Projectile::enemy(Vec2::new(20.0, 300.0), speed));

        next_wave(&mut state);
        assert_eq!(state.wave, 2);
        assert_eq!(state.swarm.alive(), 55);
        assert!((state.swarm.move_wait - 0.8 / 1.2).abs() < 1e-6);
        assert_eq!(state.swarm.direction, 1.0);
        assert!(state.shields.test_opaque(0, center));
        assert_eq!(state.enemy_shots.active_count(), 0);
        assert_eq!(state.player.pos, crate::player_spawn_position());
        assert_eq!(state.target.state, TargetState::Idle);
        assert!(state.events.contains(&GameEvent::WaveCleared(2)));
    }

    #[test]
    fn test_swarm_contact_erodes_shield() {
        let mut state = GameState::new(1);
        let bounds = state.shields.shields[2].bounds;
        state.swarm.aliens[0].pos = Vec2::new(bounds.left() + 20.0, bounds.top() + 10.0);
        let before = state.shields.shields[2].mask.opaque_count(0);

        check_swarm_landing(&mut state);
        let after = state.shields.shields[2].mask.opaque_count(0);
        assert!(after < before);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = GameState::new(1);
        state.add_score(120);
        state.phase = GamePhase::GameOver;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.hi_score, 120);
        assert_eq!(state.player.lives, 3);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = GameState::new(7);
        let demo = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..60 * 20 {
            tick(&mut state, &demo, SIM_DT);
        }
        assert!(state.score > 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                left: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..300 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.swarm.alive(), state2.swarm.alive());
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.shields, state2.shields);
    }
}
