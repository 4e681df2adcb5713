//! Per-frame collision resolution
//!
//! Runs once per frame after every controller has moved. Priority order is
//! load-bearing: a player shot resolves against aliens, then the bonus
//! target, then shields, and stops at the first hit. Enemy projectiles are
//! tested against the player (one hit per frame) and then, independently,
//! against shields.

use glam::Vec2;

use super::rect::Rect;
use super::state::{ExplosionKind, GameEvent, GameState};

/// What the player shot hit this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Alien at this grid index destroyed
    Alien(usize),
    Target,
    /// Stopped by the shield at this index
    Shield(usize),
}

/// Summary of everything resolved in one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub player_shot: Option<ShotOutcome>,
    /// Enemy projectile slot that hit the player
    pub player_hit_by: Option<usize>,
    /// (projectile slot, shield index) for every enemy projectile stopped by a shield
    pub shield_blocks: Vec<(usize, usize)>,
}

/// Resolve every collision for the current frame
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let player_shot = resolve_player_shot(state);

    // The shield pass sees every projectile that was in flight at the start
    // of enemy resolution, including one that just hit the player.
    let in_flight: Vec<(usize, Rect, Vec2)> = state
        .enemy_shots
        .iter_active()
        .map(|(i, shot)| (i, shot.rect(), shot.leading_edge()))
        .collect();

    let player_hit_by = resolve_enemy_shots_vs_player(state);
    let shield_blocks = resolve_enemy_shots_vs_shields(state, &in_flight);

    CollisionReport {
        player_shot,
        player_hit_by,
        shield_blocks,
    }
}

/// Player shot chain: aliens, then bonus target, then shields; first hit wins
fn resolve_player_shot(state: &mut GameState) -> Option<ShotOutcome> {
    let shot = state.player_shot?;
    let shot_rect = shot.rect();

    // 1. Aliens
    let hit_alien = state
        .swarm
        .active()
        .find(|(_, alien)| shot_rect.intersects(&alien.rect()))
        .map(|(i, alien)| (i, alien.rect().center()));

    if let Some((index, center)) = hit_alien {
        state.player_shot = None;
        if let Some(tier) = state.swarm.kill(index, &state.tuning) {
            state.add_score(tier.points());
            log::debug!(
                "Alien {index} ({tier:?}) destroyed, {} left",
                state.swarm.alive()
            );
        }
        state.spawn_explosion(center, ExplosionKind::AlienKill);
        state.events.push(GameEvent::AlienKilled);
        return Some(ShotOutcome::Alien(index));
    }

    // 2. Bonus target
    if state.target.is_hittable() && shot_rect.intersects(&state.target.rect()) {
        state.player_shot = None;
        if let Some(points) = state.target.hit(&state.tuning) {
            state.add_score(points);
            log::debug!("Bonus target destroyed for {points} points");
        }
        state.events.push(GameEvent::TargetDestroyed);
        return Some(ShotOutcome::Target);
    }

    // 3. Shields, sampled at the shot's leading (top) edge
    let contact = shot.leading_edge();
    let index = state.shields.first_hit(&shot_rect, contact)?;
    state.player_shot = None;
    state.shields.damage(index, contact);
    state.spawn_explosion(contact, ExplosionKind::PlayerShotImpact);
    Some(ShotOutcome::Shield(index))
}

/// Enemy projectiles vs player; only the first intersecting projectile counts
fn resolve_enemy_shots_vs_player(state: &mut GameState) -> Option<usize> {
    if state.player.is_exploding() {
        return None;
    }
    let player_rect = state.player.rect();

    let slot = state
        .enemy_shots
        .iter_active()
        .find(|(_, shot)| shot.rect().intersects(&player_rect))
        .map(|(i, _)| i)?;

    state.enemy_shots.release(slot);
    state.player.explosion_timer = state.tuning.player_explosion_time;
    state.events.push(GameEvent::PlayerDestroyed);
    log::debug!("Player hit by enemy projectile {slot}");
    Some(slot)
}

/// Enemy projectiles vs shields; each projectile stops at the first opaque shield
fn resolve_enemy_shots_vs_shields(
    state: &mut GameState,
    in_flight: &[(usize, Rect, Vec2)],
) -> Vec<(usize, usize)> {
    let mut blocks = Vec::new();
    for &(slot, rect, contact) in in_flight {
        if let Some(index) = state.shields.first_hit(&rect, contact) {
            state.enemy_shots.release(slot);
            state.shields.damage(index, contact);
            state.spawn_explosion(contact, ExplosionKind::EnemyShotImpact);
            blocks.push((slot, index));
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::saucer::TargetState;
    use crate::sim::state::Projectile;

    fn player_shot_at(x: f32, y: f32) -> Projectile {
        Projectile {
            pos: Vec2::new(x, y),
            size: Vec2::new(3.0, 12.0),
            speed: -420.0,
        }
    }

    fn park_target(state: &mut GameState, x: f32) {
        let tuning = state.tuning.clone();
        state.target.spawn(&tuning, &mut state.rng);
        state.target.pos = Vec2::new(x, 50.0);
    }

    #[test]
    fn test_shot_kills_alien() {
        let mut state = GameState::new(1);
        let wait = state.swarm.move_wait;
        // Bottom-right alien sits at (530, 220)
        state.player_shot = Some(player_shot_at(545.0, 230.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_shot, Some(ShotOutcome::Alien(54)));
        assert!(state.player_shot.is_none());
        assert!(!state.swarm.aliens[54].active);
        assert_eq!(state.swarm.alive(), 54);
        assert_eq!(state.score, 10);
        assert!(state.swarm.move_wait < wait);
        assert_eq!(state.explosions.active_count(), 1);
        assert!(state.events.contains(&GameEvent::AlienKilled));
    }

    #[test]
    fn test_only_first_alien_is_hit() {
        let mut state = GameState::new(1);
        // Stack two aliens under the same shot
        state.swarm.aliens[1].pos = state.swarm.aliens[0].pos;
        state.player_shot = Some(player_shot_at(90.0, 85.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_shot, Some(ShotOutcome::Alien(0)));
        assert!(state.swarm.aliens[1].active);
        assert_eq!(state.swarm.alive(), 54);
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_alien_has_priority_over_target() {
        let mut state = GameState::new(1);
        park_target(&mut state, 300.0);
        state.swarm.aliens[0].pos = Vec2::new(300.0, 50.0);
        state.player_shot = Some(player_shot_at(310.0, 55.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_shot, Some(ShotOutcome::Alien(0)));
        assert_eq!(state.target.state, TargetState::Traveling);
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_shot_destroys_target() {
        let mut state = GameState::new(1);
        park_target(&mut state, 300.0);
        state.player_shot = Some(player_shot_at(310.0, 55.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_shot, Some(ShotOutcome::Target));
        assert_eq!(state.target.state, TargetState::Exploding);
        assert_eq!(state.score, 200);
        assert!(state.events.contains(&GameEvent::TargetDestroyed));

        // An exploding target no longer stops shots
        state.player_shot = Some(player_shot_at(310.0, 55.0));
        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_shot, None);
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_shot_damages_shield() {
        let mut state = GameState::new(1);
        state.player_shot = Some(player_shot_at(130.0, 500.0));
        let contact = Vec2::new(131.5, 500.0);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_shot, Some(ShotOutcome::Shield(0)));
        assert!(state.player_shot.is_none());
        assert!(!state.shields.test_opaque(0, contact));
        let (_, explosion) = state.explosions.iter_active().next().unwrap();
        assert_eq!(explosion.kind, ExplosionKind::PlayerShotImpact);
    }

    #[test]
    fn test_shot_passes_through_hole() {
        let mut state = GameState::new(1);
        let contact = Vec2::new(131.5, 500.0);
        state.shields.damage(0, contact);
        state.player_shot = Some(player_shot_at(130.0, 500.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_shot, None);
        assert!(state.player_shot.is_some());
    }

    #[test]
    fn test_player_takes_one_hit_per_frame() {
        let mut state = GameState::new(1);
        let speed = state.tuning.enemy_shot_speed;
        state.enemy_shots.spawn(Projectile::enemy(Vec2::new(390.0, 550.0), speed));
        state.enemy_shots.spawn(Projectile::enemy(Vec2::new(400.0, 550.0), speed));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_hit_by, Some(0));
        assert!(state.player.is_exploding());
        assert_eq!(state.enemy_shots.active_count(), 1);
        assert!(state.enemy_shots.get(1).is_some());
        assert!(state.events.contains(&GameEvent::PlayerDestroyed));
    }

    #[test]
    fn test_exploding_player_is_not_hit() {
        let mut state = GameState::new(1);
        state.player.explosion_timer = 0.5;
        let speed = state.tuning.enemy_shot_speed;
        state.enemy_shots.spawn(Projectile::enemy(Vec2::new(390.0, 550.0), speed));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_hit_by, None);
        assert_eq!(state.enemy_shots.active_count(), 1);
        assert_eq!(state.player.explosion_timer, 0.5);
    }

    #[test]
    fn test_enemy_shot_stopped_by_shield() {
        let mut state = GameState::new(1);
        let speed = state.tuning.enemy_shot_speed;
        // Bottom edge lands inside the top of shield 1
        let shield = state.shields.shields[1].bounds;
        let x = shield.center().x - 4.5;
        state.enemy_shots.spawn(Projectile::enemy(Vec2::new(x, 470.0), speed));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.shield_blocks, vec![(0, 1)]);
        assert_eq!(state.enemy_shots.active_count(), 0);
        assert!(!state.shields.test_opaque(1, Vec2::new(shield.center().x, 491.0)));
        let (_, explosion) = state.explosions.iter_active().next().unwrap();
        assert_eq!(explosion.kind, ExplosionKind::EnemyShotImpact);
    }

    #[test]
    fn test_projectile_hitting_player_still_damages_shield() {
        let mut state = GameState::new(1);
        let speed = state.tuning.enemy_shot_speed;
        // Park the ship under shield 0 so one projectile overlaps both
        state.player.pos.x = 100.0;
        state.enemy_shots.spawn(Projectile::enemy(Vec2::new(110.0, 536.0), speed));
        let before = state.shields.shields[0].mask.opaque_count(0);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_hit_by, Some(0));
        assert_eq!(report.shield_blocks, vec![(0, 0)]);
        assert!(state.shields.shields[0].mask.opaque_count(0) < before);
        assert_eq!(state.enemy_shots.active_count(), 0);
    }
}
