//! Enemy swarm: lockstep movement and the shooting scheduler
//!
//! The grid is passive between steps. A single move timer gates each
//! lockstep step, which is either a horizontal shift or (at a field edge)
//! a vertical drop that also reverses direction. Shooting runs on its own
//! timer, independent of movement.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::SlotPool;
use super::rect::Rect;
use super::state::{GameEvent, Projectile};
use crate::consts::*;
use crate::tuning::Tuning;

/// Alien rank in the grid; decides point value and sprite set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlienTier {
    #[default]
    Bottom,
    Middle,
    Top,
}

impl AlienTier {
    pub fn points(self) -> u32 {
        match self {
            AlienTier::Bottom => 10,
            AlienTier::Middle => 20,
            AlienTier::Top => 30,
        }
    }

    /// Tier for a grid row (row 0 is the top of the swarm)
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AlienTier::Top,
            1 | 2 => AlienTier::Middle,
            _ => AlienTier::Bottom,
        }
    }
}

/// One cell of the enemy grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Alien {
    pub pos: Vec2,
    /// Position at wave start
    pub base_pos: Vec2,
    pub tier: AlienTier,
    /// Owned by [`Swarm`]; flip it via [`Swarm::kill`], never directly
    pub active: bool,
    /// Animation frame toggle (false = first frame)
    pub frame: bool,
}

impl Alien {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT))
    }
}

/// Outcome of one lockstep step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmStep {
    Shifted,
    Dropped,
}

/// The enemy grid plus its movement and shooting timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swarm {
    pub rows: usize,
    pub cols: usize,
    /// Row-major grid, `rows * cols` cells
    ///
    /// Positions may be edited freely; deactivate cells only through
    /// [`Swarm::kill`] or [`Swarm::clear`] so [`Swarm::alive`] stays in sync.
    pub aliens: Vec<Alien>,
    alive: usize,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub move_timer: f32,
    pub move_wait: f32,
    pub shoot_timer: f32,
    /// Rotating 0..=3 index for the marching cue
    pub step_index: u8,
}

impl Swarm {
    /// Fresh, fully populated grid for the given wave (1-based)
    pub fn new(tuning: &Tuning, wave: u32, rng: &mut impl Rng) -> Self {
        let mut swarm = Self {
            rows: tuning.swarm_rows,
            cols: tuning.swarm_cols,
            aliens: Vec::new(),
            alive: 0,
            direction: 1.0,
            move_timer: 0.0,
            move_wait: 0.0,
            shoot_timer: 0.0,
            step_index: 0,
        };
        swarm.reset(tuning, wave, rng);
        swarm
    }

    /// Repopulate the grid and restart all timers for a wave
    pub fn reset(&mut self, tuning: &Tuning, wave: u32, rng: &mut impl Rng) {
        self.rows = tuning.swarm_rows;
        self.cols = tuning.swarm_cols;
        self.aliens.clear();
        self.aliens.reserve(self.rows * self.cols);

        for row in 0..self.rows {
            for col in 0..self.cols {
                let base_pos = tuning.swarm_origin
                    + Vec2::new(col as f32, row as f32) * tuning.swarm_spacing;
                self.aliens.push(Alien {
                    pos: base_pos,
                    base_pos,
                    tier: AlienTier::for_row(row),
                    active: true,
                    frame: false,
                });
            }
        }
        self.alive = self.aliens.len();

        self.move_wait = tuning.move_wait_for_wave(wave);
        self.move_timer = self.move_wait;
        self.direction = 1.0;
        self.step_index = 0;
        self.shoot_timer = rng.random_range(tuning.shoot_interval_min..=tuning.shoot_interval_max);
    }

    /// Number of active aliens
    #[inline]
    pub fn alive(&self) -> usize {
        self.alive
    }

    pub fn is_depleted(&self) -> bool {
        self.alive == 0
    }

    pub fn active(&self) -> impl Iterator<Item = (usize, &Alien)> {
        self.aliens.iter().enumerate().filter(|(_, a)| a.active)
    }

    /// Leftmost and rightmost world x covered by active aliens
    pub fn extent(&self) -> Option<(f32, f32)> {
        self.active().fold(None, |acc, (_, a)| {
            let r = a.rect();
            Some(match acc {
                None => (r.left(), r.right()),
                Some((l, rt)) => (l.min(r.left()), rt.max(r.right())),
            })
        })
    }

    /// Deactivate an alien and speed up the swarm; returns its tier if it was alive
    pub fn kill(&mut self, index: usize, tuning: &Tuning) -> Option<AlienTier> {
        let alien = self.aliens.get_mut(index).filter(|a| a.active)?;
        alien.active = false;
        let tier = alien.tier;
        self.alive -= 1;
        self.move_wait = (self.move_wait * tuning.move_speedup_factor).max(tuning.move_wait_min);
        Some(tier)
    }

    /// Deactivate every alien at once, leaving the grid depleted
    pub fn clear(&mut self) {
        for alien in &mut self.aliens {
            alien.active = false;
        }
        self.alive = 0;
    }

    /// Advance both timers; moves and fires when they expire
    pub fn update(
        &mut self,
        dt: f32,
        tuning: &Tuning,
        rng: &mut impl Rng,
        shots: &mut SlotPool<Projectile>,
        events: &mut Vec<GameEvent>,
    ) {
        self.move_timer -= dt;
        if self.move_timer <= 0.0 {
            self.step(tuning);
            events.push(GameEvent::SwarmStep(self.step_index));
            self.step_index = (self.step_index + 1) % 4;
            self.move_timer = self.move_wait;
        }

        self.shoot_timer -= dt;
        if self.shoot_timer <= 0.0 && self.alive > 0 {
            self.fire(tuning, rng, shots);
            self.shoot_timer = self.next_shoot_interval(tuning, rng);
        }
    }

    /// Perform one lockstep move: shift sideways, or drop and reverse at an edge
    pub fn step(&mut self, tuning: &Tuning) -> SwarmStep {
        let dx = tuning.swarm_step * self.direction;
        let at_edge = match self.extent() {
            Some((left, right)) => {
                (self.direction > 0.0 && right + dx > FIELD_WIDTH)
                    || (self.direction < 0.0 && left + dx < 0.0)
            }
            None => false,
        };

        if at_edge {
            self.direction = -self.direction;
        }

        for alien in self.aliens.iter_mut().filter(|a| a.active) {
            if at_edge {
                alien.pos.y += tuning.swarm_drop;
            } else {
                alien.pos.x += dx;
            }
            alien.frame = !alien.frame;
        }

        if at_edge {
            SwarmStep::Dropped
        } else {
            SwarmStep::Shifted
        }
    }

    /// Pick a random live alien and drop a projectile below it
    ///
    /// Returns the shooter's index. Gives up after one attempt per grid cell,
    /// and a full projectile pool silently swallows the shot.
    pub fn fire(
        &mut self,
        tuning: &Tuning,
        rng: &mut impl Rng,
        shots: &mut SlotPool<Projectile>,
    ) -> Option<usize> {
        let cells = self.aliens.len();
        if cells == 0 {
            return None;
        }

        let shooter = (0..cells)
            .map(|_| rng.random_range(0..cells))
            .find(|&i| self.aliens[i].active)?;

        let rect = self.aliens[shooter].rect();
        let pos = Vec2::new(rect.center().x - ENEMY_SHOT_WIDTH / 2.0, rect.bottom());
        if shots
            .spawn(Projectile::enemy(pos, tuning.enemy_shot_speed))
            .is_none()
        {
            log::debug!("Enemy projectile pool full, shot dropped");
        }
        Some(shooter)
    }

    /// Random shot delay, shrinking toward half as the swarm thins out
    pub fn next_shoot_interval(&self, tuning: &Tuning, rng: &mut impl Rng) -> f32 {
        let total = self.aliens.len().max(1) as f32;
        let multiplier = (self.alive as f32 / total) * 0.5 + 0.5;
        let base = rng.random_range(tuning.shoot_interval_min..=tuning.shoot_interval_max);
        (base * multiplier).max(tuning.shoot_interval_floor)
    }
}
