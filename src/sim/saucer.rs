//! Bonus flying target
//!
//! Cycle: Idle (spawn countdown) -> Traveling -> Exploding -> Idle. A target
//! that crosses the field without being hit goes straight back to Idle.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::GameEvent;
use crate::consts::*;
use crate::tuning::Tuning;

/// Bonus target sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetState {
    #[default]
    Idle,
    Traveling,
    Exploding,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BonusTarget {
    pub pos: Vec2,
    /// Signed horizontal speed (px/s), toward the exit edge
    pub speed: f32,
    pub state: TargetState,
    /// Countdown to the next spawn while idle
    pub spawn_timer: f32,
    /// Remaining explosion time while exploding
    pub explosion_timer: f32,
    /// Time spent traveling, paces the presence cue
    pub time_active: f32,
}

impl BonusTarget {
    pub fn new(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let mut target = Self::default();
        target.reschedule(tuning, rng);
        target
    }

    /// Traveling or exploding
    pub fn is_active(&self) -> bool {
        self.state != TargetState::Idle
    }

    /// Can be hit by the player's shot
    pub fn is_hittable(&self) -> bool {
        self.state == TargetState::Traveling
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::new(TARGET_WIDTH, TARGET_HEIGHT))
    }

    /// Go idle and draw a fresh spawn delay
    pub fn reschedule(&mut self, tuning: &Tuning, rng: &mut impl Rng) {
        self.state = TargetState::Idle;
        self.explosion_timer = 0.0;
        self.spawn_timer = rng.random_range(tuning.target_spawn_min..=tuning.target_spawn_max);
    }

    /// Enter from a random side, heading for the opposite edge
    pub fn spawn(&mut self, tuning: &Tuning, rng: &mut impl Rng) {
        self.state = TargetState::Traveling;
        self.explosion_timer = 0.0;
        self.time_active = 0.0;

        if rng.random_bool(0.5) {
            self.pos = Vec2::new(-TARGET_WIDTH, tuning.target_y);
            self.speed = tuning.target_speed;
        } else {
            self.pos = Vec2::new(FIELD_WIDTH, tuning.target_y);
            self.speed = -tuning.target_speed;
        }
        log::debug!("Bonus target spawned at x={} heading {}", self.pos.x, self.speed);
    }

    /// Register a hit; returns the bonus awarded if the target was hittable
    pub fn hit(&mut self, tuning: &Tuning) -> Option<u32> {
        if !self.is_hittable() {
            return None;
        }
        self.state = TargetState::Exploding;
        self.explosion_timer = tuning.target_explosion_time;
        Some(tuning.target_points)
    }

    /// Whether the target has fully left the field on its exit side
    fn has_exited(&self) -> bool {
        let r = self.rect();
        (self.speed > 0.0 && r.left() > FIELD_WIDTH) || (self.speed < 0.0 && r.right() < 0.0)
    }

    pub fn update(
        &mut self,
        dt: f32,
        tuning: &Tuning,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        match self.state {
            TargetState::Idle => {
                self.spawn_timer -= dt;
                if self.spawn_timer <= 0.0 {
                    self.spawn(tuning, rng);
                    events.push(GameEvent::TargetSpawned);
                }
            }
            TargetState::Traveling => {
                self.pos.x += self.speed * dt;
                let previous = self.time_active;
                self.time_active += dt;

                // One cue per period boundary crossed
                let period = tuning.target_cue_period;
                if (self.time_active / period).floor() > (previous / period).floor() {
                    events.push(GameEvent::TargetHum);
                }

                if self.has_exited() {
                    self.reschedule(tuning, rng);
                    events.push(GameEvent::TargetLeft);
                }
            }
            TargetState::Exploding => {
                self.explosion_timer -= dt;
                if self.explosion_timer <= 0.0 {
                    self.reschedule(tuning, rng);
                }
            }
        }
    }
}
