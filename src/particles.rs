//! Short-lived visual effect points with their own lifecycle.
//!
//! Particles are spawned by combat events, integrated once per frame, and
//! pruned without ever touching entity state. The render collaborator draws
//! whatever is currently alive.

use glam::Vec2;
use rand::Rng;

use crate::config::Tuning;
use crate::events::GameEvent;

/// A transient effect point.
///
/// Velocity is integer cells; position keeps sub-cell precision so the
/// renderer can place sparks between grid cells. Each axis carries a
/// "ticks until next move" counter for sub-frame-rate pacing.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vx: i32,
    pub vy: i32,
    tick_x: i32,
    tick_y: i32,
    decay: i32,
    /// Remaining budget, drained by Manhattan speed each tick.
    pub lifetime: i32,
}

impl Particle {
    pub fn new(pos: Vec2, vx: i32, vy: i32, lifetime: i32, decay: i32) -> Self {
        Self {
            pos,
            vx,
            vy,
            tick_x: 0,
            tick_y: 0,
            decay,
            lifetime,
        }
    }

    /// Combined axis speed; a particle at 0 is fully decayed.
    pub fn speed(&self) -> i32 {
        self.vx.abs() + self.vy.abs()
    }

    /// Advance one tick. Returns false once the particle should be pruned.
    ///
    /// The counter is reset to the raw velocity value after a step. That is
    /// the original pacing rule, kept verbatim: it does not throttle speed
    /// linearly (a negative velocity leaves the counter negative, so that
    /// axis steps every tick). Do not "fix" this without changing the rule.
    pub fn update(&mut self) -> bool {
        if self.tick_x <= 0 {
            self.pos.x += self.vx as f32;
            self.tick_x = self.vx;
        }
        if self.tick_y <= 0 {
            self.pos.y += self.vy as f32;
            self.tick_y = self.vy;
        }
        self.tick_x -= self.decay;
        self.tick_y -= self.decay;
        self.lifetime -= self.speed();

        self.lifetime >= 0 && self.speed() != 0
    }
}

/// Manager for all live particles.
#[derive(Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    /// Spawn a burst of hit sparks at a grid cell.
    pub fn spawn_sparks(&mut self, x: i32, y: i32, tuning: &Tuning, rng: &mut impl Rng) {
        let count = rng.gen_range(tuning.spark_count_min..=tuning.spark_count_max);
        for _ in 0..count {
            let vx = rng.gen_range(-tuning.spark_speed..=tuning.spark_speed);
            let vy = rng.gen_range(-tuning.spark_speed..=tuning.spark_speed);
            let lifetime = rng.gen_range(tuning.spark_lifetime_min..=tuning.spark_lifetime_max);
            self.particles.push(Particle::new(
                Vec2::new(x as f32, y as f32),
                vx,
                vy,
                lifetime,
                tuning.particle_decay,
            ));
        }
    }

    /// Advance every particle one tick, pruning expired ones.
    pub fn update(&mut self) {
        puffin::profile_function!();
        self.particles.retain_mut(|p| p.update());
    }

    /// React to a resolution event, spawning feedback where appropriate.
    pub fn handle_event(&mut self, event: &GameEvent, tuning: &Tuning, rng: &mut impl Rng) {
        match event {
            GameEvent::AttackHit { target_pos, .. } => {
                self.spawn_sparks(target_pos.0, target_pos.1, tuning, rng);
            }
            GameEvent::EntityDied { .. } | GameEvent::EntityMoved { .. } => {}
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
