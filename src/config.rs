//! Runtime tuning overrides.
//!
//! All values default to `constants`; a driver may deserialize a `Tuning`
//! from JSON to adjust particle behavior without recompiling.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Particle and combat-feedback tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Sparks spawned per combat hit, inclusive range.
    pub spark_count_min: u32,
    pub spark_count_max: u32,
    /// Per-axis spark velocity is uniform in [-spark_speed, spark_speed].
    pub spark_speed: i32,
    /// Spark lifetime budget, inclusive range.
    pub spark_lifetime_min: i32,
    pub spark_lifetime_max: i32,
    /// Subtracted from both axis move counters each integrator tick.
    pub particle_decay: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spark_count_min: SPARK_COUNT_MIN,
            spark_count_max: SPARK_COUNT_MAX,
            spark_speed: SPARK_SPEED,
            spark_lifetime_min: SPARK_LIFETIME_MIN,
            spark_lifetime_max: SPARK_LIFETIME_MAX,
            particle_decay: PARTICLE_DECAY,
        }
    }
}
