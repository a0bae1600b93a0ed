//! Gameplay constants.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! The particle values are defaults; `config::Tuning` can override them.

/// Minimum sparks spawned per combat hit.
pub const SPARK_COUNT_MIN: u32 = 6;
/// Maximum sparks spawned per combat hit.
pub const SPARK_COUNT_MAX: u32 = 7;

/// Spark velocity per axis is uniform in [-SPARK_SPEED, SPARK_SPEED].
pub const SPARK_SPEED: i32 = 3;

/// Minimum spark lifetime budget.
pub const SPARK_LIFETIME_MIN: i32 = 10;
/// Default maximum spark lifetime budget.
pub const SPARK_LIFETIME_MAX: i32 = 30;

/// Amount subtracted from both axis move counters each integrator tick.
pub const PARTICLE_DECAY: i32 = 1;

/// Camera pan step in pixels per pan intent.
pub const CAMERA_PAN_STEP: i32 = 32;

/// Player starting health.
pub const PLAYER_HP: i32 = 20;
/// Player melee damage.
pub const PLAYER_DAMAGE: i32 = 3;

/// Rat health and damage.
pub const RAT_HP: i32 = 5;
pub const RAT_DAMAGE: i32 = 1;

/// Slime health and damage.
pub const SLIME_HP: i32 = 8;
pub const SLIME_DAMAGE: i32 = 2;

/// Layering assigned to corpse sprites so the living draw over them.
pub const CORPSE_LAYERING: i32 = 2;

/// Tile ids consumed by the render collaborator. The core never interprets
/// these beyond passing them through sprites.
pub mod tile_ids {
    pub const FLOOR: u32 = 0;
    pub const WALL: u32 = 1;
    pub const PLAYER: u32 = 2;
    pub const RAT: u32 = 3;
    pub const SLIME: u32 = 4;
    pub const BONES: u32 = 5;
}
