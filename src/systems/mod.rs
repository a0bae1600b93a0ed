//! Game systems, each running to completion within a frame:
//! - `resolver`: pending-displacement consumption, movement-as-attack
//! - `ai`: persona displacement selection
//! - `depth`: render-order sort of the active registry

pub mod ai;
pub mod depth;
pub mod resolver;

pub use ai::take_enemy_turns;
pub use depth::depth_sort;
pub use resolver::{resolve_moves, Resolution};
