//! Render-order sort for the active registry.
//!
//! Entities further down the screen draw in front of entities above them
//! for a false-3D effect; `layering` is the manual override (corpses get a
//! high layering so the living draw over them on the same row).

use std::cmp::Reverse;

use crate::components::{Position, Sprite};
use crate::world::GameWorld;

/// Reorder `active` by descending `layering - y`.
///
/// Stable: ties keep registry order, which makes the sort deterministic and
/// idempotent. Entities without a Sprite sort with layering 0. Only called
/// on frames where something moved.
pub fn depth_sort(world: &mut GameWorld) {
    puffin::profile_function!();

    let mut keyed: Vec<(i32, hecs::Entity)> = world
        .active
        .iter()
        .map(|&entity| {
            let layering = world
                .ecs
                .get::<&Sprite>(entity)
                .map(|s| s.layering)
                .unwrap_or(0);
            let y = world
                .ecs
                .get::<&Position>(entity)
                .map(|p| p.y)
                .unwrap_or(0);
            (layering - y, entity)
        })
        .collect();

    keyed.sort_by_key(|&(key, _)| Reverse(key));
    world.active = keyed.into_iter().map(|(_, entity)| entity).collect();
}
