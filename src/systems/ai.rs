//! AI decision-making for persona-carrying entities.
//!
//! Runs once per enemy turn. Each persona only *requests* a displacement;
//! the resolver decides whether it becomes a move or an attack.

use hecs::Entity;
use log::debug;
use rand::Rng;

use crate::components::{BlocksPath, PendingMove, Persona, Position};
use crate::pathfinding::{ObstructionGrid, Pathfinder};
use crate::world::GameWorld;

/// Pick a displacement for every active entity carrying a persona.
pub fn take_enemy_turns(world: &mut GameWorld, pathfinder: &dyn Pathfinder, rng: &mut impl Rng) {
    puffin::profile_function!();

    let snapshot: Vec<Entity> = world.active.clone();
    for entity in snapshot {
        let Some(persona) = world.ecs.get::<&Persona>(entity).ok().map(|p| *p) else {
            continue;
        };
        let (dx, dy) = match persona {
            Persona::Random => random_step(rng),
            Persona::DumbAttack => chase_step(world, entity, pathfinder),
        };
        if let Ok(mut pending) = world.ecs.get::<&mut PendingMove>(entity) {
            pending.dx = dx;
            pending.dy = dy;
        }
    }
}

/// Coin-flip an axis and wander along it. Never diagonal.
fn random_step(rng: &mut impl Rng) -> (i32, i32) {
    let step = rng.gen_range(-1..=1);
    if rng.gen_bool(0.5) {
        (step, 0)
    } else {
        (0, step)
    }
}

/// Step along a path toward the selected entity.
///
/// No selected entity or no path means the entity stays put this turn -
/// pathfinding failure is recoverable, not fatal.
fn chase_step(world: &GameWorld, entity: Entity, pathfinder: &dyn Pathfinder) -> (i32, i32) {
    let Some(start) = world.position_of(entity) else {
        return (0, 0);
    };
    let Some(goal) = world.selected.and_then(|s| world.position_of(s)) else {
        return (0, 0);
    };

    let grid = obstruction_grid(world, entity);
    match pathfinder.find_path(start, goal, &grid) {
        Some(path) => match path.first() {
            Some(&(nx, ny)) => (nx - start.0, ny - start.1),
            None => (0, 0), // already at the goal
        },
        None => {
            debug!("ai: {:?} found no path from {:?} to {:?}", entity, start, goal);
            (0, 0)
        }
    }
}

/// Collect every blocking entity except the mover into a grid over the map
/// bounds.
fn obstruction_grid(world: &GameWorld, exclude: Entity) -> ObstructionGrid {
    let mut grid = ObstructionGrid::new(world.width, world.height);
    for (id, (pos, _)) in world.ecs.query::<(&Position, &BlocksPath)>().iter() {
        if id != exclude {
            grid.block(pos.x, pos.y);
        }
    }
    grid
}
