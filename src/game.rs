//! Per-frame orchestration and the boundary contracts.
//!
//! One frame is one pass: turn-machine gate -> intent/AI displacement ->
//! resolver -> event drain -> particle integration -> conditional depth
//! sort -> render handoff. Nothing suspends mid-frame; the render call is a
//! blocking handoff that cannot mutate world state (it only sees shared
//! references).

use log::info;

use crate::camera::Camera;
use crate::config::Tuning;
use crate::events::EventQueue;
use crate::particles::{Particle, ParticleSystem};
use crate::pathfinding::{AStarPathfinder, Pathfinder};
use crate::systems;
use crate::turn::{TurnMachine, TurnState};
use crate::world::GameWorld;

/// Output of the input collaborator, already translated from platform
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Displacement request for the selected entity. Honored only in the
    /// `Player` turn state; each axis must be -1, 0, or 1 and not both zero.
    Move { dx: i32, dy: i32 },
    /// Camera offset delta, in pan steps.
    Pan { dx: i32, dy: i32 },
    ToggleDebug,
    Quit,
    /// No input this frame.
    Wait,
}

/// Everything the render collaborator gets to see. Shared references only -
/// drawing must not mutate game state.
pub struct RenderFrame<'a> {
    /// `world.active` is depth-sorted; draw it in order after `inert`.
    pub world: &'a GameWorld,
    pub particles: &'a [Particle],
    /// Camera offset in pixels.
    pub camera: (i32, i32),
    pub debug_overlay: bool,
}

/// Render collaborator contract, invoked once per frame after the sort.
pub trait Renderer {
    fn draw(&mut self, frame: &RenderFrame<'_>);
}

/// Renderer that draws nothing; used by tests and headless drivers.
#[derive(Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &RenderFrame<'_>) {}
}

/// What a frame did, for the driving loop and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameReport {
    pub quit: bool,
    pub player_acted: bool,
    pub any_moved: bool,
}

pub struct Game {
    pub world: GameWorld,
    pub particles: ParticleSystem,
    pub events: EventQueue,
    pub turn: TurnMachine,
    pub camera: Camera,
    pub tuning: Tuning,
    pub pathfinder: Box<dyn Pathfinder>,
    pub debug_overlay: bool,
}

impl Game {
    pub fn new(world: GameWorld, tuning: Tuning) -> Self {
        Self {
            world,
            particles: ParticleSystem::new(),
            events: EventQueue::new(),
            turn: TurnMachine::new(),
            camera: Camera::new(),
            tuning,
            pathfinder: Box::new(AStarPathfinder),
            debug_overlay: false,
        }
    }

    /// Advance the simulation one frame and hand the result to the
    /// renderer.
    pub fn frame(&mut self, intent: Intent, renderer: &mut dyn Renderer) -> FrameReport {
        puffin::profile_function!();

        let mut rng = rand::thread_rng();
        let mut report = FrameReport::default();

        match intent {
            Intent::Quit => {
                info!("quit requested");
                report.quit = true;
            }
            Intent::Pan { dx, dy } => self.camera.pan(dx, dy),
            Intent::ToggleDebug => self.debug_overlay = !self.debug_overlay,
            Intent::Move { dx, dy } if self.turn.state == TurnState::Player => {
                debug_assert!(
                    dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0),
                    "move intent out of range: ({dx}, {dy})"
                );
                // Contract violation, not a recoverable state: input must
                // never arrive before map generation selects an entity.
                let selected = self
                    .world
                    .selected
                    .expect("move intent arrived with no selected entity");
                if let Ok(mut pending) = self
                    .world
                    .ecs
                    .get::<&mut crate::components::PendingMove>(selected)
                {
                    pending.dx = dx;
                    pending.dy = dy;
                }
            }
            // Displacement requests outside the player's turn are dropped.
            Intent::Move { .. } | Intent::Wait => {}
        }

        if self.turn.state == TurnState::Enemy {
            systems::take_enemy_turns(&mut self.world, self.pathfinder.as_ref(), &mut rng);
        }

        let resolution = systems::resolve_moves(&mut self.world, &mut self.events);
        report.player_acted = resolution.player_acted;
        report.any_moved = resolution.any_moved;

        let drained: Vec<_> = self.events.drain().collect();
        for event in &drained {
            self.particles.handle_event(event, &self.tuning, &mut rng);
        }

        self.particles.update();

        if resolution.any_moved {
            systems::depth_sort(&mut self.world);
        }

        self.turn.advance(resolution.player_acted);

        renderer.draw(&RenderFrame {
            world: &self.world,
            particles: &self.particles.particles,
            camera: self.camera.offset(),
            debug_overlay: self.debug_overlay,
        });

        report
    }
}
