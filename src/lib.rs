//! Turn-based roguelike core: entities on a grid, movement-as-attack
//! combat, a spark particle simulation, and a strict player/enemy turn
//! gate.
//!
//! The crate owns the simulation only. Rendering, input mapping, and
//! window setup are external collaborators behind the [`game::Renderer`]
//! trait and [`game::Intent`] enum; pathfinding sits behind
//! [`pathfinding::Pathfinder`] with a default A* shipped.

pub mod camera;
pub mod components;
pub mod config;
pub mod constants;
pub mod events;
pub mod game;
pub mod mapgen;
pub mod particles;
pub mod pathfinding;
pub mod systems;
pub mod turn;
pub mod world;

pub use config::Tuning;
pub use game::{FrameReport, Game, Intent, NullRenderer, RenderFrame, Renderer};
pub use world::GameWorld;
