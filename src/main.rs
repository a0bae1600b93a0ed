//! Headless demo driver.
//!
//! Generates a small room, walks the player through a scripted intent
//! sequence, and logs what the renderer would draw. Useful for smoke-testing
//! the simulation without a display.

use gridrogue::components::{Name, Position};
use gridrogue::game::{Game, Intent, RenderFrame, Renderer};
use gridrogue::mapgen::{self, actors};
use gridrogue::Tuning;

use log::{info, warn};

/// Renderer that logs the frame contents instead of drawing.
struct LogRenderer {
    frame_count: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &RenderFrame<'_>) {
        self.frame_count += 1;
        info!(
            "frame {}: {} active, {} inert, {} particles, camera {:?}",
            self.frame_count,
            frame.world.active.len(),
            frame.world.inert.len(),
            frame.particles.len(),
            frame.camera,
        );
        if frame.debug_overlay {
            for &entity in &frame.world.active {
                let name = frame
                    .world
                    .ecs
                    .get::<&Name>(entity)
                    .map(|n| n.0.clone())
                    .unwrap_or_default();
                let pos = frame
                    .world
                    .ecs
                    .get::<&Position>(entity)
                    .map(|p| (p.x, p.y))
                    .unwrap_or((0, 0));
                info!("  {name} at {pos:?}");
            }
        }
    }
}

fn load_tuning() -> Tuning {
    match std::fs::read_to_string("tuning.json") {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(tuning) => {
                info!("loaded tuning.json");
                tuning
            }
            Err(err) => {
                warn!("tuning.json is invalid ({err}), using defaults");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    }
}

fn main() {
    env_logger::init();

    let mut world = mapgen::generate_empty_room(10, 10);
    let mut rng = rand::thread_rng();
    mapgen::spawn_enemies(&mut world, &actors::RAT, 2, &mut rng);
    mapgen::spawn_enemies(&mut world, &actors::SLIME, 1, &mut rng);

    let mut game = Game::new(world, load_tuning());
    let mut renderer = LogRenderer { frame_count: 0 };

    // Scripted session: wander the room, pan the camera, peek at the debug
    // overlay, then quit. Wait frames let enemy and thinking turns run.
    let script = [
        Intent::ToggleDebug,
        Intent::Move { dx: 1, dy: 0 },
        Intent::Wait,
        Intent::Wait,
        Intent::Move { dx: 0, dy: 1 },
        Intent::Wait,
        Intent::Wait,
        Intent::Pan { dx: 1, dy: 0 },
        Intent::Move { dx: 1, dy: 1 },
        Intent::Wait,
        Intent::Wait,
        Intent::Quit,
    ];

    for intent in script {
        let report = game.frame(intent, &mut renderer);
        if report.quit {
            break;
        }
    }

    info!("demo finished after {} frames", renderer.frame_count);
}
