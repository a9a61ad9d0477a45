//! Pong Sim headless demo
//!
//! Plays a seeded computer-vs-computer match and logs what happens. Run with
//! `RUST_LOG=info` to see the rally log.
//!
//! Usage: `pong-sim [config.json] [seed]`

use glam::Vec2;

use pong_sim::{SimConfig, SimError};
use pong_sim::consts::SIM_DT;
use pong_sim::sim::{BoxShape, ContactEvent, EdgeShape, GameEvent, Side, Simulation};

/// Walls sit inside the out-of-play band
const WALL_Y: f32 = 5.0;
const BALL_RADIUS: f32 = 0.25;
const PADDLE_WIDTH: f32 = 0.3;
const POINTS_TO_PLAY: u32 = 5;
/// Ten simulated minutes
const MAX_TICKS: u64 = 60 * 60 * 10;

fn load_config(path: Option<&str>) -> Result<SimConfig, SimError> {
    match path {
        Some(path) => SimConfig::load(path),
        None => Ok(SimConfig::default()),
    }
}

/// Contacts the ball is making this frame, only against surfaces it is moving into
fn detect_contacts(sim: &Simulation, walls: &[EdgeShape; 2]) -> Vec<ContactEvent> {
    let ball = &sim.ball;
    let mut contacts = Vec::new();

    for wall in walls {
        let approaching = ball.vel.y * wall.center.y.signum() > 0.0;
        if approaching && wall.distance_to_point(ball.pos) <= BALL_RADIUS {
            contacts.push(ContactEvent::wall(wall.center));
        }
    }

    let half_height = sim.config().paddle_half_height;
    for paddle in &sim.paddles {
        let approaching = ball.vel.x * paddle.side.sign() > 0.0;
        let hitbox = BoxShape::new(paddle.pos, Vec2::new(PADDLE_WIDTH, half_height * 2.0))
            .expanded(BALL_RADIUS);
        if approaching && hitbox.contains_point(ball.pos) {
            contacts.push(ContactEvent::paddle(paddle.pos));
        }
    }

    contacts
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pong Sim (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut sim = match Simulation::new(config, seed) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Invalid config: {e}");
            std::process::exit(1);
        }
    };
    for paddle in &mut sim.paddles {
        paddle.computer_controlled = true;
    }

    let field_width = sim.config().goal_bounds_x * 2.0;
    let walls = [
        EdgeShape::new(Vec2::new(0.0, WALL_Y), field_width, 90.0),
        EdgeShape::new(Vec2::new(0.0, -WALL_Y), field_width, 90.0),
    ];

    sim.start(None);
    let mut rally = 0u32;

    while sim.state.points_played < POINTS_TO_PLAY && sim.time_ticks < MAX_TICKS {
        for side in [Side::Left, Side::Right] {
            if sim.paddle(side).computer_controlled {
                let axis = sim.ai_axis(side);
                sim.move_paddle(side, axis, SIM_DT);
            }
        }

        sim.step(SIM_DT);

        for contact in detect_contacts(&sim, &walls) {
            sim.on_collision(contact);
        }

        for event in sim.drain_events() {
            match event {
                GameEvent::PaddleHit { side, speed } => {
                    rally += 1;
                    log::debug!("{} paddle return #{rally} at {speed:.2}", side.as_str());
                }
                GameEvent::WallHit => log::trace!("Wall bounce at {:?}", sim.ball.pos),
                GameEvent::Scored(goal) => {
                    log::info!(
                        "Point to {} after {rally} returns",
                        goal.scorer().as_str()
                    );
                    rally = 0;
                }
                GameEvent::OutOfPlay => rally = 0,
                GameEvent::ServeStarted { side, protocol } => {
                    log::debug!("Serve ({}) {}", protocol.as_str(), side.as_str());
                }
                GameEvent::Launched { velocity } => log::debug!("Launch {velocity:?}"),
            }
        }
    }

    let score = sim.state.score;
    log::info!(
        "Final score: Left {} - Right {} ({} ticks)",
        score.left,
        score.right,
        sim.time_ticks
    );
    println!("Left {} - Right {}", score.left, score.right);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless entry point on the web
}
