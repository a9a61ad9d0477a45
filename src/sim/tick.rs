//! Per-tick simulation driver
//!
//! Each tick runs in a fixed order:
//! 1. resolve pending contacts (reflection)
//! 2. bounds check (goal / out of play)
//! 3. serve machine (timers, follow smoothing)
//!
//! Motion integration is left to the host; [`Simulation::step`] adds it for
//! hosts that have no integrator of their own.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bounds::{BoundsEvent, ScoreEvent, ScoreMonitor};
use super::paddle::Paddle;
use super::predict::{PredictionFrame, predict, predict_path};
use super::reflect::{ContactEvent, StrikerKind, reflect};
use super::serve::{ServePhase, random_side};
use super::state::{Ball, GameEvent, MatchState, Side};
use crate::config::{ServePolicy, ServeProtocol, SimConfig};
use crate::error::SimError;

/// One match: ball, paddles, serve sequencing and scoring
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    pub ball: Ball,
    pub paddles: [Paddle; 2],
    pub state: MatchState,
    monitor: ScoreMonitor,
    pending_contacts: Vec<ContactEvent>,
    events: Vec<GameEvent>,
    rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Simulation {
    /// Build a match from a validated config and RNG seed
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        let ball = Ball::new(config.start_speed, config.speed_increase_per_bounce);
        let paddles = [
            Paddle::new(Side::Left, config.paddle_x),
            Paddle::new(Side::Right, config.paddle_x),
        ];
        let monitor = ScoreMonitor::new(config.goal_bounds_x, config.vertical_bounds_y);

        Ok(Self {
            config,
            ball,
            paddles,
            state: MatchState::new(),
            monitor,
            pending_contacts: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn serve_phase(&self) -> ServePhase {
        self.state.serve.phase()
    }

    /// Begin the match from `Idle`, serving toward `hint` or a random side
    pub fn start(&mut self, hint: Option<Side>) {
        if self.state.serve.phase() != ServePhase::Idle {
            log::warn!("start() ignored: match already running");
            return;
        }
        let side = self
            .state
            .serve
            .start(hint, &mut self.ball, &self.config, &mut self.rng);
        self.after_serve_begins(side, ServeProtocol::Center);
    }

    /// Manual reset: abandon the rally and count down from center
    pub fn reset(&mut self) {
        let side = self
            .state
            .serve
            .reset(&mut self.ball, &self.config, &mut self.rng);
        self.after_serve_begins(side, ServeProtocol::Center);
    }

    /// Queue a contact from the host's collision detection (resolved next tick)
    pub fn on_collision(&mut self, contact: ContactEvent) {
        self.pending_contacts.push(contact);
    }

    /// Move a paddle by a resolved input axis
    pub fn move_paddle(&mut self, side: Side, axis: f32, dt: f32) {
        let speed = self.config.paddle_speed;
        let limit = self.config.paddle_travel_limit;
        self.paddles[side.index()].apply_axis(axis, dt, speed, limit);
    }

    /// Where `side`'s paddle should head to meet the ball
    pub fn predict_target(&self, side: Side, max_bounces: u32) -> Vec2 {
        self.predict_frame(side, max_bounces).position
    }

    /// Full predicted frame for `side` (the ball itself while not in flight)
    pub fn predict_frame(&self, side: Side, max_bounces: u32) -> PredictionFrame {
        if !self.state.serve.is_launched() {
            return PredictionFrame::new(self.ball.pos, self.ball.vel);
        }
        predict(
            self.ball.pos,
            self.ball.vel,
            max_bounces,
            &self.paddles,
            Some(side),
            &self.config,
        )
    }

    /// Predicted flight for debug drawing
    pub fn predict_path(&self, side: Side, max_bounces: u32) -> Vec<PredictionFrame> {
        predict_path(
            self.ball.pos,
            self.ball.vel,
            max_bounces,
            &self.paddles,
            Some(side),
            &self.config,
        )
    }

    /// Steering axis for a computer-controlled paddle
    pub fn ai_axis(&self, side: Side) -> f32 {
        let target = self.predict_target(side, self.config.ai_max_bounces);
        self.paddle(side).steer_axis(target.y, self.config.ai_error_margin)
    }

    /// Advance one tick. Does not move the ball.
    pub fn tick(&mut self, dt: f32) {
        self.time_ticks += 1;

        // 1. Contacts
        let contacts = std::mem::take(&mut self.pending_contacts);
        if self.state.serve.is_launched() {
            for contact in &contacts {
                self.resolve_contact(contact);
            }
        }

        // 2. Bounds
        if self.state.serve.is_launched() {
            match self.monitor.observe(self.ball.pos) {
                Some(BoundsEvent::Goal(goal)) => self.on_goal(goal),
                Some(BoundsEvent::OutOfPlay) => self.on_out_of_play(),
                None => {}
            }
        }

        // 3. Serve timers
        if let Some(velocity) =
            self.state
                .serve
                .tick(dt, &mut self.ball, &self.paddles, &self.config, &mut self.rng)
        {
            self.events.push(GameEvent::Launched { velocity });
        }
    }

    /// [`Simulation::tick`] followed by motion integration
    pub fn step(&mut self, dt: f32) {
        self.tick(dt);
        if self.state.serve.is_launched() {
            self.ball.integrate(dt);
        }
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn resolve_contact(&mut self, contact: &ContactEvent) {
        let velocity = reflect(
            self.ball.vel,
            contact,
            self.ball.pos,
            &self.config.reflect_curve,
            self.config.paddle_half_height,
            self.ball.speed_increase,
        );
        self.ball.vel = velocity;

        self.events.push(match contact.kind {
            StrikerKind::Paddle => GameEvent::PaddleHit {
                side: contact.side(),
                speed: velocity.length(),
            },
            StrikerKind::Wall => GameEvent::WallHit,
        });
    }

    fn on_goal(&mut self, goal: ScoreEvent) {
        let scorer = goal.scorer();
        self.state.score.award(scorer);
        self.state.points_played += 1;
        log::info!(
            "{} player scores! ({} - {})",
            scorer.as_str(),
            self.state.score.left,
            self.state.score.right
        );
        self.events.push(GameEvent::Scored(goal));

        let side = match self.config.serve_policy {
            ServePolicy::ConcedingSideServes => goal.side,
            ServePolicy::Random => random_side(&mut self.rng),
        };

        match self.config.serve_protocol {
            ServeProtocol::Center => {
                self.state
                    .serve
                    .begin_countdown(side, &mut self.ball, self.config.ball_start_delay_seconds);
            }
            ServeProtocol::PaddleAttached => {
                self.state.serve.attach(
                    &self.paddles[side.index()],
                    &mut self.ball,
                    self.config.serve_offset_distance,
                    self.config.serve_attach_seconds,
                );
            }
        }
        self.after_serve_begins(side, self.config.serve_protocol);
    }

    fn on_out_of_play(&mut self) {
        log::info!("Ball out of play at {:?}, no score", self.ball.pos);
        self.events.push(GameEvent::OutOfPlay);
        let side = random_side(&mut self.rng);
        self.state
            .serve
            .begin_countdown(side, &mut self.ball, self.config.ball_start_delay_seconds);
        self.after_serve_begins(side, ServeProtocol::Center);
    }

    fn after_serve_begins(&mut self, side: Side, protocol: ServeProtocol) {
        // The ball has been relocated; drop stale contacts and watch afresh
        self.pending_contacts.clear();
        self.monitor.rearm();
        self.events.push(GameEvent::ServeStarted { side, protocol });
    }
}
