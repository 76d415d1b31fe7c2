//! Per-tick simulation of one match.
//!
//! The tick order is fixed and load-bearing: paddles move first, then the
//! ball, then wall and paddle collisions (left before right), and goal
//! detection runs last so a match-ending goal can suppress the rally
//! reset.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    BALL_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, GOAL_MARGIN, PADDLE_HEIGHT, PADDLE_INSET, PADDLE_WIDTH,
    SERVE_MAX_SPEED_Y, SERVE_MIN_SPEED_Y, SERVE_SPEED_X, SPIN_FACTOR,
};

/// One of the two field sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A paddle. `x` is fixed per side; `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
}

impl Paddle {
    fn new(x: f32) -> Self {
        Self {
            x,
            y: FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            vy: 0.0,
        }
    }

    /// Vertical center of the paddle face.
    pub fn center_y(&self) -> f32 {
        self.y + PADDLE_HEIGHT / 2.0
    }

    /// Applies the current velocity and clamps to the field. The velocity
    /// itself is left alone, so held input against a wall produces no
    /// motion until released.
    fn advance(&mut self) {
        self.y = (self.y + self.vy).clamp(0.0, FIELD_HEIGHT - PADDLE_HEIGHT);
    }

    fn recenter(&mut self) {
        self.y = FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0;
    }

    /// True when `y` lies within the paddle's vertical span.
    fn covers(&self, y: f32) -> bool {
        y > self.y && y < self.y + PADDLE_HEIGHT
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

impl Ball {
    fn centered() -> Self {
        Self {
            x: FIELD_WIDTH / 2.0,
            y: FIELD_HEIGHT / 2.0,
            vx: 0.0,
            vy: 0.0,
            radius: BALL_RADIUS,
        }
    }
}

/// Score bookkeeping for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    pub left_score: u8,
    pub right_score: u8,
    pub target_score: u8,
    pub winner: Option<Side>,
}

impl MatchState {
    fn new(target_score: u8) -> Self {
        Self {
            left_score: 0,
            right_score: 0,
            target_score,
            winner: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn score(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    /// Increments the scorer's tally and reports whether that point ends
    /// the match. The terminal check must run here, before any reset.
    fn award(&mut self, scorer: Side) -> bool {
        match scorer {
            Side::Left => self.left_score += 1,
            Side::Right => self.right_score += 1,
        }
        if self.score(scorer) >= self.target_score {
            self.winner = Some(scorer);
        }
        self.is_over()
    }
}

/// Outcome of a single simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// A goal that did not end the match; a fresh rally was served.
    Goal { scorer: Side },
    /// The match-ending goal. No rally reset follows.
    GameOver { winner: Side },
}

/// Mutable state of one running match: two paddles, the ball, the score.
///
/// Owned exclusively by whichever session drives it; the tournament layer
/// only ever sees the winner handed back on completion.
#[derive(Debug)]
pub struct MatchSim {
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub state: MatchState,
    rng: StdRng,
}

/// Vertical velocity after a paddle hit: offset from the paddle center,
/// normalized to [-1, 1], scaled by the spin factor. Center hits go
/// straight, edge hits deflect sharply.
fn deflection(paddle: &Paddle, ball_y: f32) -> f32 {
    let offset = (ball_y - paddle.center_y()) / (PADDLE_HEIGHT / 2.0);
    offset * SPIN_FACTOR
}

impl MatchSim {
    pub fn new(target_score: u8) -> Self {
        Self::with_rng(target_score, StdRng::from_entropy())
    }

    /// Deterministic construction for tests and seeded sessions.
    pub fn from_seed(target_score: u8, seed: u64) -> Self {
        Self::with_rng(target_score, StdRng::seed_from_u64(seed))
    }

    fn with_rng(target_score: u8, rng: StdRng) -> Self {
        let mut sim = Self {
            left: Paddle::new(PADDLE_INSET),
            right: Paddle::new(FIELD_WIDTH - PADDLE_INSET - PADDLE_WIDTH),
            ball: Ball::centered(),
            state: MatchState::new(target_score),
            rng,
        };
        sim.reset_rally();
        sim
    }

    /// Re-centers both paddles and the ball and serves with a fresh
    /// random velocity, so no two rallies start identically.
    pub fn reset_rally(&mut self) {
        self.left.recenter();
        self.right.recenter();
        self.ball = Ball::centered();
        self.ball.vx = if self.rng.gen_bool(0.5) {
            SERVE_SPEED_X
        } else {
            -SERVE_SPEED_X
        };
        let vy = self.rng.gen_range(SERVE_MIN_SPEED_Y..SERVE_MAX_SPEED_Y);
        self.ball.vy = if self.rng.gen_bool(0.5) { vy } else { -vy };
    }

    /// Full restart: scores, terminal flag, positions, serve.
    pub fn reset_match(&mut self) {
        self.state = MatchState::new(self.state.target_score);
        self.reset_rally();
    }

    /// Advances the simulation by one tick given both paddle velocities.
    ///
    /// Once the match is over, ticks are no-ops: scores, ball and paddles
    /// all freeze.
    pub fn tick(&mut self, left_vy: f32, right_vy: f32) -> Option<TickEvent> {
        if self.state.is_over() {
            return None;
        }

        self.left.vy = left_vy;
        self.right.vy = right_vy;
        self.left.advance();
        self.right.advance();

        self.ball.x += self.ball.vx;
        self.ball.y += self.ball.vy;

        // Top/bottom walls: elastic, sign flip only, no position fixup.
        if self.ball.y - self.ball.radius < 0.0 || self.ball.y + self.ball.radius > FIELD_HEIGHT {
            self.ball.vy = -self.ball.vy;
        }

        // Left paddle, then right; both can fire in the same tick as a
        // wall bounce when the ball is near a corner.
        if self.ball.x - self.ball.radius < self.left.x + PADDLE_WIDTH
            && self.left.covers(self.ball.y)
        {
            self.ball.x = self.left.x + PADDLE_WIDTH + self.ball.radius;
            self.ball.vx = self.ball.vx.abs();
            self.ball.vy = deflection(&self.left, self.ball.y);
        }
        if self.ball.x + self.ball.radius > self.right.x && self.right.covers(self.ball.y) {
            self.ball.x = self.right.x - self.ball.radius;
            self.ball.vx = -self.ball.vx.abs();
            self.ball.vy = deflection(&self.right, self.ball.y);
        }

        // Goals count only once the ball has visibly left the field.
        if self.ball.x < -GOAL_MARGIN {
            return Some(self.award(Side::Right));
        }
        if self.ball.x > FIELD_WIDTH + GOAL_MARGIN {
            return Some(self.award(Side::Left));
        }
        None
    }

    fn award(&mut self, scorer: Side) -> TickEvent {
        let ended = self.state.award(scorer);
        debug!(
            "goal for {:?}: {}-{}",
            scorer, self.state.left_score, self.state.right_score
        );
        if ended {
            TickEvent::GameOver { winner: scorer }
        } else {
            self.reset_rally();
            TickEvent::Goal { scorer }
        }
    }
}
