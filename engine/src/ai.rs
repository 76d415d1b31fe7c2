//! Right-paddle opponent controller.
//!
//! Three independent knobs keep the opponent beatable: its speed cap sits
//! below the human paddle speed, it only recomputes its aim on a throttled
//! cadence, and every aim carries bounded random noise. Remove any one and
//! it turns either unbeatable or trivial.

use rand::Rng;

use crate::physics::{Ball, Paddle};
use crate::{AI_AIM_NOISE, AI_MAX_SPEED, AI_REACTION_WINDOW, AI_TRACKING_GAIN, PADDLE_HEIGHT};

/// Velocity source for an AI-driven right paddle.
///
/// Holds the last commanded velocity between recomputes, so the paddle
/// keeps drifting toward its previous aim while "not looking".
#[derive(Debug, Default)]
pub struct AiController {
    vy: f32,
}

impl AiController {
    pub fn new() -> Self {
        Self { vy: 0.0 }
    }

    /// Clears the held velocity for a fresh match.
    pub fn reset(&mut self) {
        self.vy = 0.0;
    }

    /// Per-tick velocity for the controlled paddle.
    ///
    /// The recompute cadence is derived from the ball position rather
    /// than a wall clock; the exact bucketing is a tunable, the contract
    /// is a periodic, throttled reaction.
    pub fn paddle_velocity(&mut self, ball: &Ball, paddle: &Paddle, rng: &mut impl Rng) -> f32 {
        let window = ((ball.x + ball.y) / 10.0).floor() as i64;
        if window.rem_euclid(AI_REACTION_WINDOW) == 0 {
            let noise = rng.gen_range(-AI_AIM_NOISE..AI_AIM_NOISE);
            let target = ball.y + noise - PADDLE_HEIGHT / 2.0;
            let diff = target - paddle.y;
            self.vy = (diff * AI_TRACKING_GAIN).clamp(-AI_MAX_SPEED, AI_MAX_SPEED);
        }
        self.vy
    }
}
