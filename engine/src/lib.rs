//! # Match Engine Library
//!
//! Pure simulation logic for the Pong client: the per-tick physics and
//! rules step for one match, the defeatable AI opponent, and the 4-player
//! single-elimination tournament bracket.
//!
//! Nothing in this crate touches a window, a socket, or the clock. The
//! client crate samples input and draws; this crate only advances state.
//! All randomness flows through injected `rand` generators so tests can
//! pin a seed and replay a match tick for tick.

pub mod ai;
pub mod input;
pub mod physics;
pub mod tournament;

pub use ai::AiController;
pub use input::PaddleInput;
pub use physics::{Ball, MatchSim, MatchState, Paddle, Side, TickEvent};
pub use tournament::{Bracket, MatchPlan, MatchStart, Mode, Player, Round, BRACKET_SIZE, MAX_AI_PLAYERS};

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 400.0;
pub const PADDLE_WIDTH: f32 = 12.0;
pub const PADDLE_HEIGHT: f32 = 80.0;
/// Horizontal inset of each paddle from its own field edge.
pub const PADDLE_INSET: f32 = 20.0;
/// Per-tick paddle speed under human control.
pub const PADDLE_SPEED: f32 = 6.0;
pub const BALL_RADIUS: f32 = 8.0;
/// Horizontal serve speed; the sign is randomized per serve.
pub const SERVE_SPEED_X: f32 = 4.0;
/// Vertical serve speed magnitude is drawn from this half-open range.
pub const SERVE_MIN_SPEED_Y: f32 = 2.0;
pub const SERVE_MAX_SPEED_Y: f32 = 6.0;
/// How far past the field edge the ball must travel before a goal counts.
pub const GOAL_MARGIN: f32 = 20.0;
/// Vertical deflection scale applied on paddle hits.
pub const SPIN_FACTOR: f32 = 5.0;
pub const DEFAULT_TARGET_SCORE: u8 = 5;

// AI tuning. All three knobs are needed to keep the opponent beatable:
// a speed cap below the human paddle, a throttled reaction, noisy aim.
pub const AI_MAX_SPEED: f32 = 4.0;
pub const AI_REACTION_WINDOW: i64 = 4;
pub const AI_AIM_NOISE: f32 = 6.0;
pub const AI_TRACKING_GAIN: f32 = 0.2;
