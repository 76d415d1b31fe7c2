//! Keyboard sampling for the two local paddles.

use engine::PaddleInput;
use macroquad::prelude::*;

/// Stateless sampler queried once per simulation tick.
///
/// Left paddle: W/S. Right paddle: ArrowUp/ArrowDown. Momentary UI keys
/// (mode switch, result choices) are read with `is_key_pressed` at the
/// call sites instead; only held movement keys live here.
#[derive(Debug, Default)]
pub struct InputSampler;

impl InputSampler {
    pub fn new() -> Self {
        Self
    }

    pub fn left(&self) -> PaddleInput {
        PaddleInput::new(is_key_down(KeyCode::W), is_key_down(KeyCode::S))
    }

    pub fn right(&self) -> PaddleInput {
        PaddleInput::new(is_key_down(KeyCode::Up), is_key_down(KeyCode::Down))
    }
}
