//! Match and screen drawing.
//!
//! Coordinates inside the engine are field-local; the renderer offsets
//! everything by the HUD strip it reserves at the top of the window.

use engine::{Ball, MatchSim, Paddle, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HEIGHT, PADDLE_WIDTH};
use macroquad::prelude::*;

/// Vertical space reserved above the field for names and scores.
pub const HUD_HEIGHT: f32 = 80.0;
pub const WINDOW_WIDTH: i32 = 800;
pub const WINDOW_HEIGHT: i32 = 480;

const BACKGROUND: Color = Color {
    r: 0.10,
    g: 0.10,
    b: 0.10,
    a: 1.0,
};
const DIVIDER: Color = Color {
    r: 0.27,
    g: 0.27,
    b: 0.27,
    a: 1.0,
};

pub struct Renderer {
    origin_y: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            origin_y: HUD_HEIGHT,
        }
    }

    /// Draws one frame of the match: HUD, field, paddles, ball.
    pub fn draw_match(&self, sim: &MatchSim, left_name: &str, right_name: &str) {
        clear_background(BACKGROUND);
        self.draw_hud(sim, left_name, right_name);
        self.draw_field();
        self.draw_paddle(&sim.left);
        self.draw_paddle(&sim.right);
        self.draw_ball(&sim.ball);
    }

    fn draw_field(&self) {
        draw_rectangle(0.0, self.origin_y, FIELD_WIDTH, FIELD_HEIGHT, BLACK);
        draw_rectangle_lines(0.0, self.origin_y, FIELD_WIDTH, FIELD_HEIGHT, 2.0, WHITE);

        // Dashed center divider.
        let mut y = 0.0;
        while y < FIELD_HEIGHT {
            let end = (y + 6.0).min(FIELD_HEIGHT);
            draw_line(
                FIELD_WIDTH / 2.0,
                self.origin_y + y,
                FIELD_WIDTH / 2.0,
                self.origin_y + end,
                2.0,
                DIVIDER,
            );
            y += 16.0;
        }
    }

    fn draw_paddle(&self, paddle: &Paddle) {
        draw_rectangle(
            paddle.x,
            self.origin_y + paddle.y,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
            WHITE,
        );
    }

    fn draw_ball(&self, ball: &Ball) {
        draw_circle(ball.x, self.origin_y + ball.y, ball.radius, WHITE);
    }

    fn draw_hud(&self, sim: &MatchSim, left_name: &str, right_name: &str) {
        let line = format!(
            "{}  {}   |   {}  {}",
            left_name, sim.state.left_score, sim.state.right_score, right_name
        );
        draw_centered_text(&line, 42.0, 36.0, WHITE);
    }

    /// Small tag in the HUD corner showing the active mode.
    pub fn draw_mode_tag(&self, label: &str) {
        draw_text(label, 10.0, 24.0, 20.0, GRAY);
    }

    /// Hint line at the bottom of the HUD while the match runs.
    pub fn draw_controls_hint(&self, mode_locked: bool) {
        let hint = if mode_locked {
            "W/S left   Up/Down right   Esc leave"
        } else {
            "W/S left   Up/Down right   M mode   R recenter   Esc leave"
        };
        draw_text(hint, 10.0, self.origin_y - 8.0, 16.0, GRAY);
    }

    /// Dimmed overlay with the result and the affordances the session
    /// offers: continue for tournament matches, rematch/home otherwise.
    pub fn draw_result_overlay(
        &self,
        winner_name: &str,
        left_score: u8,
        right_score: u8,
        tournament: bool,
    ) {
        draw_rectangle(
            0.0,
            self.origin_y,
            FIELD_WIDTH,
            FIELD_HEIGHT,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );
        let mid = self.origin_y + FIELD_HEIGHT / 2.0;
        draw_centered_text(&format!("{winner_name} wins!"), mid - 40.0, 40.0, GREEN);
        draw_centered_text(
            &format!("Final score: {left_score} - {right_score}"),
            mid,
            28.0,
            LIGHTGRAY,
        );
        if tournament {
            draw_centered_text("[Enter] Continue", mid + 44.0, 24.0, WHITE);
        } else {
            draw_centered_text("[Enter] Rematch    [H] Home", mid + 44.0, 24.0, WHITE);
        }
    }
}

/// Draws `text` horizontally centered at baseline `y`.
pub fn draw_centered_text(text: &str, y: f32, font_size: f32, color: Color) {
    let size = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, (screen_width() - size.width) / 2.0, y, font_size, color);
}
