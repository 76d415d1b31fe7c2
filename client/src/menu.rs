//! Keyboard-driven screens around the matches: home, tournament setup,
//! the bracket view, and the champion announcement.
//!
//! Each screen owns its own little frame loop and returns a plain choice
//! value; navigation state never leaks between screens.

use engine::{Bracket, Player, Round, BRACKET_SIZE, MAX_AI_PLAYERS};
use macroquad::prelude::*;

use crate::rendering::draw_centered_text;

const BACKGROUND: Color = Color {
    r: 0.10,
    g: 0.10,
    b: 0.10,
    a: 1.0,
};
const MAX_NAME_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeChoice {
    FreePlay,
    Tournament,
    Quit,
}

pub async fn home_screen(user_name: &str) -> HomeChoice {
    loop {
        if is_key_pressed(KeyCode::P) {
            return HomeChoice::FreePlay;
        }
        if is_key_pressed(KeyCode::T) {
            return HomeChoice::Tournament;
        }
        if is_key_pressed(KeyCode::Q) || is_key_pressed(KeyCode::Escape) {
            return HomeChoice::Quit;
        }

        clear_background(BACKGROUND);
        draw_centered_text("PONG", 130.0, 64.0, WHITE);
        draw_centered_text(&format!("Playing as {user_name}"), 170.0, 22.0, GREEN);
        draw_centered_text("[P] Free play", 250.0, 30.0, WHITE);
        draw_centered_text("[T] Tournament", 290.0, 30.0, WHITE);
        draw_centered_text("[Q] Quit", 330.0, 30.0, WHITE);
        next_frame().await;
    }
}

/// Values collected by the setup screen; fed straight into
/// [`Bracket::new`], which clamps and pads them further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSetup {
    pub ai_count: usize,
    pub local_names: Vec<String>,
}

fn extra_locals_allowed(ai_count: usize) -> usize {
    BRACKET_SIZE - 1 - ai_count
}

/// The 4-player tournament setup: pick an AI count, type the extra local
/// names. Returns `None` when the player backs out.
pub async fn tournament_setup_screen() -> Option<TournamentSetup> {
    let mut ai_count: usize = 1;
    let mut names: Vec<String> = vec![String::new(); extra_locals_allowed(1)];
    let mut active: usize = 0;
    clear_input_queue();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            return None;
        }
        if is_key_pressed(KeyCode::Enter) {
            return Some(TournamentSetup {
                ai_count,
                local_names: names,
            });
        }
        if is_key_pressed(KeyCode::Up) && ai_count < MAX_AI_PLAYERS {
            ai_count += 1;
        }
        if is_key_pressed(KeyCode::Down) && ai_count > 0 {
            ai_count -= 1;
        }
        // The visible name slots track the AI count; anything typed into
        // a slot that disappears is dropped with it.
        names.resize(extra_locals_allowed(ai_count), String::new());
        if active >= names.len() {
            active = names.len().saturating_sub(1);
        }
        if is_key_pressed(KeyCode::Tab) && !names.is_empty() {
            active = (active + 1) % names.len();
        }
        if is_key_pressed(KeyCode::Backspace) {
            if let Some(field) = names.get_mut(active) {
                field.pop();
            }
        }
        while let Some(c) = get_char_pressed() {
            if c.is_control() {
                continue;
            }
            if let Some(field) = names.get_mut(active) {
                if field.len() < MAX_NAME_LEN {
                    field.push(c);
                }
            }
        }

        clear_background(BACKGROUND);
        draw_centered_text("Create tournament (4 players)", 80.0, 36.0, WHITE);
        draw_centered_text(
            &format!("AI players: {ai_count}   (Up/Down to change)"),
            140.0,
            26.0,
            WHITE,
        );
        draw_centered_text(
            &format!(
                "Up to {} local names besides you (Tab to switch field)",
                names.len()
            ),
            180.0,
            20.0,
            GRAY,
        );
        for (index, name) in names.iter().enumerate() {
            let marker = if index == active { ">" } else { " " };
            let shown = if name.is_empty() {
                format!("{marker} Player {}: <Player {}>", index + 2, index + 2)
            } else {
                format!("{marker} Player {}: {name}", index + 2)
            };
            let color = if index == active { YELLOW } else { LIGHTGRAY };
            draw_centered_text(&shown, 220.0 + index as f32 * 32.0, 24.0, color);
        }
        draw_centered_text("[Enter] Start    [Esc] Back", 400.0, 24.0, WHITE);
        next_frame().await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketChoice {
    PlaySemifinal(usize),
    PlayFinal,
    NewTournament,
    Home,
}

fn player_tag(player: &Player) -> String {
    if player.is_ai {
        format!("{} (AI)", player.name)
    } else {
        player.name.clone()
    }
}

/// The bracket view: both semifinals, the final, and what is currently
/// playable. Only offers actions the bracket will accept.
pub async fn bracket_screen(bracket: &Bracket) -> BracketChoice {
    loop {
        if is_key_pressed(KeyCode::Key1) && bracket.semifinal_winner(0).is_none() {
            return BracketChoice::PlaySemifinal(0);
        }
        if is_key_pressed(KeyCode::Key2) && bracket.semifinal_winner(1).is_none() {
            return BracketChoice::PlaySemifinal(1);
        }
        if is_key_pressed(KeyCode::F) && bracket.round() == Round::Final {
            return BracketChoice::PlayFinal;
        }
        if is_key_pressed(KeyCode::N) {
            return BracketChoice::NewTournament;
        }
        if is_key_pressed(KeyCode::H) || is_key_pressed(KeyCode::Escape) {
            return BracketChoice::Home;
        }

        clear_background(BACKGROUND);
        draw_centered_text("Tournament bracket", 70.0, 36.0, WHITE);

        for index in 0..2 {
            let (a, b) = bracket.semifinal_pair(index);
            let y = 130.0 + index as f32 * 70.0;
            draw_centered_text(
                &format!(
                    "Semifinal {}: {} vs {}",
                    index + 1,
                    player_tag(a),
                    player_tag(b)
                ),
                y,
                26.0,
                WHITE,
            );
            match bracket.semifinal_winner(index) {
                Some(winner) => {
                    draw_centered_text(&format!("Winner: {}", winner.name), y + 28.0, 22.0, GREEN)
                }
                None => draw_centered_text(
                    &format!("[{}] Play", index + 1),
                    y + 28.0,
                    22.0,
                    YELLOW,
                ),
            }
        }

        let final_line = match bracket.final_pair() {
            Some((a, b)) => format!("Final: {} vs {}", player_tag(a), player_tag(b)),
            None => "Final: waiting for the semifinals".to_string(),
        };
        draw_centered_text(&final_line, 300.0, 26.0, WHITE);
        if bracket.round() == Round::Final {
            draw_centered_text("[F] Play final", 328.0, 22.0, YELLOW);
        }

        draw_centered_text("[N] New tournament    [H] Home", 410.0, 22.0, GRAY);
        next_frame().await;
    }
}

/// Announces the champion, then hands control back to the caller.
pub async fn champion_screen(name: &str) {
    loop {
        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Escape) {
            return;
        }
        clear_background(BACKGROUND);
        draw_centered_text("Tournament champion", 170.0, 36.0, WHITE);
        draw_centered_text(name, 230.0, 56.0, GOLD);
        draw_centered_text("[Enter] Home", 330.0, 24.0, GRAY);
        next_frame().await;
    }
}
