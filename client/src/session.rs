//! Lifecycle around one simulated match.
//!
//! A session binds the match engine to the window: it samples input once
//! per frame, steps the simulation, draws, and yields to the scheduler.
//! When the match ends it reports the result exactly once and offers
//! whatever affordances its origin allows. Every exit path returns out of
//! the frame loop before another frame is scheduled, so no stale loop can
//! outlive the session.

use engine::{AiController, MatchPlan, MatchSim, Mode, Side, TickEvent};
use log::{info, warn};
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

use crate::input::InputSampler;
use crate::rendering::Renderer;
use crate::report::{MatchReport, MatchReporter, AI_OPPONENT_LABEL};

/// Who started the session; decides the result affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    FreePlay,
    Tournament,
}

/// Everything a session needs to configure itself. Produced by the
/// tournament bracket or by free play, consumed exactly once.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub mode: Mode,
    pub mode_locked: bool,
    pub left_name: String,
    pub right_name: String,
    pub origin: SessionOrigin,
}

impl GameConfig {
    /// Free-play defaults: pvp, switchable, placeholder names where the
    /// caller has none. Missing names are cosmetic, never an error.
    pub fn free_play(user_name: &str) -> Self {
        Self {
            mode: Mode::Pvp,
            mode_locked: false,
            left_name: non_empty_or(user_name, "Player 1"),
            right_name: "Player 2".to_string(),
            origin: SessionOrigin::FreePlay,
        }
    }

    /// Bracket-launched config: mode and names are fixed by the plan.
    pub fn tournament(plan: &MatchPlan) -> Self {
        Self {
            mode: plan.mode,
            mode_locked: true,
            left_name: non_empty_or(&plan.left.name, "Player 1"),
            right_name: non_empty_or(&plan.right.name, "Player 2"),
            origin: SessionOrigin::Tournament,
        }
    }
}

fn non_empty_or(name: &str, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The match ran to its target score and was reported.
    Finished {
        winner: Side,
        left_score: u8,
        right_score: u8,
    },
    /// The player left mid-match; nothing was reported.
    Abandoned,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Running,
    Over { winner: Side },
}

enum ResultChoice {
    Rematch,
    Leave,
}

pub struct MatchSession {
    config: GameConfig,
    mode: Mode,
    sim: MatchSim,
    ai: AiController,
    ai_rng: StdRng,
    sampler: InputSampler,
    renderer: Renderer,
    phase: Phase,
}

impl MatchSession {
    /// Consumes the config and builds a ready-to-run session. A seed pins
    /// both the serves and the AI aim for deterministic runs.
    pub fn new(config: GameConfig, target_score: u8, seed: Option<u64>) -> Self {
        let sim = match seed {
            Some(seed) => MatchSim::from_seed(target_score, seed),
            None => MatchSim::new(target_score),
        };
        let ai_rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let mode = config.mode;
        Self {
            config,
            mode,
            sim,
            ai: AiController::new(),
            ai_rng,
            sampler: InputSampler::new(),
            renderer: Renderer::new(),
            phase: Phase::Running,
        }
    }

    /// Drives the frame loop until the player leaves or, for tournament
    /// sessions, confirms the result.
    pub async fn run(mut self, reporter: &dyn MatchReporter) -> SessionOutcome {
        info!(
            "match started: {} vs {} ({})",
            self.config.left_name,
            self.config.right_name,
            mode_label(self.mode)
        );
        loop {
            match self.phase {
                Phase::Running => {
                    if is_key_pressed(KeyCode::Escape) {
                        info!("match abandoned");
                        return SessionOutcome::Abandoned;
                    }
                    if !self.config.mode_locked {
                        if is_key_pressed(KeyCode::M) {
                            self.switch_mode();
                        }
                        if is_key_pressed(KeyCode::R) {
                            self.sim.reset_rally();
                        }
                    }
                    self.step(reporter);
                    self.draw();
                }
                Phase::Over { winner } => {
                    self.draw();
                    let tournament = self.config.origin == SessionOrigin::Tournament;
                    self.renderer.draw_result_overlay(
                        self.name_of(winner),
                        self.sim.state.left_score,
                        self.sim.state.right_score,
                        tournament,
                    );
                    match self.result_choice(tournament) {
                        Some(ResultChoice::Leave) => return self.finished(winner),
                        Some(ResultChoice::Rematch) => self.restart(),
                        None => {}
                    }
                }
            }
            next_frame().await;
        }
    }

    fn step(&mut self, reporter: &dyn MatchReporter) {
        let left_vy = self.sampler.left().paddle_velocity();
        let right_vy = match self.mode {
            Mode::Pvp => self.sampler.right().paddle_velocity(),
            Mode::Ai => self
                .ai
                .paddle_velocity(&self.sim.ball, &self.sim.right, &mut self.ai_rng),
        };
        if let Some(TickEvent::GameOver { winner }) = self.sim.tick(left_vy, right_vy) {
            // Reported here, at the single Running -> Over transition, so
            // each completed game produces exactly one report.
            self.report(reporter);
            self.phase = Phase::Over { winner };
        }
    }

    fn draw(&self) {
        self.renderer
            .draw_match(&self.sim, &self.config.left_name, &self.config.right_name);
        self.renderer.draw_mode_tag(mode_label(self.mode));
        self.renderer.draw_controls_hint(self.config.mode_locked);
    }

    fn result_choice(&self, tournament: bool) -> Option<ResultChoice> {
        if tournament {
            if is_key_pressed(KeyCode::Enter) {
                return Some(ResultChoice::Leave);
            }
            return None;
        }
        if is_key_pressed(KeyCode::Enter) {
            return Some(ResultChoice::Rematch);
        }
        if is_key_pressed(KeyCode::H) || is_key_pressed(KeyCode::Escape) {
            return Some(ResultChoice::Leave);
        }
        None
    }

    /// pvp <-> ai is a hard reset: scores, ball and terminal flag all
    /// clear and the loop keeps running in the new mode.
    fn switch_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Pvp => Mode::Ai,
            Mode::Ai => Mode::Pvp,
        };
        info!("mode switched to {}, restarting match", mode_label(self.mode));
        self.restart();
    }

    fn restart(&mut self) {
        self.sim.reset_match();
        self.ai.reset();
        self.phase = Phase::Running;
    }

    fn report(&self, reporter: &dyn MatchReporter) {
        let report = MatchReport {
            user_score: self.sim.state.left_score,
            opponent_score: self.sim.state.right_score,
            opponent_label: match self.mode {
                Mode::Ai => AI_OPPONENT_LABEL.to_string(),
                Mode::Pvp => self.config.right_name.clone(),
            },
        };
        // Best-effort: a failed report never blocks the result screen.
        if let Err(err) = reporter.record_match(&report) {
            warn!("failed to record match result: {err}");
        }
    }

    fn name_of(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.config.left_name,
            Side::Right => &self.config.right_name,
        }
    }

    fn finished(&self, winner: Side) -> SessionOutcome {
        SessionOutcome::Finished {
            winner,
            left_score: self.sim.state.left_score,
            right_score: self.sim.state.right_score,
        }
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Pvp => "1v1 local",
        Mode::Ai => "1vAI local",
    }
}
