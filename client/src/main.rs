use clap::Parser;
use log::info;
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

use engine::{Bracket, MatchStart};

use client::menu::{self, BracketChoice, HomeChoice};
use client::rendering;
use client::report::{LoggingReporter, MatchReporter};
use client::session::{GameConfig, MatchSession, SessionOutcome};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Display name for the acting player
    #[arg(short = 'n', long, default_value = "Player 1")]
    name: String,

    /// Fixed RNG seed for deterministic serves and AI aim
    #[arg(long)]
    seed: Option<u64>,

    /// First score that wins a match
    #[arg(short = 't', long, default_value_t = engine::DEFAULT_TARGET_SCORE)]
    target_score: u8,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Pong".to_string(),
        window_width: rendering::WINDOW_WIDTH,
        window_height: rendering::WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let reporter = LoggingReporter;

    info!("starting client as {}", args.name);
    info!("Controls: W/S left paddle, Up/Down right paddle, M mode, Esc leave");

    let mut bracket_rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        match menu::home_screen(&args.name).await {
            HomeChoice::Quit => break,
            HomeChoice::FreePlay => {
                let config = GameConfig::free_play(&args.name);
                let session = MatchSession::new(config, args.target_score, args.seed);
                session.run(&reporter).await;
            }
            HomeChoice::Tournament => {
                run_tournament(&args, &reporter, &mut bracket_rng).await;
            }
        }
    }
}

/// Runs one tournament from setup to champion (or until the player
/// leaves). Dropping the bracket on the way out clears the tournament.
async fn run_tournament(args: &Args, reporter: &dyn MatchReporter, rng: &mut StdRng) {
    let Some(setup) = menu::tournament_setup_screen().await else {
        return;
    };
    let mut bracket = Bracket::new(&args.name, &setup.local_names, setup.ai_count, rng);

    loop {
        match menu::bracket_screen(&bracket).await {
            BracketChoice::Home => return,
            BracketChoice::NewTournament => {
                let Some(setup) = menu::tournament_setup_screen().await else {
                    return;
                };
                bracket = Bracket::new(&args.name, &setup.local_names, setup.ai_count, rng);
            }
            BracketChoice::PlaySemifinal(index) => {
                if let Some(start) = bracket.start_semifinal(index, rng) {
                    play_bracket_match(&mut bracket, start, args, reporter).await;
                }
            }
            BracketChoice::PlayFinal => {
                if let Some(start) = bracket.start_final(rng) {
                    play_bracket_match(&mut bracket, start, args, reporter).await;
                }
            }
        }

        if let Some(champion) = bracket.champion() {
            menu::champion_screen(&champion.name).await;
            return;
        }
    }
}

async fn play_bracket_match(
    bracket: &mut Bracket,
    start: MatchStart,
    args: &Args,
    reporter: &dyn MatchReporter,
) {
    match start {
        // Both seats AI: the bracket already flipped the coin, nothing
        // to play or render.
        MatchStart::Simulated { winner } => {
            info!("all-AI match simulated, {} advances", winner.name);
        }
        MatchStart::Session(plan) => {
            let config = GameConfig::tournament(&plan);
            let session = MatchSession::new(config, args.target_score, args.seed);
            match session.run(reporter).await {
                SessionOutcome::Finished { winner, .. } => {
                    bracket.record_winner(winner);
                }
                SessionOutcome::Abandoned => bracket.cancel_pending(),
            }
        }
    }
}
