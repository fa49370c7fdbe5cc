use anyhow::Result;
use clap::Parser;
use pushfight::engine::{Color, GameState};
use pushfight::playout::random_playout;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play random legal Push Fight games from the standard layout", long_about = None)]
struct Args {
    /// Number of games to play
    #[clap(short, long, default_value_t = 100)]
    games: u64,

    /// Seed of the first game; game i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Games still running after this many turns are counted as unfinished
    #[clap(short, long, default_value_t = 200)]
    max_turns: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(games = args.games, seed = args.seed, max_turns = args.max_turns, "starting playouts");

    let initial = GameState::new();
    let mut white_wins = 0;
    let mut black_wins = 0;
    let mut stalled = 0;
    let mut unfinished = 0;
    let mut anchor_violations = 0;
    let mut finished_turns = 0u64;

    for game_idx in 0..args.games {
        let current_seed = args.seed + game_idx;
        let mut rng = SmallRng::seed_from_u64(current_seed);
        let report = random_playout(&initial, args.max_turns, &mut rng)?;
        debug!(seed = current_seed, ?report, "playout finished");

        anchor_violations += report.anchor_violations;
        match report.outcome {
            Some(outcome) => {
                finished_turns += u64::from(report.turns);
                match outcome.winner {
                    Color::White => white_wins += 1,
                    Color::Black => black_wins += 1,
                }
            }
            None if report.stalled => stalled += 1,
            None => unfinished += 1,
        }
    }

    let finished = white_wins + black_wins;
    println!("Games played: {}", args.games);
    println!("White wins:   {}", white_wins);
    println!("Black wins:   {}", black_wins);
    println!("Stalled:      {}", stalled);
    println!("Unfinished:   {}", unfinished);
    if finished > 0 {
        println!(
            "Average length of finished games: {:.1} turns",
            finished_turns as f64 / finished as f64
        );
    }
    if anchor_violations > 0 {
        warn!(anchor_violations, "anchor invariant was broken");
    }
    println!("Anchor violations: {}", anchor_violations);
    Ok(())
}
