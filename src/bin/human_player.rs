use anyhow::{Context, Result};
use clap::Parser;
use pushfight::engine::{GameState, TurnResult};
use pushfight::utils::{board_from_text, parse_moves};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play Push Fight at the terminal", long_about = None)]
struct Args {
    /// Start from this board file (4 lines of 8 characters) instead of the standard layout
    #[clap(short, long)]
    board: Option<PathBuf>,

    /// Don't count the legal 0, 1 and 2-slide turns before each move
    #[clap(long)]
    no_counts: bool,
}

fn load_game(path: Option<&PathBuf>) -> Result<GameState> {
    let Some(path) = path else {
        return Ok(GameState::new());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file {}", path.display()))?;
    let board = board_from_text(&content)
        .map_err(|e| anyhow::anyhow!("Invalid board format: {}", e))?;
    Ok(GameState::new_with_board(board))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = load_game(args.board.as_ref())?;
    info!(turn = game.turn(), "starting game");
    println!("Welcome to Push Fight!");

    loop {
        println!("---------------------");
        println!("{}", game.board());

        if let Some(outcome) = game.outcome() {
            println!("GAME OVER! {} wins.", outcome.winner);
            println!("Turns played: {}", game.turn());
            break;
        }

        println!("Turn {}, {} to move", game.turn() + 1, game.current_player());
        if !args.no_counts {
            let counts = game.count_moves();
            println!(
                "Legal turns: {} with no slides, {} with one, {} with two",
                counts[0], counts[1], counts[2]
            );
        }

        print!("Enter up to two slides and a push (e.g. B4B3 C3C2 C4C5), or 'q' to quit: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        let coords = match parse_moves(trimmed_input) {
            Ok(coords) => coords,
            Err(e) => {
                println!("Invalid input: {}", e);
                continue;
            }
        };
        match game.apply_coords(&coords) {
            Ok(TurnResult::Continues) => println!("Move processed."),
            Ok(TurnResult::GameOver(outcome)) => {
                println!("{:?} {:?} fell into a hole!", outcome.eliminated.color, outcome.eliminated.role)
            }
            Err(e) => println!("Illegal move: {}", e),
        }
    }
    Ok(())
}
