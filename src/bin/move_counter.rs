use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use pushfight::engine::{Board, Color, MAX_SLIDES};
use pushfight::movegen::{count_moves, legal_moves};
use pushfight::utils::{board_from_text, encode_sequence};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Count the legal turns in a Push Fight position", long_about = None)]
struct Args {
    /// Path to the board file (4 lines of 8 characters); the standard layout if omitted
    board_file: Option<PathBuf>,

    /// Side to move
    #[clap(short, long, value_enum, default_value = "white")]
    player: Side,

    /// Also print every turn with this many slides in move notation
    #[clap(short, long)]
    list: Option<usize>,
}

fn read_board_file(path: &PathBuf) -> Result<Board> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    board_from_text(&content).map_err(|e| anyhow::anyhow!("Invalid board format: {}", e))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let board = match &args.board_file {
        Some(path) => {
            info!(path = %path.display(), "loading board");
            read_board_file(path)?
        }
        None => Board::standard(),
    };
    let player = Color::from(args.player);

    println!("Position:\n{}\n", board);
    let counts = count_moves(&board, player);
    for (slides, count) in counts.iter().enumerate() {
        println!("{} to move, {} slide(s): {} turns", player, slides, count);
    }
    println!("Total: {}", counts.iter().sum::<usize>());

    if let Some(num_slides) = args.list {
        if num_slides > MAX_SLIDES {
            bail!("--list takes 0 to {} slides, got {}", MAX_SLIDES, num_slides);
        }
        println!("\nTurns with {} slide(s):", num_slides);
        for seq in legal_moves(&board, player, num_slides)? {
            let text = encode_sequence(&seq).map_err(|e| anyhow::anyhow!(e))?;
            println!("  {}", text);
        }
    }
    Ok(())
}
