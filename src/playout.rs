//! Random legal playouts.
//!
//! Used to exercise the engine over many positions: each turn picks a slide
//! count and then a legal turn uniformly at random, with no evaluation at all.
use crate::engine::{GameState, Outcome, TurnResult, MAX_SLIDES};
use crate::error::MoveError;
use crate::movegen::MoveSequence;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// What happened during one random game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayoutReport {
    /// Completed non-terminal turns.
    pub turns: u32,
    /// Set if a piece was pushed into a hole.
    pub outcome: Option<Outcome>,
    /// Set if the player to move had no legal turn at all.
    pub stalled: bool,
    /// Completed pushes after which the board did not hold exactly one anchor.
    pub anchor_violations: u32,
}

impl PlayoutReport {
    pub fn finished(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Plays random legal turns from `initial` until the game ends, the player to
/// move is stuck, or `max_turns` turns have been played.
///
/// # Errors
/// Returns the `MoveError` if the engine rejects a turn its own move generator
/// produced, which means the two disagree.
pub fn random_playout<R: Rng + ?Sized>(
    initial: &GameState,
    max_turns: u32,
    rng: &mut R,
) -> Result<PlayoutReport, MoveError> {
    let mut game = initial.clone();
    let mut report = PlayoutReport {
        turns: 0,
        outcome: game.outcome(),
        stalled: false,
        anchor_violations: 0,
    };

    let last_turn = initial.turn().saturating_add(max_turns);
    while !game.is_game_over() && game.turn() < last_turn {
        let Some(turn) = pick_turn(&game, rng)? else {
            debug!(turn = game.turn(), player = %game.current_player(), "no legal turn");
            report.stalled = true;
            break;
        };

        let result = game.apply_move(&turn)?;
        if game.board().count_anchored() != 1 {
            warn!(
                turn = game.turn(),
                anchored = game.board().count_anchored(),
                "anchor invariant broken"
            );
            report.anchor_violations += 1;
        }
        if let TurnResult::GameOver(outcome) = result {
            report.outcome = Some(outcome);
        }
    }

    report.turns = game.turn() - initial.turn();
    Ok(report)
}

fn pick_turn<R: Rng + ?Sized>(
    game: &GameState,
    rng: &mut R,
) -> Result<Option<MoveSequence>, MoveError> {
    let mut slide_counts: Vec<usize> = (0..=MAX_SLIDES).collect();
    slide_counts.shuffle(rng);
    for num_slides in slide_counts {
        let candidates: Vec<_> = game.legal_moves(num_slides)?.collect();
        if let Some(turn) = candidates.choose(rng) {
            return Ok(Some(turn.clone()));
        }
    }
    Ok(None)
}
