//! Exhaustive legal-move enumeration.
//!
//! A turn is zero to two slides followed by one push. Sequences with slides
//! are explored on private copies of the board, so the board handed in is
//! never modified.
use crate::connectivity::RegionMap;
use crate::engine::{Board, Cell, Color, Direction, Move, Pos, Role, MAX_SLIDES};
use crate::error::MoveError;
use crate::push;
use tracing::debug;

/// One complete turn: the slides in order, then the push.
pub type MoveSequence = Vec<Move>;

/// Lazy iterator over legal turns, see [`legal_moves`].
pub struct LegalMoves {
    inner: Box<dyn Iterator<Item = MoveSequence>>,
}

impl LegalMoves {
    /// An iterator that yields nothing, for finished games.
    pub fn empty() -> Self {
        LegalMoves {
            inner: Box::new(std::iter::empty()),
        }
    }
}

impl Iterator for LegalMoves {
    type Item = MoveSequence;

    fn next(&mut self) -> Option<MoveSequence> {
        self.inner.next()
    }
}

/// Every push `player` can make right now.
///
/// Pushers are visited in row-major order, directions in the order up, down,
/// left, right.
pub fn legal_pushes(board: &Board, player: Color) -> Vec<Move> {
    let mut pushes = Vec::new();
    for from in board.pieces(player) {
        if !matches!(board.get(from.0, from.1), Cell::Occupied(p) if p.role == Role::Pusher) {
            continue;
        }
        for direction in Direction::ALL {
            if push::resolve(board, player, from, direction).is_ok() {
                pushes.push(Move::Push { from, direction });
            }
        }
    }
    pushes
}

/// Every slide `player` can make right now.
///
/// Pieces are visited in row-major order, and so are the destinations of each
/// piece. A piece never "slides" onto its own cell.
pub fn legal_slides(board: &Board, player: Color) -> Vec<Move> {
    slide_targets(board, player)
        .into_iter()
        .map(|(from, to)| Move::Slide { from, to })
        .collect()
}

/// Lazily enumerates every legal turn for `player` that uses exactly
/// `num_slides` slides.
///
/// Each yielded sequence is accepted by [`GameState::apply_move`] on the same
/// board. The order is deterministic: slide choices vary slowest, the final
/// push fastest.
///
/// # Errors
/// `MoveSequenceLengthInvalid` if `num_slides` is more than [`MAX_SLIDES`].
///
/// # Examples
/// ```
/// use pushfight::engine::{Board, Color};
/// use pushfight::movegen::legal_moves;
/// let board = Board::standard();
/// let pushes: Vec<_> = legal_moves(&board, Color::White, 0).unwrap().collect();
/// assert!(pushes.iter().all(|seq| seq.len() == 1));
/// ```
///
/// [`GameState::apply_move`]: crate::engine::GameState::apply_move
pub fn legal_moves(board: &Board, player: Color, num_slides: usize) -> Result<LegalMoves, MoveError> {
    if num_slides > MAX_SLIDES {
        return Err(MoveError::MoveSequenceLengthInvalid);
    }
    Ok(LegalMoves {
        inner: sequences(board.clone(), player, num_slides),
    })
}

/// Number of legal turns for `player` with 0, 1 and 2 slides.
pub fn count_moves(board: &Board, player: Color) -> [usize; MAX_SLIDES + 1] {
    let counts: [usize; MAX_SLIDES + 1] = std::array::from_fn(|k| sequences(board.clone(), player, k).count());
    debug!(?player, ?counts, "counted legal moves");
    counts
}

fn slide_targets(board: &Board, player: Color) -> Vec<(Pos, Pos)> {
    let mut slides = Vec::new();
    for from in board.pieces(player) {
        // Label with this piece's cell opened up, since it leaves it.
        let regions = RegionMap::label(board, Some(from));
        slides.extend(regions.reachable_from(from).into_iter().map(|to| (from, to)));
    }
    slides
}

fn sequences(board: Board, player: Color, num_slides: usize) -> Box<dyn Iterator<Item = MoveSequence>> {
    if num_slides == 0 {
        return Box::new(legal_pushes(&board, player).into_iter().map(|push| vec![push]));
    }
    let targets = slide_targets(&board, player);
    Box::new(targets.into_iter().flat_map(move |(from, to)| {
        // Each slide gets its own copy of the board to recurse on.
        let mut next = board.clone();
        next.move_piece(from, to);
        let slide = Move::Slide { from, to };
        sequences(next, player, num_slides - 1).map(move |rest| {
            let mut seq = Vec::with_capacity(rest.len() + 1);
            seq.push(slide);
            seq.extend(rest);
            seq
        })
    }))
}
