//! Push resolution.
//!
//! A push walks from the cell in front of the pusher along the push direction
//! until it meets the end of the chain. `resolve` only reads the board and
//! describes what would happen; `PushPlan::apply` performs it.
use crate::engine::{is_on_board, Board, Cell, Color, Direction, Piece, Pos, Role, COLS, ROWS};
use crate::error::MoveError;

/// How a push chain terminates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PushKind {
    /// The chain ends at an empty cell and shifts into it.
    Shift,
    /// The chain ends at a hole; its front piece falls in and the game ends.
    Eject,
}

/// A validated push, ready to be applied to the board it was resolved on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PushPlan {
    from: Pos,
    direction: Direction,
    end: Pos,
    kind: PushKind,
}

impl PushPlan {
    pub fn from(&self) -> Pos {
        self.from
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The empty cell the chain moves into, or the hole it falls into.
    pub fn end(&self) -> Pos {
        self.end
    }

    pub fn kind(&self) -> PushKind {
        self.kind
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == PushKind::Eject
    }

    /// Number of pieces shoved, the pusher excluded.
    pub fn chain_len(&self) -> usize {
        self.from.0.abs_diff(self.end.0) + self.from.1.abs_diff(self.end.1) - 1
    }

    /// Shifts the chain one cell along the push direction.
    ///
    /// Each cell from the end of the chain back to the pusher takes the
    /// content of its rearward neighbour, and the pusher's old cell is
    /// emptied. Afterwards the pusher, now one cell ahead, is the only
    /// anchored piece.
    ///
    /// # Returns
    /// The piece that fell into the hole for a `PushKind::Eject` plan,
    /// `None` otherwise.
    pub fn apply(&self, board: &mut Board) -> Option<Piece> {
        let (dr, dc) = self.direction.delta();
        let back = |(r, c): Pos| (r.wrapping_add_signed(-dr), c.wrapping_add_signed(-dc));

        let mut ejected = None;
        let mut cursor = self.end;
        if self.kind == PushKind::Eject {
            // The hole keeps its cell; the piece in front of it falls in.
            cursor = back(self.end);
            ejected = board.get(cursor.0, cursor.1).piece();
        }
        // Walk back towards the pusher, pulling each piece forward one cell.
        while cursor != self.from {
            let prev = back(cursor);
            board.set(cursor.0, cursor.1, board.get(prev.0, prev.1));
            cursor = prev;
        }
        board.set(self.from.0, self.from.1, Cell::Empty);

        // Only the piece that just pushed stays anchored.
        board.clear_anchor();
        let landed = (
            self.from.0.wrapping_add_signed(dr),
            self.from.1.wrapping_add_signed(dc),
        );
        if let Cell::Occupied(piece) = board.get(landed.0, landed.1) {
            board.set(landed.0, landed.1, Cell::Occupied(piece.with_anchor()));
        }
        ejected
    }
}

/// Checks that `player` may push from `from` in `direction`, and finds where
/// the chain ends.
///
/// The walk checks the column range in its loop condition and the row range
/// inside the loop, so a chain leaving through the left or right edge is
/// reported as `HitTheWall` and one leaving through the top or bottom edge as
/// `PushedAgainstWall`.
///
/// # Errors
/// * `OffBoard` if `from` is outside the grid.
/// * `NotAPusher` if `from` holds no pusher.
/// * `WrongPlayer` if the pusher belongs to the other side.
/// * `NotPushingAnything` if the cell in front of the pusher holds no piece.
/// * `PushedIntoAnchor` if the chain contains the anchored piece.
/// * `PushedAgainstWall` / `HitTheWall` if the chain runs into the board edge.
///
/// # Examples
/// ```
/// use pushfight::engine::{Board, Color, Direction};
/// use pushfight::error::MoveError;
/// use pushfight::push::resolve;
/// let board = Board::standard();
/// let plan = resolve(&board, Color::White, (2, 3), Direction::Right).unwrap();
/// assert_eq!(plan.end(), (2, 5));
/// assert_eq!(
///     resolve(&board, Color::White, (2, 2), Direction::Up),
///     Err(MoveError::NotPushingAnything)
/// );
/// ```
pub fn resolve(
    board: &Board,
    player: Color,
    from: Pos,
    direction: Direction,
) -> Result<PushPlan, MoveError> {
    check_pusher(board, player, from)?;
    let front = direction
        .step(from)
        .filter(|&(r, c)| board.get(r, c).piece().is_some())
        .ok_or(MoveError::NotPushingAnything)?;

    let (dr, dc) = direction.delta();
    let (mut r, mut c) = (front.0 as isize, front.1 as isize);
    // Leaving through the left or right edge ends the loop.
    while (0..COLS as isize).contains(&c) {
        // Top and bottom edges are checked here.
        if !(0..ROWS as isize).contains(&r) {
            return Err(MoveError::PushedAgainstWall);
        }
        let end = (r as usize, c as usize);
        let kind = match board.get(end.0, end.1) {
            Cell::Empty => PushKind::Shift,
            Cell::Hole => PushKind::Eject,
            Cell::Occupied(piece) if piece.anchored => return Err(MoveError::PushedIntoAnchor),
            Cell::Occupied(_) => {
                // Still inside the chain, keep walking.
                r += dr;
                c += dc;
                continue;
            }
        };
        return Ok(PushPlan {
            from,
            direction,
            end,
            kind,
        });
    }
    Err(MoveError::HitTheWall)
}

/// Works out the push direction for a pusher at `from` aiming at `target`,
/// as written in move notation.
///
/// The pusher and the target are checked before the distance, so a mover or
/// an empty target is reported as such even when `target` is not adjacent.
///
/// # Errors
/// * `OffBoard` if either position is outside the grid.
/// * `NotAPusher` / `WrongPlayer` as for [`resolve`].
/// * `NotPushingAnything` if `target` holds no piece.
/// * `PushDistanceInvalid` if `target` is not orthogonally adjacent to `from`.
pub fn aim(board: &Board, player: Color, from: Pos, target: Pos) -> Result<Direction, MoveError> {
    if !is_on_board(target.0, target.1) {
        return Err(MoveError::OffBoard);
    }
    check_pusher(board, player, from)?;
    if board.get(target.0, target.1).piece().is_none() {
        return Err(MoveError::NotPushingAnything);
    }
    Direction::between(from, target).ok_or(MoveError::PushDistanceInvalid)
}

fn check_pusher(board: &Board, player: Color, from: Pos) -> Result<(), MoveError> {
    if !is_on_board(from.0, from.1) {
        return Err(MoveError::OffBoard);
    }
    match board.get(from.0, from.1) {
        Cell::Occupied(piece) if piece.role == Role::Pusher && piece.color == player => Ok(()),
        Cell::Occupied(piece) if piece.role == Role::Pusher => Err(MoveError::WrongPlayer),
        _ => Err(MoveError::NotAPusher),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn rows(board: &Board) -> Vec<String> {
        board.to_rows().to_vec()
    }

    #[test]
    fn test_push_shifts_single_piece() {
        let mut board = board_from_str_array(&[
            "##.m...#", //
            "...v....",
            "........",
            "#.....##",
        ])
        .unwrap();
        let plan = resolve(&board, Color::White, (0, 3), Direction::Down).unwrap();
        assert_eq!(plan.kind(), PushKind::Shift);
        assert_eq!(plan.end(), (2, 3));
        assert_eq!(plan.chain_len(), 1);
        assert_eq!(plan.apply(&mut board), None);
        assert_eq!(
            rows(&board),
            ["##.....#", "...M....", "...v....", "#.....##"]
        );
    }

    #[test]
    fn test_push_shifts_whole_chain() {
        let mut board = board_from_str_array(&[
            "##.....#", //
            ".mnvw...",
            "........",
            "#.....##",
        ])
        .unwrap();
        let plan = resolve(&board, Color::White, (1, 1), Direction::Right).unwrap();
        assert_eq!(plan.end(), (1, 5));
        assert_eq!(plan.chain_len(), 3);
        plan.apply(&mut board);
        assert_eq!(
            rows(&board),
            ["##.....#", "..Mnvw..", "........", "#.....##"]
        );
    }

    #[test]
    fn test_push_moves_anchor() {
        let mut board = board_from_str_array(&[
            "##.....#", //
            ".mv.....",
            "...W....",
            "#.....##",
        ])
        .unwrap();
        let plan = resolve(&board, Color::White, (1, 1), Direction::Right).unwrap();
        plan.apply(&mut board);
        assert_eq!(board.count_anchored(), 1);
        assert_eq!(board.anchor(), Some((1, 2)));
        assert_eq!(
            board.get(2, 3),
            Cell::Occupied(Piece::pusher(Color::Black))
        );
    }

    #[test]
    fn test_push_into_empty_fails() {
        let board = Board::standard();
        assert_eq!(
            resolve(&board, Color::White, (2, 2), Direction::Left),
            Err(MoveError::NotPushingAnything)
        );
        // The cell in front of the pusher is off the board.
        assert_eq!(
            resolve(&board, Color::White, (0, 3), Direction::Up),
            Err(MoveError::NotPushingAnything)
        );
    }

    #[test]
    fn test_push_precondition_errors() {
        let board = Board::standard();
        assert_eq!(
            resolve(&board, Color::White, (1, 3), Direction::Right),
            Err(MoveError::NotAPusher)
        );
        assert_eq!(
            resolve(&board, Color::White, (1, 1), Direction::Right),
            Err(MoveError::NotAPusher)
        );
        assert_eq!(
            resolve(&board, Color::White, (0, 0), Direction::Right),
            Err(MoveError::NotAPusher)
        );
        assert_eq!(
            resolve(&board, Color::White, (1, 5), Direction::Left),
            Err(MoveError::WrongPlayer)
        );
        assert_eq!(
            resolve(&board, Color::White, (5, 5), Direction::Left),
            Err(MoveError::OffBoard)
        );
    }

    #[test]
    fn test_aim_checks_pieces_before_distance() {
        let board = Board::standard();
        assert_eq!(aim(&board, Color::White, (2, 3), (2, 4)), Ok(Direction::Right));
        // B4 holds a mover, so the far target does not matter.
        assert_eq!(
            aim(&board, Color::White, (1, 3), (1, 5)),
            Err(MoveError::NotAPusher)
        );
        assert_eq!(
            aim(&board, Color::White, (1, 5), (1, 3)),
            Err(MoveError::WrongPlayer)
        );
        assert_eq!(
            aim(&board, Color::White, (2, 2), (2, 0)),
            Err(MoveError::NotPushingAnything)
        );
        assert_eq!(
            aim(&board, Color::White, (2, 3), (1, 5)),
            Err(MoveError::PushDistanceInvalid)
        );
        assert_eq!(
            aim(&board, Color::White, (0, 3), (1, 4)),
            Err(MoveError::PushDistanceInvalid)
        );
        assert_eq!(
            aim(&board, Color::White, (2, 3), (4, 3)),
            Err(MoveError::OffBoard)
        );
    }

    #[test]
    fn test_push_into_anchor_fails() {
        let board = board_from_str_array(&[
            "##.....#", //
            ".mnV....",
            "........",
            "#.....##",
        ])
        .unwrap();
        assert_eq!(
            resolve(&board, Color::White, (1, 1), Direction::Right),
            Err(MoveError::PushedIntoAnchor)
        );
    }

    #[test]
    fn test_push_against_row_wall_fails() {
        let board = Board::standard();
        // A4 down: B4, C4 and D4 are all occupied, then the bottom edge.
        assert_eq!(
            resolve(&board, Color::White, (0, 3), Direction::Down),
            Err(MoveError::PushedAgainstWall)
        );
    }

    #[test]
    fn test_push_against_column_wall_fails() {
        let board = board_from_str_array(&[
            "##.....#", //
            "....mvwv",
            "........",
            "#.....##",
        ])
        .unwrap();
        assert_eq!(
            resolve(&board, Color::White, (1, 4), Direction::Right),
            Err(MoveError::HitTheWall)
        );
    }

    #[test]
    fn test_push_into_hole_ejects_front_piece() {
        let mut board = board_from_str_array(&[
            "##nv...#", //
            "...m....",
            "........",
            "#.....##",
        ])
        .unwrap();
        // Pushing A4 upwards from B4 runs into the top wall.
        assert_eq!(
            resolve(&board, Color::White, (1, 3), Direction::Up),
            Err(MoveError::PushedAgainstWall)
        );

        board.set(0, 4, Cell::Occupied(Piece::pusher(Color::Black)));
        let plan = resolve(&board, Color::Black, (0, 4), Direction::Left).unwrap();
        assert!(plan.is_terminal());
        assert_eq!(plan.end(), (0, 1));
        assert_eq!(plan.chain_len(), 2);
        let ejected = plan.apply(&mut board);
        assert_eq!(ejected, Some(Piece::mover(Color::White)));
        assert_eq!(
            rows(&board),
            ["##vW...#", "...m....", "........", "#.....##"]
        );
    }

    #[test]
    fn test_self_elimination_is_a_legal_push() {
        let mut board = board_from_str_array(&[
            "##.....#", //
            "n.......",
            "m.......",
            "#.....##",
        ])
        .unwrap();
        let plan = resolve(&board, Color::White, (2, 0), Direction::Up).unwrap();
        assert!(plan.is_terminal());
        assert_eq!(plan.end(), (0, 0));
        assert_eq!(plan.apply(&mut board), Some(Piece::mover(Color::White)));
        assert_eq!(board.get(1, 0), Cell::Occupied(Piece::pusher(Color::White).with_anchor()));
        assert_eq!(board.get(2, 0), Cell::Empty);
    }
}
