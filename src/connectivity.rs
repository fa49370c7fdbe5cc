//! Region labeling over the empty cells of a board.
//!
//! A slide is legal when the moving piece and its destination lie in the same
//! connected region of passable cells. Passable cells are the empty ones plus
//! the slide origin, which the piece vacates. Cells are connected horizontally
//! and vertically, never diagonally.
use crate::engine::{is_on_board, Board, Cell, Color, Pos, COLS, ROWS};
use crate::error::MoveError;
use std::collections::VecDeque;

/// Connected-component labels for one board snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionMap {
    labels: [[Option<usize>; COLS]; ROWS],
    regions: usize,
}

impl RegionMap {
    /// Labels the passable cells of `board`.
    ///
    /// Every `Cell::Empty` is passable, and so is `origin` when given, whatever
    /// it holds. Labels are numbered from 0 in row-major order of each
    /// region's first cell.
    ///
    /// # Examples
    /// ```
    /// use pushfight::connectivity::RegionMap;
    /// use pushfight::engine::Board;
    /// let regions = RegionMap::label(&Board::standard(), Some((2, 2)));
    /// assert!(regions.connected((2, 2), (3, 2)));
    /// assert!(!regions.connected((2, 2), (3, 5)));
    /// ```
    pub fn label(board: &Board, origin: Option<Pos>) -> Self {
        let passable = |r: usize, c: usize| origin == Some((r, c)) || board.get(r, c).is_empty();

        let mut labels = [[None; COLS]; ROWS];
        let mut regions = 0;
        let mut q = VecDeque::new();

        let dr = [-1, 1, 0, 0];
        let dc = [0, 0, -1, 1];

        for r_idx in 0..ROWS {
            for c_idx in 0..COLS {
                // Skip cells already labelled or blocked
                if labels[r_idx][c_idx].is_some() || !passable(r_idx, c_idx) {
                    continue;
                }
                // Unlabelled passable cell: start a new region here
                let label = regions;
                regions += 1;
                labels[r_idx][c_idx] = Some(label);
                q.push_back((r_idx, c_idx));

                while let Some((curr_r, curr_c)) = q.pop_front() {
                    // Check 4 neighbors (up, down, left, right)
                    for i in 0..4 {
                        let (Some(nr), Some(nc)) = (
                            curr_r.checked_add_signed(dr[i]),
                            curr_c.checked_add_signed(dc[i]),
                        ) else {
                            continue;
                        };
                        // Same region if on board, unvisited and passable
                        if is_on_board(nr, nc) && labels[nr][nc].is_none() && passable(nr, nc) {
                            labels[nr][nc] = Some(label);
                            q.push_back((nr, nc));
                        }
                    }
                }
            }
        }

        RegionMap { labels, regions }
    }

    /// Returns the label of `(r, c)`, or `None` for a blocked or off-board cell.
    pub fn region_of(&self, r: usize, c: usize) -> Option<usize> {
        if is_on_board(r, c) {
            self.labels[r][c]
        } else {
            None
        }
    }

    /// Number of distinct regions.
    pub fn region_count(&self) -> usize {
        self.regions
    }

    /// Returns `true` if `a` and `b` are both passable and share a region.
    pub fn connected(&self, a: Pos, b: Pos) -> bool {
        match (self.region_of(a.0, a.1), self.region_of(b.0, b.1)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Row-major list of the cells sharing `origin`'s region, `origin` excluded.
    pub fn reachable_from(&self, origin: Pos) -> Vec<Pos> {
        let Some(label) = self.region_of(origin.0, origin.1) else {
            return Vec::new();
        };
        let mut cells = Vec::new();
        for r in 0..ROWS {
            for c in 0..COLS {
                if (r, c) != origin && self.labels[r][c] == Some(label) {
                    cells.push((r, c));
                }
            }
        }
        cells
    }
}

/// Returns `true` if the piece at `from` could travel to the empty cell `to`.
///
/// This is pure geometry: ownership is not checked. `from == to` is never a path.
pub fn has_path(board: &Board, from: Pos, to: Pos) -> bool {
    if from == to || !is_on_board(from.0, from.1) || !is_on_board(to.0, to.1) {
        return false;
    }
    if board.get(from.0, from.1).piece().is_none() || !board.get(to.0, to.1).is_empty() {
        return false;
    }
    RegionMap::label(board, Some(from)).connected(from, to)
}

/// Checks that `player` may slide the piece at `from` to `to`.
///
/// # Errors
/// * `OffBoard` if either position is outside the grid.
/// * `NotAPiece` if `from` is empty or a hole.
/// * `DestinationOccupied` if `to` is not empty (this covers `from == to`).
/// * `WrongPlayer` if the piece belongs to the other side.
/// * `PathBlocked` if no chain of empty cells joins the two.
pub fn check_slide(board: &Board, player: Color, from: Pos, to: Pos) -> Result<(), MoveError> {
    if !is_on_board(from.0, from.1) || !is_on_board(to.0, to.1) {
        return Err(MoveError::OffBoard);
    }
    let piece = board
        .get(from.0, from.1)
        .piece()
        .ok_or(MoveError::NotAPiece)?;
    if board.get(to.0, to.1) != Cell::Empty {
        return Err(MoveError::DestinationOccupied);
    }
    if piece.color != player {
        return Err(MoveError::WrongPlayer);
    }
    if !RegionMap::label(board, Some(from)).connected(from, to) {
        return Err(MoveError::PathBlocked);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn walled_board() -> Board {
        // Column 4 is a wall of pieces splitting the board in two.
        board_from_str_array(&[
            "##..w..#", //
            "m...v...",
            "....v...",
            "#...w.##",
        ])
        .unwrap()
    }

    #[test]
    fn test_label_splits_on_walls() {
        let board = walled_board();
        let regions = RegionMap::label(&board, None);
        assert_eq!(regions.region_count(), 2);
        assert!(regions.connected((0, 2), (3, 3)));
        assert!(regions.connected((0, 5), (3, 5)));
        assert!(!regions.connected((1, 3), (1, 5)));
        assert_eq!(regions.region_of(0, 0), None);
        assert_eq!(regions.region_of(1, 0), None);
        assert_eq!(regions.region_of(1, 4), None);
    }

    #[test]
    fn test_origin_opens_a_gap() {
        let board = walled_board();
        let regions = RegionMap::label(&board, Some((1, 4)));
        assert_eq!(regions.region_count(), 1);
        assert!(regions.connected((1, 3), (1, 5)));
    }

    #[test]
    fn test_reachable_from_excludes_origin() {
        let board = board_from_str_array(&[
            "##mn...#", //
            "nmnm....",
            "........",
            "#.....##",
        ])
        .unwrap();
        // The pusher at A3 is boxed in by the hole, its own pieces and the top wall.
        let regions = RegionMap::label(&board, Some((0, 2)));
        assert!(regions.reachable_from((0, 2)).is_empty());

        // The mover at A4 opens onto every empty cell of the board.
        let regions = RegionMap::label(&board, Some((0, 3)));
        let reachable = regions.reachable_from((0, 3));
        assert!(!reachable.contains(&(0, 3)));
        assert!(reachable.contains(&(0, 4)));
        assert!(reachable.contains(&(2, 0)));
        assert_eq!(reachable.len(), 3 + 4 + 8 + 5);
    }

    #[test]
    fn test_check_slide_errors() {
        let board = walled_board();
        assert_eq!(
            check_slide(&board, Color::White, (1, 1), (1, 2)),
            Err(MoveError::NotAPiece)
        );
        assert_eq!(
            check_slide(&board, Color::White, (0, 0), (1, 2)),
            Err(MoveError::NotAPiece)
        );
        assert_eq!(
            check_slide(&board, Color::White, (1, 0), (1, 4)),
            Err(MoveError::DestinationOccupied)
        );
        assert_eq!(
            check_slide(&board, Color::White, (1, 0), (0, 1)),
            Err(MoveError::DestinationOccupied)
        );
        assert_eq!(
            check_slide(&board, Color::White, (1, 0), (1, 0)),
            Err(MoveError::DestinationOccupied)
        );
        assert_eq!(
            check_slide(&board, Color::White, (1, 4), (1, 5)),
            Err(MoveError::WrongPlayer)
        );
        assert_eq!(
            check_slide(&board, Color::White, (1, 0), (1, 6)),
            Err(MoveError::PathBlocked)
        );
        assert_eq!(
            check_slide(&board, Color::White, (1, 0), (4, 0)),
            Err(MoveError::OffBoard)
        );
        assert_eq!(check_slide(&board, Color::White, (1, 0), (3, 3)), Ok(()));
        assert_eq!(check_slide(&board, Color::Black, (1, 4), (1, 6)), Ok(()));
    }

    #[test]
    fn test_has_path_is_symmetric() {
        let board = Board::standard();
        for r0 in 0..ROWS {
            for c0 in 0..COLS {
                if board.get(r0, c0).piece().is_none() {
                    continue;
                }
                for r1 in 0..ROWS {
                    for c1 in 0..COLS {
                        if !board.get(r1, c1).is_empty() {
                            continue;
                        }
                        let forward = has_path(&board, (r0, c0), (r1, c1));
                        let mut moved = board.clone();
                        moved.move_piece((r0, c0), (r1, c1));
                        let backward = has_path(&moved, (r1, c1), (r0, c0));
                        assert_eq!(
                            forward, backward,
                            "asymmetric path between ({}, {}) and ({}, {})",
                            r0, c0, r1, c1
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_has_path_rejects_null_slide() {
        let board = Board::standard();
        assert!(!has_path(&board, (2, 2), (2, 2)));
        assert!(has_path(&board, (2, 2), (2, 1)));
    }
}
