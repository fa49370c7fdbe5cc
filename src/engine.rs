//! Core game model and turn engine for Push Fight.
//!
//! This module defines the game's fundamental components:
//! - `Cell` / `Piece`: what a square of the board holds.
//! - `Board`: the fixed 4x8 grid with its six holes, plus raw cell access.
//! - `Move`: the two move primitives, slides and pushes.
//! - `GameState`: the authoritative game, which validates and commits whole turns.
use crate::connectivity;
use crate::error::{MoveError, SetupError};
use crate::movegen::{self, LegalMoves};
use crate::push;
use std::fmt;
use tracing::{debug, info, instrument};

/// Number of rows on the board (labelled `A`..`D` in move notation).
pub const ROWS: usize = 4;
/// Number of columns on the board (labelled `1`..`8` in move notation).
pub const COLS: usize = 8;
/// The six cells that are permanently holes.
pub const HOLES: [(usize, usize); 6] = [(0, 0), (0, 1), (0, 7), (3, 0), (3, 6), (3, 7)];
/// Most slides a player may make before pushing.
pub const MAX_SLIDES: usize = 2;

/// A row/column pair, both 0-based.
pub type Pos = (usize, usize);

/// Returns `true` if `(r, c)` lies inside the 4x8 grid.
pub fn is_on_board(r: usize, c: usize) -> bool {
    r < ROWS && c < COLS
}

/// Returns `true` if `(r, c)` is one of the fixed holes.
pub fn is_hole(r: usize, c: usize) -> bool {
    HOLES.contains(&(r, c))
}

/// The two sides. White moves on even turns, Black on odd turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the player to move on the given turn number.
    pub fn from_turn(turn: u32) -> Self {
        if turn % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// What a piece is allowed to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Can only slide.
    Mover,
    /// Can slide and push.
    Pusher,
}

/// A single piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    /// Set on the piece that made the most recent push.
    pub anchored: bool,
}

impl Piece {
    /// Creates an unanchored piece.
    pub fn new(color: Color, role: Role) -> Self {
        Piece {
            color,
            role,
            anchored: false,
        }
    }

    pub fn pusher(color: Color) -> Self {
        Piece::new(color, Role::Pusher)
    }

    pub fn mover(color: Color) -> Self {
        Piece::new(color, Role::Mover)
    }

    /// Returns the same piece with the anchor flag set.
    pub fn with_anchor(mut self) -> Self {
        self.anchored = true;
        self
    }

    /// Converts the piece to its board-text character.
    ///
    /// White uses `m` (pusher) / `n` (mover), Black uses `w` / `v`.
    /// The anchored piece is written in upper case.
    ///
    /// # Examples
    ///
    /// ```
    /// use pushfight::engine::{Color, Piece};
    /// assert_eq!(Piece::pusher(Color::White).to_char(), 'm');
    /// assert_eq!(Piece::mover(Color::Black).with_anchor().to_char(), 'V');
    /// ```
    pub fn to_char(&self) -> char {
        let c = match (self.color, self.role) {
            (Color::White, Role::Pusher) => 'm',
            (Color::White, Role::Mover) => 'n',
            (Color::Black, Role::Pusher) => 'w',
            (Color::Black, Role::Mover) => 'v',
        };
        if self.anchored {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Parses a board-text piece character, the inverse of [`Piece::to_char`].
    pub fn from_char(c: char) -> Option<Self> {
        let piece = match c.to_ascii_lowercase() {
            'm' => Piece::pusher(Color::White),
            'n' => Piece::mover(Color::White),
            'w' => Piece::pusher(Color::Black),
            'v' => Piece::mover(Color::Black),
            _ => return None,
        };
        if c.is_ascii_uppercase() {
            Some(piece.with_anchor())
        } else {
            Some(piece)
        }
    }
}

/// The content of one board square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Permanently impassable; never holds a piece.
    Hole,
    Empty,
    Occupied(Piece),
}

impl Cell {
    /// Returns the piece on this cell, if any.
    pub fn piece(&self) -> Option<Piece> {
        match self {
            Cell::Occupied(piece) => Some(*piece),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    /// Converts the cell to its board-text character (`#` hole, `.` empty).
    pub fn to_char(&self) -> char {
        match self {
            Cell::Hole => '#',
            Cell::Empty => '.',
            Cell::Occupied(piece) => piece.to_char(),
        }
    }

    /// Parses a board-text character, the inverse of [`Cell::to_char`].
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Hole),
            '.' => Some(Cell::Empty),
            _ => Piece::from_char(c).map(Cell::Occupied),
        }
    }
}

/// The four push directions, in the order the move generator tries them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the `(row, column)` unit offset of this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Returns the direction leading from `from` to the orthogonally adjacent `to`.
    ///
    /// Returns `None` when the two cells are not exactly one step apart.
    pub fn between(from: Pos, to: Pos) -> Option<Self> {
        let dr = to.0 as isize - from.0 as isize;
        let dc = to.1 as isize - from.1 as isize;
        Direction::ALL
            .into_iter()
            .find(|direction| direction.delta() == (dr, dc))
    }

    /// Returns the on-board neighbour of `pos` in this direction.
    pub fn step(self, pos: Pos) -> Option<Pos> {
        let (dr, dc) = self.delta();
        let r = pos.0.checked_add_signed(dr)?;
        let c = pos.1.checked_add_signed(dc)?;
        is_on_board(r, c).then_some((r, c))
    }
}

/// One move primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Relocate a piece through connected empty space.
    Slide { from: Pos, to: Pos },
    /// Shove the chain in front of a pusher one cell along `direction`.
    Push { from: Pos, direction: Direction },
}

impl Move {
    /// Returns the `(from_row, from_col, to_row, to_col)` tuple used by move notation.
    ///
    /// For a push the target is the cell in front of the pusher; `None` is
    /// returned when that cell lies off the board.
    pub fn coords(&self) -> Option<(usize, usize, usize, usize)> {
        match *self {
            Move::Slide { from, to } => Some((from.0, from.1, to.0, to.1)),
            Move::Push { from, direction } => {
                let to = direction.step(from)?;
                Some((from.0, from.1, to.0, to.1))
            }
        }
    }

    /// Converts decoded notation tuples into a turn without looking at any board.
    ///
    /// Every entry but the last is read as a slide, the last one as a push
    /// towards an orthogonally adjacent cell. To play notation, use
    /// [`GameState::apply_coords`], which checks the slides and the pusher
    /// before the push distance.
    ///
    /// # Errors
    /// * `MoveSequenceLengthInvalid` if `coords` is empty.
    /// * `PushDistanceInvalid` if the push target is not adjacent to the pusher.
    pub fn sequence_from_coords(
        coords: &[(usize, usize, usize, usize)],
    ) -> Result<Vec<Move>, MoveError> {
        let Some((&(i0, j0, i1, j1), slides)) = coords.split_last() else {
            return Err(MoveError::MoveSequenceLengthInvalid);
        };
        let direction =
            Direction::between((i0, j0), (i1, j1)).ok_or(MoveError::PushDistanceInvalid)?;

        let mut moves: Vec<Move> = slides
            .iter()
            .map(|&(a, b, c, d)| Move::Slide {
                from: (a, b),
                to: (c, d),
            })
            .collect();
        moves.push(Move::Push {
            from: (i0, j0),
            direction,
        });
        Ok(moves)
    }
}

/// The game board as a 4x8 grid of `Cell`s.
///
/// The board performs no rule validation; `GameState` and the analysis
/// modules decide what is legal before anything is written here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Creates a board holding only the six holes.
    ///
    /// # Examples
    /// ```
    /// use pushfight::engine::{Board, Cell};
    /// let board = Board::new_empty();
    /// assert_eq!(board.get(0, 0), Cell::Hole);
    /// assert_eq!(board.get(1, 0), Cell::Empty);
    /// ```
    pub fn new_empty() -> Self {
        let mut grid = [[Cell::Empty; COLS]; ROWS];
        for &(r, c) in &HOLES {
            grid[r][c] = Cell::Hole;
        }
        Board { grid }
    }

    /// Creates the standard starting position: five pieces per side facing
    /// each other across the middle of the board.
    pub fn standard() -> Self {
        let mut board = Board::new_empty();
        for &(r, c, piece) in &standard_placements() {
            board.set(r, c, Cell::Occupied(piece));
        }
        board
    }

    /// Builds a board from `(row, column, piece)` placements.
    ///
    /// # Errors
    /// Returns a `SetupError` if a placement is off the board, on a hole, or
    /// repeats a cell.
    pub fn from_placements(placements: &[(usize, usize, Piece)]) -> Result<Self, SetupError> {
        let mut board = Board::new_empty();
        for &(row, col, piece) in placements {
            if !is_on_board(row, col) {
                return Err(SetupError::OffBoard { row, col });
            }
            match board.get(row, col) {
                Cell::Hole => return Err(SetupError::OnHole { row, col }),
                Cell::Occupied(_) => return Err(SetupError::Duplicate { row, col }),
                Cell::Empty => board.set(row, col, Cell::Occupied(piece)),
            }
        }
        Ok(board)
    }

    /// Returns the cell at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `(r, c)` is off the board.
    pub fn get(&self, r: usize, c: usize) -> Cell {
        self.grid[r][c]
    }

    /// Overwrites the cell at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `(r, c)` is off the board.
    pub fn set(&mut self, r: usize, c: usize, cell: Cell) {
        self.grid[r][c] = cell;
    }

    /// Returns an immutable reference to the underlying grid, for renderers.
    pub fn get_grid(&self) -> &[[Cell; COLS]; ROWS] {
        &self.grid
    }

    /// Row-major positions of every piece of `color`.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Pos> + '_ {
        all_positions()
            .filter(move |&(r, c)| matches!(self.get(r, c), Cell::Occupied(p) if p.color == color))
    }

    /// Position of the anchored piece, first in row-major order.
    pub fn anchor(&self) -> Option<Pos> {
        all_positions()
            .find(|&(r, c)| matches!(self.get(r, c), Cell::Occupied(p) if p.anchored))
    }

    /// Number of anchored pieces; the rules keep this at zero or one.
    pub fn count_anchored(&self) -> usize {
        all_positions()
            .filter(|&(r, c)| matches!(self.get(r, c), Cell::Occupied(p) if p.anchored))
            .count()
    }

    /// Removes the anchor flag from every piece.
    pub fn clear_anchor(&mut self) {
        for row in self.grid.iter_mut() {
            for cell in row.iter_mut() {
                if let Cell::Occupied(piece) = cell {
                    piece.anchored = false;
                }
            }
        }
    }

    /// Moves whatever is at `from` to `to` and empties `from`.
    ///
    /// Performs no validation.
    pub fn move_piece(&mut self, from: Pos, to: Pos) {
        self.grid[to.0][to.1] = self.grid[from.0][from.1];
        self.grid[from.0][from.1] = Cell::Empty;
    }

    /// Returns each row as board text, holes written as `#`.
    pub fn to_rows(&self) -> [String; ROWS] {
        std::array::from_fn(|r| self.grid[r].iter().map(Cell::to_char).collect())
    }
}

impl fmt::Display for Board {
    /// Draws the board in a frame with `1`..`8` column headings and `A`..`D`
    /// row labels. Holes are left blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  12345678 ")?;
        writeln!(f, " +--------+")?;
        for (letter, row) in ('A'..='D').zip(self.grid.iter()) {
            write!(f, "{}|", letter)?;
            for cell in row {
                let c = match cell {
                    Cell::Hole => ' ',
                    other => other.to_char(),
                };
                write!(f, "{}", c)?;
            }
            writeln!(f, "|")?;
        }
        write!(f, " +--------+")
    }
}

fn all_positions() -> impl Iterator<Item = Pos> {
    (0..ROWS).flat_map(|r| (0..COLS).map(move |c| (r, c)))
}

/// The placement list of the standard starting position.
pub fn standard_placements() -> Vec<(usize, usize, Piece)> {
    use Color::{Black, White};
    vec![
        (0, 3, Piece::pusher(White)),
        (1, 3, Piece::mover(White)),
        (2, 2, Piece::pusher(White)),
        (2, 3, Piece::pusher(White)),
        (3, 3, Piece::mover(White)),
        (0, 4, Piece::pusher(Black)),
        (1, 4, Piece::mover(Black)),
        (1, 5, Piece::pusher(Black)),
        (2, 4, Piece::mover(Black)),
        (3, 4, Piece::pusher(Black)),
    ]
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// The piece pushed into a hole.
    pub eliminated: Piece,
    /// The owner of the other color.
    pub winner: Color,
}

/// What a successfully applied turn did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnResult {
    /// The push was absorbed by an empty cell; the other player moves next.
    Continues,
    /// A piece left the board and the game is over.
    GameOver(Outcome),
}

/// The authoritative state of one game.
///
/// `GameState` is the only place turns are committed. Analysis and move
/// generation work on clones of its board.
///
/// # Examples
/// ```
/// use pushfight::engine::{Direction, GameState, Move, TurnResult};
/// let mut game = GameState::new();
/// // White's pusher on C4 shoves the black mover on C5 towards the right.
/// let result = game
///     .apply_move(&[Move::Push { from: (2, 3), direction: Direction::Right }])
///     .unwrap();
/// assert_eq!(result, TurnResult::Continues);
/// assert_eq!(game.turn(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    turn: u32,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        GameState::new_with_board(Board::standard())
    }

    /// Creates a game from an arbitrary board, White to move.
    pub fn new_with_board(board: Board) -> Self {
        GameState {
            board,
            turn: 0,
            outcome: None,
        }
    }

    /// Creates a game from `(row, column, piece)` placements.
    pub fn initialize(placements: &[(usize, usize, Piece)]) -> Result<Self, SetupError> {
        Board::from_placements(placements).map(GameState::new_with_board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of completed non-terminal turns.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn current_player(&self) -> Color {
        Color::from_turn(self.turn)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Plays one turn for the current player: up to two slides, then one push.
    ///
    /// The turn is all-or-nothing. It is played out on a copy of the board,
    /// and the copy replaces the real board only once the push has been
    /// accepted; a rejected turn leaves the game untouched.
    ///
    /// # Returns
    /// * `TurnResult::Continues` after an ordinary push; the turn counter advances.
    /// * `TurnResult::GameOver` when the push drove a piece into a hole; the
    ///   turn counter stays where it was and every later call fails.
    ///
    /// # Errors
    /// The first `MoveError` met while validating the sequence.
    #[instrument(skip(self, moves), fields(turn = self.turn, len = moves.len()))]
    pub fn apply_move(&mut self, moves: &[Move]) -> Result<TurnResult, MoveError> {
        let result = self.play(moves);
        match &result {
            Ok(TurnResult::GameOver(outcome)) => info!(
                winner = %outcome.winner,
                eliminated = ?outcome.eliminated,
                "game over"
            ),
            Ok(TurnResult::Continues) => debug!(next_turn = self.turn, "turn applied"),
            Err(err) => debug!(error = %err, "move rejected"),
        }
        result
    }

    /// Plays a turn given as decoded notation tuples: every entry but the
    /// last is a slide, the last one names the pusher and the piece it pushes.
    ///
    /// Errors are reported in the same order as [`GameState::apply_move`]:
    /// the slides first, then the pusher and its target, and only then a
    /// target that is not adjacent (`PushDistanceInvalid`).
    pub fn apply_coords(
        &mut self,
        coords: &[(usize, usize, usize, usize)],
    ) -> Result<TurnResult, MoveError> {
        let moves = self.moves_from_coords(coords).map_err(|err| {
            debug!(error = %err, "notation rejected");
            err
        })?;
        self.apply_move(&moves)
    }

    fn moves_from_coords(
        &self,
        coords: &[(usize, usize, usize, usize)],
    ) -> Result<Vec<Move>, MoveError> {
        self.check_turn_shape(coords.len())?;
        let Some((&(i0, j0, i1, j1), slide_coords)) = coords.split_last() else {
            return Err(MoveError::MoveSequenceLengthInvalid);
        };
        let mut moves: Vec<Move> = slide_coords
            .iter()
            .map(|&(a, b, c, d)| Move::Slide {
                from: (a, b),
                to: (c, d),
            })
            .collect();

        // The push direction only makes sense on the board after the slides.
        let board = self.slide_all(&moves)?;
        let direction = push::aim(&board, self.current_player(), (i0, j0), (i1, j1))?;
        moves.push(Move::Push {
            from: (i0, j0),
            direction,
        });
        Ok(moves)
    }

    /// Lazily lists the current player's legal turns that use exactly
    /// `num_slides` slides. A finished game has none.
    ///
    /// # Errors
    /// `MoveSequenceLengthInvalid` if `num_slides` exceeds [`MAX_SLIDES`].
    pub fn legal_moves(&self, num_slides: usize) -> Result<LegalMoves, MoveError> {
        if self.is_game_over() {
            return if num_slides > MAX_SLIDES {
                Err(MoveError::MoveSequenceLengthInvalid)
            } else {
                Ok(LegalMoves::empty())
            };
        }
        movegen::legal_moves(&self.board, self.current_player(), num_slides)
    }

    /// Number of legal turns for the current player with 0, 1 and 2 slides.
    pub fn count_moves(&self) -> [usize; MAX_SLIDES + 1] {
        if self.is_game_over() {
            return [0; MAX_SLIDES + 1];
        }
        movegen::count_moves(&self.board, self.current_player())
    }

    fn check_turn_shape(&self, len: usize) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if len == 0 || len > MAX_SLIDES + 1 {
            return Err(MoveError::MoveSequenceLengthInvalid);
        }
        Ok(())
    }

    /// Validates and performs `slides` in order on a copy of the board.
    fn slide_all(&self, slides: &[Move]) -> Result<Board, MoveError> {
        let player = self.current_player();
        let mut board = self.board.clone();
        for slide in slides {
            let Move::Slide { from, to } = *slide else {
                return Err(MoveError::MoveSequenceOrderInvalid);
            };
            connectivity::check_slide(&board, player, from, to)?;
            board.move_piece(from, to);
        }
        Ok(board)
    }

    fn play(&mut self, moves: &[Move]) -> Result<TurnResult, MoveError> {
        self.check_turn_shape(moves.len())?;
        let (last, slides) = moves
            .split_last()
            .ok_or(MoveError::MoveSequenceLengthInvalid)?;
        let Move::Push { from, direction } = *last else {
            return Err(MoveError::MoveSequenceOrderInvalid);
        };

        let player = self.current_player();
        let mut board = self.slide_all(slides)?;
        let plan = push::resolve(&board, player, from, direction)?;
        let ejected = plan.apply(&mut board);
        self.board = board;

        match ejected {
            Some(eliminated) => {
                let outcome = Outcome {
                    eliminated,
                    winner: eliminated.color.opponent(),
                };
                self.outcome = Some(outcome);
                Ok(TurnResult::GameOver(outcome))
            }
            None => {
                self.turn += 1;
                Ok(TurnResult::Continues)
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
