use crate::engine::{is_hole, Board, Cell, Move, COLS, ROWS};

/// Parses an array of string slices into a `Board` object.
///
/// Each string slice in the input array represents a row on the board, starting from row 0.
/// If fewer than `ROWS` rows are provided, the remaining rows keep their starting content
/// (holes where the board has holes, empty cells elsewhere). Short rows are filled the same way.
///
/// Valid characters for cells are:
/// - '#': a hole (allowed only at the six fixed hole positions, where it is required)
/// - '.': an empty cell
/// - 'm' / 'n': a White pusher / mover
/// - 'w' / 'v': a Black pusher / mover
///
/// An upper-case piece letter marks the anchored piece.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`) representing the rows of the board,
///   starting from the top (row `A`).
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(String)` if:
///     - The number of rows in `s` exceeds `ROWS`.
///     - Any row string's character length exceeds `COLS`.
///     - An unrecognized character is encountered.
///     - A hole is missing, or a `#` appears where the board has no hole.
///
/// # Examples
/// ```
/// use pushfight::utils::board_from_str_array;
/// use pushfight::engine::{Cell, Color, Piece};
///
/// let board = board_from_str_array(&["##.mw..#", "...n"]).unwrap();
/// assert_eq!(board.get(0, 3), Cell::Occupied(Piece::pusher(Color::White)));
/// assert_eq!(board.get(0, 4), Cell::Occupied(Piece::pusher(Color::Black)));
/// assert_eq!(board.get(1, 3), Cell::Occupied(Piece::mover(Color::White)));
/// assert_eq!(board.get(3, 0), Cell::Hole);
///
/// assert!(board_from_str_array(&["##.x...#"]).is_err());
/// assert!(board_from_str_array(&["m"]).is_err()); // A1 is a hole
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, String> {
    if s.len() > ROWS {
        return Err(format!(
            "Invalid number of rows. Expected at most {}, found {}",
            ROWS,
            s.len()
        ));
    }

    let mut board = Board::new_empty();

    for (r, row_str) in s.iter().enumerate() {
        if row_str.chars().count() > COLS {
            return Err(format!(
                "Row {} is too long. Expected at most {} characters, found {}",
                r,
                COLS,
                row_str.chars().count()
            ));
        }

        for (c, ch) in row_str.chars().enumerate() {
            let cell = Cell::from_char(ch).ok_or_else(|| {
                format!("Unrecognized character '{}' in row {} col {}", ch, r, c)
            })?;
            if (cell == Cell::Hole) != is_hole(r, c) {
                return Err(format!(
                    "Hole mismatch at row {} col {}: the holes are fixed at A1 A2 A8 D1 D7 D8",
                    r, c
                ));
            }
            board.set(r, c, cell);
        }
    }
    Ok(board)
}

/// Parses a whole board file: exactly `ROWS` non-blank lines of `COLS` characters.
///
/// Surrounding whitespace on each line is ignored.
pub fn board_from_text(text: &str) -> Result<Board, String> {
    let lines: Vec<&str> = text
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if lines.len() != ROWS {
        return Err(format!(
            "Expected {} lines in board file, found {}",
            ROWS,
            lines.len()
        ));
    }
    for (i, line) in lines.iter().enumerate() {
        if line.chars().count() != COLS {
            return Err(format!(
                "Line {} has {} characters (expected {})",
                i + 1,
                line.chars().count(),
                COLS
            ));
        }
    }
    board_from_str_array(&lines)
}

/// Decodes a move string such as `"B4B3 C4C5"` into `(from_row, from_col, to_row, to_col)` tuples.
///
/// Each whitespace-separated token is `<row letter><column digit><row letter><column digit>`,
/// rows `A`..`D` from the top, columns `1`..`8` from the left. Row letters may be lower case.
///
/// # Examples
/// ```
/// use pushfight::utils::parse_moves;
/// assert_eq!(parse_moves("B4B3 c4c5"), Ok(vec![(1, 3, 1, 2), (2, 3, 2, 4)]));
/// assert!(parse_moves("E1E2").is_err());
/// ```
pub fn parse_moves(move_str: &str) -> Result<Vec<(usize, usize, usize, usize)>, String> {
    let mut moves = Vec::new();
    for token in move_str.split_whitespace() {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() != 4 {
            return Err(format!(
                "Move '{}' must be 4 characters, like B4B3",
                token
            ));
        }
        let i0 = parse_row(chars[0], token)?;
        let j0 = parse_col(chars[1], token)?;
        let i1 = parse_row(chars[2], token)?;
        let j1 = parse_col(chars[3], token)?;
        moves.push((i0, j0, i1, j1));
    }
    if moves.is_empty() {
        return Err("No moves given".to_string());
    }
    Ok(moves)
}

/// Encodes move tuples back into notation; the inverse of [`parse_moves`] for
/// upper-case input.
///
/// # Returns
/// * `Ok(String)` with the moves separated by single spaces.
/// * `Err(String)` if a tuple names a row or column outside the board.
///
/// # Examples
/// ```
/// use pushfight::utils::encode_moves;
/// assert_eq!(encode_moves(&[(1, 3, 1, 2), (2, 3, 2, 4)]), Ok("B4B3 C4C5".to_string()));
/// assert!(encode_moves(&[(4, 0, 0, 0)]).is_err());
/// ```
pub fn encode_moves(moves: &[(usize, usize, usize, usize)]) -> Result<String, String> {
    let tokens = moves
        .iter()
        .map(|&(i0, j0, i1, j1)| {
            if i0 >= ROWS || i1 >= ROWS || j0 >= COLS || j1 >= COLS {
                return Err(format!(
                    "Move ({}, {}, {}, {}) is off the board (rows 0-{}, columns 0-{})",
                    i0,
                    j0,
                    i1,
                    j1,
                    ROWS - 1,
                    COLS - 1
                ));
            }
            Ok(format!(
                "{}{}{}{}",
                row_letter(i0),
                j0 + 1,
                row_letter(i1),
                j1 + 1
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tokens.join(" "))
}

/// Encodes a turn in move notation.
///
/// Returns an error if a push points off the board, since its target square has no name.
pub fn encode_sequence(moves: &[Move]) -> Result<String, String> {
    let coords = moves
        .iter()
        .map(|m| {
            m.coords()
                .ok_or_else(|| format!("{:?} points off the board", m))
        })
        .collect::<Result<Vec<_>, _>>()?;
    encode_moves(&coords)
}

fn row_letter(r: usize) -> char {
    (b'A' + r as u8) as char
}

fn parse_row(ch: char, token: &str) -> Result<usize, String> {
    match ch.to_ascii_uppercase() {
        'A'..='D' => Ok(ch.to_ascii_uppercase() as usize - 'A' as usize),
        _ => Err(format!("Invalid row '{}' in move '{}' (expected A-D)", ch, token)),
    }
}

fn parse_col(ch: char, token: &str) -> Result<usize, String> {
    match ch {
        '1'..='8' => Ok(ch as usize - '1' as usize),
        _ => Err(format!(
            "Invalid column '{}' in move '{}' (expected 1-8)",
            ch, token
        )),
    }
}
