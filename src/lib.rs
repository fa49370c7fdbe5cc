//! # Push Fight Rules Engine
//!
//! This library implements the rules of Push Fight on the 4x8 board with six
//! holes: board setup, sliding through connected empty space, chain pushes,
//! the anchor, and elimination through the holes. It also enumerates every
//! legal turn lazily, which the binaries use to count moves and to play
//! random games.
//!
//! It is used by three binaries:
//! - `human_player`: two players take turns at the terminal using move notation.
//! - `move_counter`: prints how many 0, 1 and 2-slide turns a position allows.
//! - `random_playout`: plays seeded random games and summarizes the results.
//!
//! ## Modules
//! - `engine`: cells, pieces, the `Board`, and `GameState` which validates and plays turns.
//! - `connectivity`: region labeling used to decide whether a slide has a path.
//! - `push`: resolves a push into a `PushPlan` and applies it.
//! - `movegen`: legal slides, pushes and complete turns.
//! - `playout`: random legal games.
//! - `error`: `MoveError` and `SetupError`.
//! - `utils`: the board text format and move notation.

pub mod connectivity;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod playout;
pub mod push;
pub mod utils;
