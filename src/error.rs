//! Failure reasons reported by the rules engine.
//!
//! None of these are fatal: every variant describes a move or a setup the
//! caller can correct and retry.

/// Why a slide, a push or a whole move sequence was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The slide origin holds no piece (it is empty or a hole).
    #[display("not a piece")]
    NotAPiece,
    /// The moved piece belongs to the other player.
    #[display("wrong player")]
    WrongPlayer,
    /// The slide destination is not an empty cell.
    #[display("destination not empty")]
    DestinationOccupied,
    /// No chain of empty cells joins the origin and the destination.
    #[display("path is blocked")]
    PathBlocked,
    /// The push origin holds no pusher.
    #[display("not a pusher")]
    NotAPusher,
    /// The cell in front of the pusher holds no piece.
    #[display("not pushing a piece")]
    NotPushingAnything,
    /// The push target is not orthogonally adjacent to the pusher.
    #[display("push must move exactly one cell")]
    PushDistanceInvalid,
    /// The chain would leave the board through the top or bottom edge.
    #[display("pushed against the wall")]
    PushedAgainstWall,
    /// The chain would leave the board through the left or right edge.
    #[display("hit the wall")]
    HitTheWall,
    /// The chain contains the anchored piece.
    #[display("tried to push anchor")]
    PushedIntoAnchor,
    /// A position lies outside the 4x8 grid.
    #[display("position is off the board")]
    OffBoard,
    /// A turn must hold between one and three primitives.
    #[display("bad number of moves")]
    MoveSequenceLengthInvalid,
    /// A turn must be zero to two slides followed by one push.
    #[display("a turn is up to two slides followed by one push")]
    MoveSequenceOrderInvalid,
    /// The game has already ended.
    #[display("the game is over")]
    GameOver,
}

/// Why an initial placement list could not be turned into a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SetupError {
    #[display("placement ({row}, {col}) is off the board")]
    OffBoard { row: usize, col: usize },
    #[display("placement ({row}, {col}) is on a hole")]
    OnHole { row: usize, col: usize },
    #[display("cell ({row}, {col}) is placed twice")]
    Duplicate { row: usize, col: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        assert_eq!(MoveError::PathBlocked.to_string(), "path is blocked");
        assert_eq!(MoveError::PushedIntoAnchor.to_string(), "tried to push anchor");
        assert_eq!(MoveError::HitTheWall.to_string(), "hit the wall");
    }

    #[test]
    fn test_setup_error_display() {
        let err = SetupError::OnHole { row: 0, col: 7 };
        assert_eq!(err.to_string(), "placement (0, 7) is on a hole");
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&MoveError::GameOver);
        takes_error(&SetupError::Duplicate { row: 1, col: 1 });
    }
}
