//! Errors used throughout the rules engine.
//!
//! Every failure the core can report is recoverable: the engine never aborts
//! and callers decide whether to re-prompt, abandon a PGN load, or report the
//! problem to the player.
//!
//! - `NotationError`: text that is not a well-formed square, SAN token, FEN
//!   record or PGN tag.
//! - `MoveError`: the outcome of a rejected `apply_move`.
//! - `IllegalMoveReason`: why a well-formed, unambiguous move is not legal.
//! - `HistoryUnderflow`: undo/redo asked for more steps than exist.
//! - `PgnError`: a PGN import that could not be replayed.

use thiserror::Error;

use crate::game::game_status::GameStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("empty move text")]
    EmptyMove,

    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("malformed move `{token}`: {detail}")]
    MalformedMove { token: String, detail: &'static str },

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid PGN tag pair `{0}`")]
    InvalidTagPair(String),
}

impl NotationError {
    pub(crate) fn malformed(token: &str, detail: &'static str) -> Self {
        NotationError::MalformedMove {
            token: token.to_owned(),
            detail,
        }
    }
}

/// Rule category violated by a well-formed, unambiguous move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum IllegalMoveReason {
    #[error("that piece belongs to the side not on move")]
    WrongTurn,

    #[error("no piece of that kind can move there")]
    NoPieceCanReach,

    #[error("the path is blocked")]
    PathBlocked,

    #[error("the destination holds one of your own pieces")]
    OwnPieceOnDestination,

    #[error("there is nothing to capture on the destination")]
    NothingToCapture,

    #[error("the move would leave your king in check")]
    LeavesKingInCheck,

    #[error("castling rights on that side have been lost")]
    CastlingRightsLost,

    #[error("pieces stand between king and rook")]
    CastlingPathBlocked,

    #[error("cannot castle out of check")]
    CastlingOutOfCheck,

    #[error("cannot castle through or into an attacked square")]
    CastlingThroughCheck,

    #[error("a pawn reaching the last rank must promote")]
    PromotionRequired,

    #[error("promotion is only possible on the last rank")]
    InvalidPromotion,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error(transparent)]
    Parse(#[from] NotationError),

    #[error("illegal move `{token}`: {reason}")]
    Illegal {
        token: String,
        reason: IllegalMoveReason,
    },

    #[error("ambiguous move `{token}`, candidates: {}", candidates.join(", "))]
    Ambiguous {
        token: String,
        candidates: Vec<String>,
    },

    #[error("the game is already over ({0})")]
    GameAlreadyOver(GameStatus),
}

/// Undo/redo asked for more steps than were available. The available steps
/// were still performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("requested {requested} step(s) but only {performed} were available")]
pub struct HistoryUnderflow {
    pub requested: usize,
    pub performed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PgnError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("games starting from a custom position (SetUp/FEN tags) are not supported")]
    UnsupportedSetup,

    #[error("move {ply} (`{token}`) could not be replayed: {source}")]
    Move {
        /// One-based half-move index within the movetext.
        ply: usize,
        token: String,
        #[source]
        source: MoveError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = MoveError::Ambiguous {
            token: "Nd2".to_owned(),
            candidates: vec!["Nbd2".to_owned(), "Nfd2".to_owned()],
        };
        assert_eq!(err.to_string(), "ambiguous move `Nd2`, candidates: Nbd2, Nfd2");

        let err = PgnError::Move {
            ply: 3,
            token: "Ke3".to_owned(),
            source: MoveError::Illegal {
                token: "Ke3".to_owned(),
                reason: IllegalMoveReason::NoPieceCanReach,
            },
        };
        assert!(err.to_string().starts_with("move 3 (`Ke3`)"));

        let underflow = HistoryUnderflow {
            requested: 5,
            performed: 2,
        };
        assert_eq!(
            underflow.to_string(),
            "requested 5 step(s) but only 2 were available"
        );
    }
}
