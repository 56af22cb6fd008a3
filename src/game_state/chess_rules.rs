//! Canonical chess-rule constants.
//!
//! Stores the standard starting position and the numeric limits used by draw
//! detection.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVE_LIMIT: u16 = 100;

/// Occurrences of the same position that draw the game.
pub const REPETITION_DRAW_COUNT: usize = 3;
