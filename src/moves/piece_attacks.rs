//! Movement-rule dispatch: attack sets for any piece, keyed by its kind.

use crate::game_state::chess_types::{MovementRule, Piece, Square};
use crate::moves::leaper_moves::leaper_attacks;
use crate::moves::pawn_moves::{pawn_attacks, pawn_push_targets};
use crate::moves::slider_moves::slider_attacks;

/// Squares attacked by `piece` on `from` given board occupancy.
///
/// For pawns this is the diagonal capture set, not the push set.
pub fn piece_attacks(piece: Piece, from: Square, occupancy: u64) -> u64 {
    match piece.kind.movement_rule() {
        MovementRule::Pawn => pawn_attacks(piece.color, from),
        MovementRule::Slider(directions) => slider_attacks(from, directions, occupancy),
        MovementRule::Leaper(offsets) => leaper_attacks(from, offsets),
    }
}

/// Every square `piece` could reach from `from` on an empty board, pushes
/// included. Used to explain why a notated move is impossible.
pub fn empty_board_reach(piece: Piece, from: Square) -> u64 {
    match piece.kind.movement_rule() {
        MovementRule::Pawn => {
            pawn_attacks(piece.color, from) | pawn_push_targets(piece.color, from)
        }
        _ => piece_attacks(piece, from, 0),
    }
}
