//! Pawn geometry: capture targets and forward pushes.

use crate::game_state::chess_types::{Color, Square};

/// Diagonal capture targets of a pawn of `color` standing on `square`.
#[inline]
pub fn pawn_attacks(color: Color, square: Square) -> u64 {
    let dir = color.pawn_direction();
    let left = square.offset(-1, dir).map_or(0, Square::bit);
    let right = square.offset(1, dir).map_or(0, Square::bit);
    left | right
}

/// Push targets ignoring occupancy: one step, plus two from the start rank.
pub fn pawn_push_targets(color: Color, square: Square) -> u64 {
    let dir = color.pawn_direction();
    let mut targets = square.offset(0, dir).map_or(0, Square::bit);
    if square.rank() == color.pawn_start_rank() {
        targets |= square.offset(0, 2 * dir).map_or(0, Square::bit);
    }
    targets
}
