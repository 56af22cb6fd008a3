//! Helpers shared by the per-piece generators.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::{Move, SpecialMove};

/// Emits one plain move or capture per target square, ascending.
pub fn push_targets(
    position: &Position,
    from: Square,
    piece: Piece,
    targets: u64,
    out: &mut Vec<Move>,
) {
    for to in squares_of(targets) {
        let captured = position.board.piece_at(to);
        out.push(Move::new(from, to, piece, captured, SpecialMove::None));
    }
}
