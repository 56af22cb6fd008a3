//! Knight, bishop, rook and queen moves, driven by each kind's movement rule.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::move_descriptions::Move;
use crate::moves::piece_attacks::piece_attacks;

pub fn generate_piece_moves(position: &Position, kind: PieceKind, out: &mut Vec<Move>) {
    let side = position.active_color();
    let board = &position.board;
    let own_occ = board.occupancy(side);
    let piece = Piece::new(side, kind);

    for from in squares_of(board.pieces_of(side, kind)) {
        let targets = piece_attacks(piece, from, board.occupied()) & !own_occ;
        push_targets(position, from, piece, targets, out);
    }
}
