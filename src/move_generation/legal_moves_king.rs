//! King steps and castling.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::{castling_obstruction, castling_squares};
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::leaper_moves::king_attacks;
use crate::moves::move_descriptions::{Move, SpecialMove};

pub fn generate_king_moves(position: &Position, out: &mut Vec<Move>) {
    let side = position.active_color();
    let board = &position.board;
    let Some(from) = board.king_square(side) else {
        return;
    };

    let king = Piece::new(side, PieceKind::King);
    push_targets(position, from, king, king_attacks(from) & !board.occupancy(side), out);

    for castle_side in CastleSide::ALL {
        if castling_obstruction(position, castle_side).is_some() {
            continue;
        }
        if let Some((king_from, king_to, _)) = castling_squares(side, castle_side) {
            let special = match castle_side {
                CastleSide::Kingside => SpecialMove::CastleKingside,
                CastleSide::Queenside => SpecialMove::CastleQueenside,
            };
            out.push(Move::new(king_from, king_to, king, None, special));
        }
    }
}
