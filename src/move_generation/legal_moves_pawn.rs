//! Pawn pushes, captures, en passant and promotions.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::{Move, SpecialMove};
use crate::moves::pawn_moves::pawn_attacks;

pub fn generate_pawn_moves(position: &Position, out: &mut Vec<Move>) {
    let side = position.active_color();
    let board = &position.board;
    let enemy_occ = board.occupancy(side.opposite());
    let pawn = Piece::new(side, PieceKind::Pawn);
    let dir = side.pawn_direction();

    for from in squares_of(board.pieces_of(side, PieceKind::Pawn)) {
        if let Some(one_step) = from.offset(0, dir).filter(|sq| board.is_empty_square(*sq)) {
            push_pawn_move(from, one_step, pawn, None, out);

            if from.rank() == side.pawn_start_rank() {
                let two_step = from.offset(0, 2 * dir).filter(|sq| board.is_empty_square(*sq));
                if let Some(to) = two_step {
                    out.push(Move::new(from, to, pawn, None, SpecialMove::DoubleForward));
                }
            }
        }

        for to in squares_of(pawn_attacks(side, from)) {
            if enemy_occ & to.bit() != 0 {
                push_pawn_move(from, to, pawn, board.piece_at(to), out);
            } else if position.state.en_passant_target == Some(to) {
                let victim = Square::new(to.file(), from.rank()).and_then(|sq| board.piece_at(sq));
                if victim == Some(Piece::new(side.opposite(), PieceKind::Pawn)) {
                    out.push(Move::new(from, to, pawn, victim, SpecialMove::EnPassantCapture));
                }
            }
        }
    }
}

fn push_pawn_move(
    from: Square,
    to: Square,
    pawn: Piece,
    captured: Option<Piece>,
    out: &mut Vec<Move>,
) {
    if to.rank() == pawn.color.promotion_rank() {
        for promo in PieceKind::PROMOTIONS {
            out.push(Move::new(from, to, pawn, captured, SpecialMove::PromotionTo(promo)));
        }
    } else {
        out.push(Move::new(from, to, pawn, captured, SpecialMove::None));
    }
}
