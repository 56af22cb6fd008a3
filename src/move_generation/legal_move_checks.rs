//! Castling preconditions, shared by generation and by move diagnosis.

use crate::chess_errors::IllegalMoveReason;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::slider_moves::squares_between;

/// King origin, king destination and rook origin for a castle.
pub fn castling_squares(color: Color, side: CastleSide) -> Option<(Square, Square, Square)> {
    let rank = color.back_rank();
    let (king_to, rook_from) = match side {
        CastleSide::Kingside => (6, 7),
        CastleSide::Queenside => (2, 0),
    };
    Some((Square::new(4, rank)?, Square::new(king_to, rank)?, Square::new(rook_from, rank)?))
}

/// Why the side to move cannot castle on `side`, or `None` when it can.
///
/// Checks, in order: the right itself (plus king and rook on their home
/// squares), empty squares between king and rook, the king not in check,
/// and the transit and destination squares not attacked.
pub fn castling_obstruction(position: &Position, side: CastleSide) -> Option<IllegalMoveReason> {
    let color = position.active_color();
    let board = &position.board;
    let enemy = color.opposite();

    let Some((king_from, king_to, rook_from)) = castling_squares(color, side) else {
        return Some(IllegalMoveReason::CastlingRightsLost);
    };

    let pieces_home = board.piece_at(king_from) == Some(Piece::new(color, PieceKind::King))
        && board.piece_at(rook_from) == Some(Piece::new(color, PieceKind::Rook));
    if !position.state.castling_rights.has(color, side) || !pieces_home {
        return Some(IllegalMoveReason::CastlingRightsLost);
    }

    if squares_between(king_from, rook_from) & board.occupied() != 0 {
        return Some(IllegalMoveReason::CastlingPathBlocked);
    }

    if board.is_square_attacked(king_from, enemy) {
        return Some(IllegalMoveReason::CastlingOutOfCheck);
    }

    let king_path = squares_between(king_from, king_to) | king_to.bit();
    if squares_of(king_path).any(|sq| board.is_square_attacked(sq, enemy)) {
        return Some(IllegalMoveReason::CastlingThroughCheck);
    }

    None
}
