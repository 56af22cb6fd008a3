//! Turn and rule-state flags that are not visible from piece placement alone.
//!
//! `GameState` changes only as a side effect of applying or reversing a move.
//! `after_move` is the pure forward transition; reversal restores the stored
//! previous value from history.

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, SpecialMove};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub active_color: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            active_color: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    /// State at the standard starting position.
    #[inline]
    pub fn new_game() -> Self {
        Self::default()
    }

    /// State after `mv` has been played by the active color.
    pub fn after_move(&self, mv: &Move) -> GameState {
        let mover = self.active_color;
        let mut next = *self;

        next.active_color = mover.opposite();

        next.halfmove_clock = if mv.is_irreversible() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        if mover == Color::Black {
            next.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        next.en_passant_target = match mv.special {
            SpecialMove::DoubleForward => {
                Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2)
            }
            _ => None,
        };

        if mv.piece.kind == PieceKind::King {
            next.castling_rights.revoke_color(mover);
        }
        // A rook leaving its corner or anything landing on a corner (a capture
        // of the rook) ends castling on that side for good.
        revoke_for_corner(&mut next.castling_rights, mv.from);
        revoke_for_corner(&mut next.castling_rights, mv.to);

        next
    }
}

fn revoke_for_corner(rights: &mut CastlingRights, square: Square) {
    match square {
        Square::A1 => rights.revoke(Color::White, CastleSide::Queenside),
        Square::H1 => rights.revoke(Color::White, CastleSide::Kingside),
        Square::A8 => rights.revoke(Color::Black, CastleSide::Queenside),
        Square::H8 => rights.revoke(Color::Black, CastleSide::Kingside),
        _ => {}
    }
}
