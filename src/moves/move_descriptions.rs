//! Move descriptions produced by the generator and consumed by make/unmake.
//!
//! A `Move` records everything needed to apply and reverse it: origin,
//! destination, the moving piece, the captured piece (if any) and the special
//! rule involved. Check/checkmate annotations and SAN text are attached later
//! in `MoveRecord` once the move is committed to history.

use std::fmt;

use crate::game_state::chess_types::{CastleSide, Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    None,
    DoubleForward,
    EnPassantCapture,
    CastleKingside,
    CastleQueenside,
    PromotionTo(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub special: SpecialMove,
}

impl Move {
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        special: SpecialMove,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            special,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.special {
            SpecialMove::PromotionTo(kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub const fn castle_side(&self) -> Option<CastleSide> {
        match self.special {
            SpecialMove::CastleKingside => Some(CastleSide::Kingside),
            SpecialMove::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Square the captured piece stood on. Differs from `to` only for
    /// en-passant captures, where the victim sits beside the origin.
    pub fn capture_square(&self) -> Option<Square> {
        self.captured?;
        match self.special {
            SpecialMove::EnPassantCapture => Square::new(self.to.file(), self.from.rank()),
            _ => Some(self.to),
        }
    }

    /// Piece standing on `to` after the move.
    pub fn placed_piece(&self) -> Piece {
        match self.promotion() {
            Some(kind) => Piece::new(self.piece.color, kind),
            None => self.piece,
        }
    }

    /// Resets the fifty-move counter.
    #[inline]
    pub const fn is_irreversible(&self) -> bool {
        self.captured.is_some() || matches!(self.piece.kind, PieceKind::Pawn)
    }
}

/// Coordinate form (`e2e4`, `e7e8q`), used in logs and diagnostics.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Check annotations computed against the position after the move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MoveAnnotations {
    pub gives_check: bool,
    pub is_checkmate: bool,
}

/// A committed move as it appears in the game record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub chess_move: Move,
    pub annotations: MoveAnnotations,
    pub san: String,
}

impl MoveRecord {
    #[inline]
    pub fn resulting_check(&self) -> bool {
        self.annotations.gives_check
    }
}
