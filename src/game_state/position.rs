//! Board plus rule state: the unit that move generation and make/unmake
//! operate on.

use crate::chess_errors::NotationError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::undo_state::UndoState;
use crate::moves::move_descriptions::{Move, SpecialMove};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub state: GameState,
}

/// Identity of a position for repetition purposes: placement, side to move,
/// castling rights and en-passant target. Clocks are not part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    board: Board,
    active_color: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Position {
    pub fn new_game() -> Self {
        Self {
            board: Board::standard(),
            state: GameState::new_game(),
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, NotationError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.state.active_color
    }

    /// True when the side to move is in check.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.board.is_king_attacked(self.state.active_color)
    }

    /// Copy-make: the position after `mv`, leaving `self` untouched.
    pub fn apply_move(&self, mv: &Move) -> Position {
        let mut next = *self;
        next.make_move(mv);
        next
    }

    /// Plays `mv` in place. `mv` must be pseudo-legal for this position.
    pub fn make_move(&mut self, mv: &Move) -> UndoState {
        let undo = UndoState {
            mv: *mv,
            prev_state: self.state,
        };

        self.board.remove(mv.from);
        if let Some(capture_sq) = mv.capture_square() {
            self.board.remove(capture_sq);
        }
        self.board.place(mv.to, mv.placed_piece());

        if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
            if let Some(rook) = self.board.remove(rook_from) {
                self.board.place(rook_to, rook);
            }
        }

        self.state = self.state.after_move(mv);
        undo
    }

    /// Reverses the move recorded in `undo`, which must be the last move made.
    pub fn unmake_move(&mut self, undo: &UndoState) {
        let mv = &undo.mv;

        if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
            if let Some(rook) = self.board.remove(rook_to) {
                self.board.place(rook_from, rook);
            }
        }

        self.board.remove(mv.to);
        self.board.place(mv.from, mv.piece);
        if let (Some(captured), Some(capture_sq)) = (mv.captured, mv.capture_square()) {
            self.board.place(capture_sq, captured);
        }

        self.state = undo.prev_state;
    }

    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            board: self.board,
            active_color: self.state.active_color,
            castling_rights: self.state.castling_rights,
            en_passant_target: self.state.en_passant_target,
        }
    }

    /// Neither side can deliver mate with the material left: bare kings,
    /// a single minor piece, or only bishops all on one square color.
    pub fn has_insufficient_material(&self) -> bool {
        let board = &self.board;
        let heavy_or_pawn = Color::ALL.iter().any(|&c| {
            board.pieces_of(c, PieceKind::Pawn)
                | board.pieces_of(c, PieceKind::Rook)
                | board.pieces_of(c, PieceKind::Queen)
                != 0
        });
        if heavy_or_pawn {
            return false;
        }

        let knights = board.pieces_of(Color::White, PieceKind::Knight)
            | board.pieces_of(Color::Black, PieceKind::Knight);
        let bishops = board.pieces_of(Color::White, PieceKind::Bishop)
            | board.pieces_of(Color::Black, PieceKind::Bishop);
        let minors = (knights | bishops).count_ones();

        if minors <= 1 {
            return true;
        }
        if knights != 0 {
            return false;
        }

        let first_is_dark = squares_of(bishops).next().is_some_and(Square::is_dark);
        squares_of(bishops).all(|sq| sq.is_dark() == first_is_dark)
    }
}

/// Rook origin and destination for a castling move.
pub fn castling_rook_squares(mv: &Move) -> Option<(Square, Square)> {
    let rank = mv.piece.color.back_rank();
    let (from_file, to_file) = match mv.special {
        SpecialMove::CastleKingside => (7, 5),
        SpecialMove::CastleQueenside => (0, 3),
        _ => return None,
    };
    Some((Square::new(from_file, rank)?, Square::new(to_file, rank)?))
}
