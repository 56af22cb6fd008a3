//! Piece placement and square queries.
//!
//! `Board` stores one bitboard per (color, kind) plus occupancy caches. It has
//! no rule knowledge beyond "which squares does a piece attack"; turn order,
//! castling rights and clocks live in `GameState`.

use std::fmt;

use crate::game_state::chess_types::*;
use crate::moves::leaper_moves::{king_attacks, knight_attacks};
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::slider_moves::{bishop_attacks, rook_attacks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    // [color][piece_kind]
    pieces: [[u64; 6]; 2],
    occupancy_by_color: [u64; 2],
    occupancy_all: u64,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard initial placement.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                if let Some(sq) = Square::new(file as u8, color.back_rank()) {
                    board.place(sq, Piece::new(color, *kind));
                }
                if let Some(sq) = Square::new(file as u8, color.pawn_start_rank()) {
                    board.place(sq, Piece::new(color, PieceKind::Pawn));
                }
            }
        }
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.bit();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
            .map(|kind| Piece::new(color, kind))
    }

    /// Puts `piece` on `square`, returning whatever stood there before.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let displaced = self.remove(square);
        let mask = square.bit();
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
        displaced
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        let mask = !square.bit();
        self.pieces[piece.color.index()][piece.kind.index()] &= mask;
        self.occupancy_by_color[piece.color.index()] &= mask;
        self.occupancy_all &= mask;
        Some(piece)
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.occupancy_all
    }

    #[inline]
    pub fn is_empty_square(&self, square: Square) -> bool {
        self.occupancy_all & square.bit() == 0
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        squares_of(self.pieces_of(color, PieceKind::King)).next()
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        squares_of(self.occupancy_all).filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn piece_count(&self) -> u32 {
        self.occupancy_all.count_ones()
    }

    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        self.attackers_of(square, by) != 0
    }

    /// Bitboard of `by` pieces attacking `square`.
    pub fn attackers_of(&self, square: Square, by: Color) -> u64 {
        let occ = self.occupancy_all;
        let queens = self.pieces_of(by, PieceKind::Queen);
        let bishops_queens = self.pieces_of(by, PieceKind::Bishop) | queens;
        let rooks_queens = self.pieces_of(by, PieceKind::Rook) | queens;

        // A pawn of `by` attacks `square` exactly when a pawn of the other
        // color on `square` would attack it.
        (pawn_attacks(by.opposite(), square) & self.pieces_of(by, PieceKind::Pawn))
            | (knight_attacks(square) & self.pieces_of(by, PieceKind::Knight))
            | (king_attacks(square) & self.pieces_of(by, PieceKind::King))
            | (bishop_attacks(square, occ) & bishops_queens)
            | (rook_attacks(square, occ) & rooks_queens)
    }

    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|sq| self.is_square_attacked(sq, color.opposite()))
    }
}

/// Eight text rows, rank 8 first, `.` for empty squares and FEN letters
/// for pieces.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let ch = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::fen_char);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn standard_board_has_thirty_two_pieces_and_one_king_each() {
        let board = Board::standard();
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn pieces_lists_every_occupied_square_from_a1() {
        let board = Board::standard();
        let pieces: Vec<(Square, Piece)> = board.pieces().collect();
        assert_eq!(pieces.len(), 32);
        assert_eq!(pieces[0], (Square::A1, Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(pieces[31], (Square::H8, Piece::new(Color::Black, PieceKind::Rook)));

        let empty_squares = Square::all().filter(|sq| board.piece_at(*sq).is_none()).count();
        assert_eq!(empty_squares, 32);
        assert_eq!(Board::empty().pieces().count(), 0);
    }

    #[test]
    fn place_replaces_and_remove_clears() {
        let mut board = Board::empty();
        let knight = Piece::new(Color::White, PieceKind::Knight);
        let bishop = Piece::new(Color::Black, PieceKind::Bishop);

        assert_eq!(board.place(sq("c3"), knight), None);
        assert_eq!(board.place(sq("c3"), bishop), Some(knight));
        assert_eq!(board.occupancy(Color::White), 0);
        assert_eq!(board.remove(sq("c3")), Some(bishop));
        assert_eq!(board.remove(sq("c3")), None);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn attack_detection_respects_blockers_and_pawn_direction() {
        let mut board = Board::empty();
        board.place(sq("a1"), Piece::new(Color::White, PieceKind::Rook));
        board.place(sq("e4"), Piece::new(Color::Black, PieceKind::Pawn));

        assert!(board.is_square_attacked(sq("a8"), Color::White));
        board.place(sq("a5"), Piece::new(Color::Black, PieceKind::Knight));
        assert!(!board.is_square_attacked(sq("a8"), Color::White));

        assert!(board.is_square_attacked(sq("d3"), Color::Black));
        assert!(board.is_square_attacked(sq("f3"), Color::Black));
        assert!(!board.is_square_attacked(sq("d5"), Color::Black));
    }

    #[test]
    fn display_renders_rank_eight_first() {
        let text = Board::standard().to_string();
        let first_line = text.lines().next().expect("board text has lines");
        assert_eq!(first_line, "rnbqkbnr");
        assert_eq!(text.lines().nth(4), Some("........"));
    }
}
