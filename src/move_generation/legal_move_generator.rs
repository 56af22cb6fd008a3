//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves piece kind by piece kind, simulates each one
//! on a copy of the position, discards moves that leave the mover's king
//! attacked, and optionally annotates check and checkmate.
//!
//! Output order is stable: pawns, knights, bishops, rooks, queens, king; within
//! a kind by ascending origin square. Pawns emit pushes before captures,
//! promotions come in Q, R, B, N order and castles follow plain king steps.

use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::generate_piece_moves;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_descriptions::{Move, MoveAnnotations};

/// Annotates every move with check/checkmate flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

/// Leaves annotations at their defaults; used where only legality matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove> {
        generate_legal_moves_internal(position, true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove> {
        generate_legal_moves_internal(position, false)
    }
}

/// Moves that obey piece movement and occupancy but may expose the king.
pub fn generate_pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(64);

    generate_pawn_moves(position, &mut pseudo);
    for kind in [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        generate_piece_moves(position, kind, &mut pseudo);
    }
    generate_king_moves(position, &mut pseudo);

    pseudo
}

/// True when the side to move has at least one legal move.
pub fn has_legal_move(position: &Position) -> bool {
    let mover = position.active_color();
    generate_pseudo_legal_moves(position)
        .iter()
        .any(|mv| !position.apply_move(mv).board.is_king_attacked(mover))
}

fn generate_legal_moves_internal(position: &Position, annotate: bool) -> Vec<GeneratedMove> {
    let mover = position.active_color();
    let pseudo = generate_pseudo_legal_moves(position);
    let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());

    for mv in pseudo {
        let next = position.apply_move(&mv);

        // Illegal if own king is attacked after the move.
        if next.board.is_king_attacked(mover) {
            continue;
        }

        let annotations = if annotate {
            classify_move_annotations(&next)
        } else {
            MoveAnnotations::default()
        };

        legal.push(GeneratedMove {
            chess_move: mv,
            position_after: next,
            annotations,
        });
    }

    legal
}

fn classify_move_annotations(next: &Position) -> MoveAnnotations {
    let gives_check = next.is_in_check();
    MoveAnnotations {
        gives_check,
        is_checkmate: gives_check && !has_legal_move(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;

    #[test]
    fn fast_generator_matches_legal_move_count_on_startpos() {
        let position = Position::new_game();
        let annotated = LegalMoveGenerator.generate_legal_moves(&position);
        let fast = FastLegalMoveGenerator.generate_legal_moves(&position);
        assert_eq!(annotated.len(), fast.len());
        assert_eq!(fast.len(), 20);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // Knight on e2 is pinned by the rook on e8.
        let position =
            Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let moves = FastLegalMoveGenerator.generate_legal_moves(&position);
        assert!(moves.iter().all(|gm| gm.chess_move.piece.kind == PieceKind::King));
    }

    #[test]
    fn no_generated_move_leaves_the_king_attacked() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let moves = LegalMoveGenerator.generate_legal_moves(&position);
        assert_eq!(moves.len(), 48);
        for gm in &moves {
            assert!(!gm.position_after.board.is_king_attacked(Color::White), "{}", gm.chess_move);
        }
    }

    #[test]
    fn back_rank_mate_is_annotated() {
        let position =
            Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("FEN should parse");
        let moves = LegalMoveGenerator.generate_legal_moves(&position);
        let mate = moves
            .iter()
            .find(|gm| gm.chess_move.to.to_string() == "a8")
            .expect("Ra8 should be legal");
        assert!(mate.annotations.gives_check);
        assert!(mate.annotations.is_checkmate);

        let quiet = moves
            .iter()
            .find(|gm| gm.chess_move.to.to_string() == "a2")
            .expect("Ra2 should be legal");
        assert_eq!(quiet.annotations, MoveAnnotations::default());
    }

    #[test]
    fn generation_order_is_stable() {
        let position = Position::new_game();
        let first: Vec<Move> = FastLegalMoveGenerator
            .generate_legal_moves(&position)
            .into_iter()
            .map(|gm| gm.chess_move)
            .collect();
        let second: Vec<Move> = LegalMoveGenerator
            .generate_legal_moves(&position)
            .into_iter()
            .map(|gm| gm.chess_move)
            .collect();
        assert_eq!(first, second);
        assert_eq!(first[0].to_string(), "a2a3");
        assert_eq!(first[1].to_string(), "a2a4");
    }
}
