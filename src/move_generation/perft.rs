//! Perft: exhaustive legal-move tree counts, the move generator's
//! correctness oracle.

use crate::game_state::position::Position;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_descriptions::SpecialMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn count_leaf(&mut self, mv: &GeneratedMove) {
        let chess_move = &mv.chess_move;
        self.nodes += 1;
        if chess_move.is_capture() {
            self.captures += 1;
        }
        if chess_move.special == SpecialMove::EnPassantCapture {
            self.en_passant += 1;
        }
        if chess_move.castle_side().is_some() {
            self.castles += 1;
        }
        if chess_move.promotion().is_some() {
            self.promotions += 1;
        }
        if mv.annotations.gives_check {
            self.checks += 1;
        }
        if mv.annotations.is_checkmate {
            self.checkmates += 1;
        }
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(position) {
        perft_recurse(generator, &mv, depth, 1, &mut total);
    }
    total
}

/// Per-root-move breakdown, in generation order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> Vec<(GeneratedMove, PerftCounts)> {
    if depth == 0 {
        return Vec::new();
    }

    generator
        .generate_legal_moves(position)
        .into_iter()
        .map(|mv| {
            let mut local = PerftCounts::default();
            perft_recurse(generator, &mv, depth, 1, &mut local);
            (mv, local)
        })
        .collect()
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        counts.count_leaf(mv);
        return;
    }

    let mut subtree = PerftCounts::default();
    for child in generator.generate_legal_moves(&mv.position_after) {
        perft_recurse(generator, &child, search_depth, current_depth + 1, &mut subtree);
    }
    counts.merge(subtree);
}
