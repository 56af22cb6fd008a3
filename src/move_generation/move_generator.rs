use crate::game_state::position::Position;
use crate::moves::move_descriptions::{Move, MoveAnnotations};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedMove {
    pub chess_move: Move,
    pub position_after: Position,
    pub annotations: MoveAnnotations,
}

/// Produces the legal moves of the side to move, in a stable order.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove>;
}
