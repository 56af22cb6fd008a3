use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

/// Single undo record for `make_move` / `unmake_move`.
///
/// The move carries the captured piece; the state before the move restores
/// castling rights, en-passant target and clocks exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndoState {
    pub mv: Move,
    pub prev_state: GameState,
}
