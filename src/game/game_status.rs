//! Game outcome classification.

use std::fmt;

use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVE_LIMIT, REPETITION_DRAW_COUNT};
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::utils::pgn::PgnResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    FiftyMove,
    InsufficientMaterial,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    InProgress,
    Check,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    /// Status of `position` for the side to move. `repetitions` is how many
    /// times this exact position has occurred in the game, itself included.
    ///
    /// Precedence: checkmate, stalemate, insufficient material, threefold
    /// repetition, fifty-move rule, check.
    pub fn evaluate(position: &Position, repetitions: usize) -> GameStatus {
        let in_check = position.is_in_check();

        if !has_legal_move(position) {
            return if in_check {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }
        if position.has_insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        if repetitions >= REPETITION_DRAW_COUNT {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }
        if position.state.halfmove_clock >= FIFTY_MOVE_HALFMOVE_LIMIT {
            return GameStatus::Draw(DrawReason::FiftyMove);
        }
        if in_check {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw(_)
        )
    }

    /// PGN result token; `side_to_move` is the side this status was
    /// evaluated for, so on checkmate it is the loser.
    pub const fn pgn_result(self, side_to_move: Color) -> PgnResult {
        match self {
            GameStatus::Checkmate => match side_to_move {
                Color::White => PgnResult::BlackWins,
                Color::Black => PgnResult::WhiteWins,
            },
            GameStatus::Stalemate | GameStatus::Draw(_) => PgnResult::Draw,
            GameStatus::InProgress | GameStatus::Check => PgnResult::Ongoing,
        }
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMove => f.write_str("fifty-move rule"),
            DrawReason::InsufficientMaterial => f.write_str("insufficient material"),
            DrawReason::ThreefoldRepetition => f.write_str("threefold repetition"),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("in progress"),
            GameStatus::Check => f.write_str("check"),
            GameStatus::Checkmate => f.write_str("checkmate"),
            GameStatus::Stalemate => f.write_str("stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(fen: &str, repetitions: usize) -> GameStatus {
        let position = Position::from_fen(fen).expect("FEN should parse");
        GameStatus::evaluate(&position, repetitions)
    }

    #[test]
    fn start_position_is_in_progress() {
        assert_eq!(GameStatus::evaluate(&Position::new_game(), 1), GameStatus::InProgress);
    }

    #[test]
    fn mate_and_stalemate_are_told_apart_by_check() {
        assert_eq!(status("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1", 1), GameStatus::Checkmate);
        assert_eq!(status("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 1), GameStatus::Stalemate);
        assert_eq!(status("6k1/5ppp/8/8/8/8/8/R5K1 b - - 0 1", 1), GameStatus::InProgress);
        assert_eq!(status("6k1/6pp/8/8/8/8/8/R5K1 w - - 0 1", 1), GameStatus::InProgress);
        assert_eq!(status("R5k1/6pp/8/8/8/8/8/6K1 b - - 0 1", 1), GameStatus::Check);
    }

    #[test]
    fn draw_conditions_follow_precedence() {
        assert_eq!(
            status("8/8/8/4k3/8/4K3/8/8 w - - 0 1", 1),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
        // Bare kings outrank repetition and the fifty-move rule.
        assert_eq!(
            status("8/8/8/4k3/8/4K3/8/8 b - - 120 80", 3),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
        assert_eq!(
            status("4k3/8/8/8/8/8/8/R3K3 w - - 100 70", 3),
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        );
        assert_eq!(
            status("4k3/8/8/8/8/8/8/R3K3 w - - 100 70", 2),
            GameStatus::Draw(DrawReason::FiftyMove)
        );
        assert_eq!(status("4k3/8/8/8/8/8/8/R3K3 w - - 99 70", 2), GameStatus::InProgress);
    }

    #[test]
    fn checkmate_on_the_fiftieth_move_is_still_checkmate() {
        assert_eq!(status("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 80", 1), GameStatus::Checkmate);
    }

    #[test]
    fn results_and_terminality() {
        assert_eq!(GameStatus::Checkmate.pgn_result(Color::Black), PgnResult::WhiteWins);
        assert_eq!(GameStatus::Checkmate.pgn_result(Color::White), PgnResult::BlackWins);
        assert_eq!(GameStatus::Stalemate.pgn_result(Color::White), PgnResult::Draw);
        assert_eq!(GameStatus::Check.pgn_result(Color::White), PgnResult::Ongoing);

        assert!(GameStatus::Draw(DrawReason::FiftyMove).is_terminal());
        assert!(!GameStatus::Check.is_terminal());
        assert_eq!(
            GameStatus::Draw(DrawReason::ThreefoldRepetition).to_string(),
            "draw by threefold repetition"
        );
    }
}
