//! Crate root module declarations for the Plum Rules chess engine.
//!
//! Exposes the rules core (board representation, move generation, game
//! state transitions), the notation codecs (SAN, PGN, FEN) and the game
//! controller that ties them into a playable session with undo/redo.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod move_history;
    pub mod position;
    pub mod undo_state;
}

pub mod moves {
    pub mod leaper_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod piece_attacks;
    pub mod slider_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod move_generator;
    pub mod perft;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod pgn;
    pub mod san;
}

pub mod game {
    pub mod game_controller;
    pub mod game_status;
    pub mod session_config;
}
