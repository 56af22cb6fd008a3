//! Position-to-FEN serializer.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub fn generate_fen(position: &Position) -> String {
    let mut out = String::with_capacity(90);

    for rank in (0..8u8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            match Square::new(file, rank).and_then(|sq| position.board.piece_at(sq)) {
                Some(piece) => {
                    if empty_run > 0 {
                        out.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    let state = &position.state;
    out.push(' ');
    out.push(match state.active_color {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let rights = state.castling_rights;
    if rights.is_empty() {
        out.push('-');
    } else {
        for (color, side, ch) in [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ] {
            if rights.has(color, side) {
                out.push(ch);
            }
        }
    }

    out.push(' ');
    match state.en_passant_target {
        Some(sq) => out.push_str(&sq.to_string()),
        None => out.push('-'),
    }

    out.push_str(&format!(" {} {}", state.halfmove_clock, state.fullmove_number));
    out
}
