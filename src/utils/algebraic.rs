//! Square coordinate conversions (`e4` <-> `Square`).
//!
//! Shared by the FEN, SAN and PGN components.

use crate::chess_errors::NotationError;
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, NotationError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::InvalidSquare(square.to_owned()));
    }

    let file = file_from_char(bytes[0] as char);
    let rank = rank_from_char(bytes[1] as char);
    match (file, rank) {
        (Some(f), Some(r)) => {
            Square::new(f, r).ok_or_else(|| NotationError::InvalidSquare(square.to_owned()))
        }
        _ => Err(NotationError::InvalidSquare(square.to_owned())),
    }
}

/// `'a'..='h'` to a 0-based file index.
#[inline]
pub fn file_from_char(ch: char) -> Option<u8> {
    ('a'..='h').contains(&ch).then(|| ch as u8 - b'a')
}

/// `'1'..='8'` to a 0-based rank index.
#[inline]
pub fn rank_from_char(ch: char) -> Option<u8> {
    ('1'..='8').contains(&ch).then(|| ch as u8 - b'1')
}
