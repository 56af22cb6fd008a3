//! FEN-to-Position parser.
//!
//! FEN is used to set up fixture positions for tests, perft and benches. The
//! game controller itself always starts from the standard position.

use crate::chess_errors::NotationError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<Position, NotationError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    // Clocks are optional in EPD-style records.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let state = GameState {
        active_color: parse_side_to_move(side_part)?,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_target: parse_en_passant_square(en_passant_part)?,
        halfmove_clock: halfmove_part
            .parse::<u16>()
            .map_err(|_| invalid(&format!("halfmove clock `{halfmove_part}`")))?,
        fullmove_number: fullmove_part
            .parse::<u16>()
            .map_err(|_| invalid(&format!("fullmove number `{fullmove_part}`")))?
            .max(1),
    };

    for color in Color::ALL {
        if board.pieces_of(color, PieceKind::King).count_ones() != 1 {
            return Err(invalid(&format!("{color} must have exactly one king")));
        }
    }

    Ok(Position { board, state })
}

fn invalid(detail: &str) -> NotationError {
    NotationError::InvalidFen(detail.to_owned())
}

fn parse_board(board_part: &str) -> Result<Board, NotationError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count `{ch}`")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("piece character `{ch}`")))?;
            let square =
                Square::new(file, rank).ok_or_else(|| invalid("rank has too many files"))?;
            board.place(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, NotationError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("side to move `{side_part}`"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, NotationError> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.grant(Color::White, CastleSide::Kingside),
            'Q' => rights.grant(Color::White, CastleSide::Queenside),
            'k' => rights.grant(Color::Black, CastleSide::Kingside),
            'q' => rights.grant(Color::Black, CastleSide::Queenside),
            _ => return Err(invalid(&format!("castling rights character `{ch}`"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, NotationError> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(&format!("en-passant square `{en_passant_part}`")))
}

#[cfg(test)]
mod tests {
    use super::{invalid, parse_fen};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{CastleSide, Color};
    use crate::game_state::position::Position;

    #[test]
    fn parse_starting_fen_matches_new_game() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(position, Position::new_game());
        assert!(position.state.castling_rights.has(Color::Black, CastleSide::Queenside));
    }

    #[test]
    fn rejects_malformed_records() {
        for fen in [
            "",
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
            "rnbqkbnr/pppppppp/54/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1",
        ] {
            assert!(parse_fen(fen).is_err(), "{fen:?} should be rejected");
        }
    }

    #[test]
    fn long_runs_of_empty_squares_are_rejected() {
        let fen = format!("{}/8/8/8/8/8/8/4K2k w - - 0 1", "8".repeat(40));
        let err = parse_fen(&fen).expect_err("overlong rank should be rejected");
        assert_eq!(err, invalid("rank has too many files"));
    }

    #[test]
    fn clocks_default_when_omitted() {
        let position =
            parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").expect("four-field FEN should parse");
        assert_eq!(position.state.halfmove_clock, 0);
        assert_eq!(position.state.fullmove_number, 1);
        assert_eq!(position.active_color(), Color::Black);
    }
}
