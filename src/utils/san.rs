//! Standard Algebraic Notation for single moves.
//!
//! Encoding needs the full legal move list of the position so that the
//! origin is disambiguated only as far as necessary. Decoding parses the
//! token into a `ParsedSan` and then filters the legal move list with it;
//! geometry alone never resolves a move.
//!
//! Accepted on input beyond canonical SAN: `0-0`/`0-0-0`, a promotion
//! letter without `=`, redundant disambiguation, a missing capture marker,
//! and trailing `+ # ! ?` marks (ignored for matching).

use std::fmt;
use std::str::FromStr;

use crate::chess_errors::{IllegalMoveReason, MoveError, NotationError};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::castling_obstruction;
use crate::move_generation::legal_move_generator::{generate_pseudo_legal_moves, has_legal_move};
use crate::move_generation::move_generator::GeneratedMove;
use crate::moves::move_descriptions::Move;
use crate::moves::piece_attacks::empty_board_reach;
use crate::utils::algebraic::{algebraic_to_square, file_from_char, rank_from_char};

/// A SAN token with check marks stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedSan {
    Castle(CastleSide),
    Normal {
        kind: PieceKind,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        capture: bool,
        to: Square,
        promotion: Option<PieceKind>,
    },
}

impl ParsedSan {
    /// The canonical SAN body for `mv`, disambiguated against `legal`.
    pub fn from_move(mv: &Move, legal: &[GeneratedMove]) -> ParsedSan {
        if let Some(side) = mv.castle_side() {
            return ParsedSan::Castle(side);
        }

        let (from_file, from_rank) = if mv.piece.kind == PieceKind::Pawn {
            (mv.is_capture().then(|| mv.from.file()), None)
        } else {
            let mut ambiguous = false;
            let mut same_file = false;
            let mut same_rank = false;
            for rival in legal.iter().map(|gm| &gm.chess_move) {
                if rival.from == mv.from
                    || rival.piece != mv.piece
                    || rival.to != mv.to
                    || rival.castle_side().is_some()
                {
                    continue;
                }
                ambiguous = true;
                same_file |= rival.from.file() == mv.from.file();
                same_rank |= rival.from.rank() == mv.from.rank();
            }
            (
                (ambiguous && (!same_file || same_rank)).then(|| mv.from.file()),
                same_file.then(|| mv.from.rank()),
            )
        };

        ParsedSan::Normal {
            kind: mv.piece.kind,
            from_file,
            from_rank,
            capture: mv.is_capture(),
            to: mv.to,
            promotion: mv.promotion(),
        }
    }

    /// Whether `mv` is consistent with this token. A missing capture marker
    /// still matches a capture.
    pub fn matches(&self, mv: &Move) -> bool {
        match *self {
            ParsedSan::Castle(side) => mv.castle_side() == Some(side),
            ParsedSan::Normal {
                kind,
                from_file,
                from_rank,
                capture,
                to,
                promotion,
            } => {
                mv.castle_side().is_none()
                    && mv.piece.kind == kind
                    && mv.to == to
                    && from_file.is_none_or(|f| f == mv.from.file())
                    && from_rank.is_none_or(|r| r == mv.from.rank())
                    && (!capture || mv.is_capture())
                    && promotion == mv.promotion()
            }
        }
    }
}

impl FromStr for ParsedSan {
    type Err = NotationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let token = text.trim();
        if token.is_empty() {
            return Err(NotationError::EmptyMove);
        }

        let body = token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));
        match body {
            "O-O" | "0-0" => return Ok(ParsedSan::Castle(CastleSide::Kingside)),
            "O-O-O" | "0-0-0" => return Ok(ParsedSan::Castle(CastleSide::Queenside)),
            "" => return Err(NotationError::malformed(token, "no move before the annotation")),
            _ => {}
        }
        if !body.is_ascii() {
            return Err(NotationError::malformed(token, "unexpected character"));
        }

        let (kind, rest) = match body.chars().next() {
            Some(ch) if ch.is_ascii_uppercase() => {
                let kind = PieceKind::from_letter(ch)
                    .filter(|kind| *kind != PieceKind::Pawn)
                    .ok_or_else(|| NotationError::malformed(token, "unknown piece letter"))?;
                (kind, &body[1..])
            }
            _ => (PieceKind::Pawn, body),
        };

        let (rest, promotion) = match rest.chars().last() {
            Some(letter) if letter.is_ascii_alphabetic() => {
                let head = &rest[..rest.len() - 1];
                let (head, explicit) = match head.strip_suffix('=') {
                    Some(head) => (head, true),
                    None => (head, false),
                };
                if !explicit && !letter.is_ascii_uppercase() {
                    return Err(NotationError::malformed(token, "missing destination square"));
                }
                let promotion = PieceKind::from_letter(letter)
                    .filter(|kind| kind.is_promotion_target())
                    .ok_or_else(|| NotationError::malformed(token, "invalid promotion piece"))?;
                (head, Some(promotion))
            }
            _ => (rest, None),
        };
        if promotion.is_some() && kind != PieceKind::Pawn {
            return Err(NotationError::malformed(token, "only pawns promote"));
        }

        if rest.len() < 2 {
            return Err(NotationError::malformed(token, "missing destination square"));
        }
        let (head, destination) = rest.split_at(rest.len() - 2);
        let to = algebraic_to_square(destination)?;

        let (head, capture) = match head.strip_suffix('x') {
            Some(head) => (head, true),
            None => (head, false),
        };

        let mut from_file = None;
        let mut from_rank = None;
        for ch in head.chars() {
            let origin_unset = from_file.is_none() && from_rank.is_none();
            if let Some(file) = file_from_char(ch).filter(|_| origin_unset) {
                from_file = Some(file);
            } else if let Some(rank) = rank_from_char(ch).filter(|_| from_rank.is_none()) {
                from_rank = Some(rank);
            } else {
                return Err(NotationError::malformed(token, "unexpected origin text"));
            }
        }

        Ok(ParsedSan::Normal {
            kind,
            from_file,
            from_rank,
            capture,
            to,
            promotion,
        })
    }
}

impl fmt::Display for ParsedSan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParsedSan::Castle(CastleSide::Kingside) => f.write_str("O-O"),
            ParsedSan::Castle(CastleSide::Queenside) => f.write_str("O-O-O"),
            ParsedSan::Normal {
                kind,
                from_file,
                from_rank,
                capture,
                to,
                promotion,
            } => {
                if kind != PieceKind::Pawn {
                    write!(f, "{}", kind.letter())?;
                }
                if let Some(file) = from_file {
                    write!(f, "{}", char::from(b'a' + file))?;
                }
                if let Some(rank) = from_rank {
                    write!(f, "{}", char::from(b'1' + rank))?;
                }
                if capture {
                    f.write_str("x")?;
                }
                write!(f, "{to}")?;
                if let Some(kind) = promotion {
                    write!(f, "={}", kind.letter())?;
                }
                Ok(())
            }
        }
    }
}

/// `+` or `#` for the position reached by a move, empty when no check.
pub fn check_suffix(position_after: &Position) -> &'static str {
    if !position_after.is_in_check() {
        ""
    } else if has_legal_move(position_after) {
        "+"
    } else {
        "#"
    }
}

/// Full SAN for `generated`, which must be an entry of `legal`.
pub fn encode_san(generated: &GeneratedMove, legal: &[GeneratedMove]) -> String {
    let body = ParsedSan::from_move(&generated.chess_move, legal);
    format!("{body}{}", check_suffix(&generated.position_after))
}

/// Resolves `text` to exactly one entry of `legal`, the legal moves of
/// `position`. Never mutates anything.
pub fn decode_san(
    text: &str,
    position: &Position,
    legal: &[GeneratedMove],
) -> Result<GeneratedMove, MoveError> {
    let parsed: ParsedSan = text.parse()?;
    let token = text.trim();

    let candidates: Vec<&GeneratedMove> = legal
        .iter()
        .filter(|gm| parsed.matches(&gm.chess_move))
        .collect();

    match candidates.as_slice() {
        [single] => Ok(**single),
        [] => Err(MoveError::Illegal {
            token: token.to_owned(),
            reason: diagnose(&parsed, position),
        }),
        many => Err(MoveError::Ambiguous {
            token: token.to_owned(),
            candidates: many.iter().map(|gm| encode_san(gm, legal)).collect(),
        }),
    }
}

/// Names the rule a well-formed token breaks when no legal move matches it.
fn diagnose(parsed: &ParsedSan, position: &Position) -> IllegalMoveReason {
    let (kind, from_file, from_rank, capture, to, promotion) = match *parsed {
        ParsedSan::Castle(side) => {
            return castling_obstruction(position, side)
                .unwrap_or(IllegalMoveReason::LeavesKingInCheck);
        }
        ParsedSan::Normal {
            kind,
            from_file,
            from_rank,
            capture,
            to,
            promotion,
        } => (kind, from_file, from_rank, capture, to, promotion),
    };

    let mover = position.active_color();
    let board = &position.board;
    let reachers = |color: Color| -> Vec<Square> {
        let piece = Piece::new(color, kind);
        squares_of(board.pieces_of(color, kind))
            .filter(|sq| from_file.is_none_or(|f| f == sq.file()))
            .filter(|sq| from_rank.is_none_or(|r| r == sq.rank()))
            .filter(|&sq| empty_board_reach(piece, sq) & to.bit() != 0)
            .collect()
    };

    let own = reachers(mover);
    if own.is_empty() {
        return if reachers(mover.opposite()).is_empty() {
            IllegalMoveReason::NoPieceCanReach
        } else {
            IllegalMoveReason::WrongTurn
        };
    }

    if kind == PieceKind::Pawn {
        let last_rank = to.rank() == mover.promotion_rank();
        match promotion {
            Some(_) if !last_rank => return IllegalMoveReason::InvalidPromotion,
            None if last_rank => return IllegalMoveReason::PromotionRequired,
            _ => {}
        }
    }

    let occupant = board.piece_at(to);
    if occupant.is_some_and(|piece| piece.color == mover) {
        return IllegalMoveReason::OwnPieceOnDestination;
    }

    let en_passant = kind == PieceKind::Pawn && position.state.en_passant_target == Some(to);
    if occupant.is_none() && !en_passant {
        let diagonal_only = kind == PieceKind::Pawn && own.iter().all(|sq| sq.file() != to.file());
        if capture || diagonal_only {
            return IllegalMoveReason::NothingToCapture;
        }
    }

    if generate_pseudo_legal_moves(position).iter().any(|mv| parsed.matches(mv)) {
        IllegalMoveReason::LeavesKingInCheck
    } else {
        IllegalMoveReason::PathBlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::moves::move_descriptions::SpecialMove;

    fn legal(position: &Position) -> Vec<GeneratedMove> {
        LegalMoveGenerator.generate_legal_moves(position)
    }

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    fn san_of(position: &Position, coordinate: &str) -> String {
        let moves = legal(position);
        let generated = moves
            .iter()
            .find(|gm| gm.chess_move.to_string() == coordinate)
            .unwrap_or_else(|| panic!("{coordinate} should be legal"));
        encode_san(generated, &moves)
    }

    fn illegal_reason(position: &Position, text: &str) -> IllegalMoveReason {
        match decode_san(text, position, &legal(position)) {
            Err(MoveError::Illegal { reason, .. }) => reason,
            other => panic!("`{text}` should be illegal, got {other:?}"),
        }
    }

    #[test]
    fn parses_piece_disambiguation_capture_and_promotion() {
        let parsed: ParsedSan = "Nbxd2+".parse().expect("SAN should parse");
        assert_eq!(
            parsed,
            ParsedSan::Normal {
                kind: PieceKind::Knight,
                from_file: Some(1),
                from_rank: None,
                capture: true,
                to: algebraic_to_square("d2").expect("d2"),
                promotion: None,
            }
        );

        let promo: ParsedSan = "exf8=N#".parse().expect("SAN should parse");
        assert_eq!(promo.to_string(), "exf8=N");
        let bare: ParsedSan = "b1Q".parse().expect("SAN should parse");
        assert_eq!(bare.to_string(), "b1=Q");

        assert_eq!("0-0-0".parse::<ParsedSan>(), Ok(ParsedSan::Castle(CastleSide::Queenside)));
        assert_eq!("O-O+".parse::<ParsedSan>(), Ok(ParsedSan::Castle(CastleSide::Kingside)));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!("".parse::<ParsedSan>(), Err(NotationError::EmptyMove));
        assert_eq!("  ".parse::<ParsedSan>(), Err(NotationError::EmptyMove));
        for bad in ["Zf3", "e9", "Nf", "a8=K", "Ke2=Q", "Nxx3", "e4e4e4", "+", "nf3"] {
            assert!(bad.parse::<ParsedSan>().is_err(), "`{bad}` should not parse");
        }
        assert_eq!(
            "e9".parse::<ParsedSan>(),
            Err(NotationError::InvalidSquare("e9".to_owned()))
        );
    }

    #[test]
    fn encodes_pawn_captures_with_origin_file_and_en_passant() {
        let mut game = Position::new_game();
        for coordinate in ["e2e4", "d7d5"] {
            let mv = legal(&game)
                .into_iter()
                .find(|gm| gm.chess_move.to_string() == coordinate)
                .expect("opening move should be legal");
            game = mv.position_after;
        }
        assert_eq!(san_of(&game, "e4d5"), "exd5");
        assert_eq!(san_of(&game, "g1f3"), "Nf3");

        let ep = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert_eq!(san_of(&ep, "e5d6"), "exd6");
        let decoded = decode_san("exd6", &ep, &legal(&ep)).expect("en passant should decode");
        assert_eq!(decoded.chess_move.special, SpecialMove::EnPassantCapture);
    }

    #[test]
    fn disambiguates_by_file_then_rank_then_both() {
        let knights = position("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert_eq!(san_of(&knights, "b1d2"), "Nbd2");
        assert_eq!(san_of(&knights, "f1d2"), "Nfd2");
        assert_eq!(san_of(&knights, "b1c3"), "Nc3");

        let rooks = position("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
        assert_eq!(san_of(&rooks, "a1a3"), "R1a3");
        assert_eq!(san_of(&rooks, "a5a3"), "R5a3");

        let queens = position("4k2K/8/8/8/8/Q7/8/Q1Q5 w - - 0 1");
        assert_eq!(san_of(&queens, "a1b2"), "Qa1b2");
        assert_eq!(san_of(&queens, "a3b2"), "Q3b2");
        assert_eq!(san_of(&queens, "c1b2"), "Qcb2");
    }

    #[test]
    fn renders_castling_promotion_and_mate_suffix() {
        let castles = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(san_of(&castles, "e1g1"), "O-O");
        assert_eq!(san_of(&castles, "e1c1"), "O-O-O");

        let promo = position("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(san_of(&promo, "a7a8q"), "a8=Q+");
        assert_eq!(san_of(&promo, "a7a8n"), "a8=N");

        let mate = position("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        assert_eq!(san_of(&mate, "a1a8"), "Ra8#");
        assert_eq!(san_of(&mate, "a1a7"), "Ra7");
    }

    #[test]
    fn decodes_lenient_forms() {
        let castles = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let moves = legal(&castles);
        let long = decode_san("0-0-0", &castles, &moves).expect("castle should decode");
        assert_eq!(long.chess_move.special, SpecialMove::CastleQueenside);
        // Plain king steps never resolve to castling.
        assert!(decode_san("Kc1", &castles, &moves).is_err());

        let mate = position("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let moves = legal(&mate);
        let with_mark = decode_san("Ra8+", &mate, &moves).expect("check mark is ignored");
        let redundant = decode_san("Ra1a8", &mate, &moves).expect("redundant origin is accepted");
        assert_eq!(with_mark, redundant);

        let mut game = Position::new_game();
        for text in ["e4", "d5"] {
            game = decode_san(text, &game, &legal(&game)).expect("opening").position_after;
        }
        let capture = decode_san("ed5", &game, &legal(&game)).expect("missing x is accepted");
        assert!(capture.chess_move.is_capture());

        let promo = position("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let moves = legal(&promo);
        for text in ["a8=Q", "a8Q", "a8=q"] {
            let decoded = decode_san(text, &promo, &moves).expect("promotion should decode");
            assert_eq!(decoded.chess_move.promotion(), Some(PieceKind::Queen));
        }
    }

    #[test]
    fn reports_ambiguity_with_candidates() {
        let knights = position("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        let err = decode_san("Nd2", &knights, &legal(&knights)).expect_err("Nd2 is ambiguous");
        assert_eq!(
            err,
            MoveError::Ambiguous {
                token: "Nd2".to_owned(),
                candidates: vec!["Nbd2".to_owned(), "Nfd2".to_owned()],
            }
        );
    }

    #[test]
    fn diagnoses_rule_categories() {
        let start = Position::new_game();
        assert_eq!(illegal_reason(&start, "e5"), IllegalMoveReason::WrongTurn);
        assert_eq!(illegal_reason(&start, "Nf6"), IllegalMoveReason::WrongTurn);
        assert_eq!(illegal_reason(&start, "Nd4"), IllegalMoveReason::NoPieceCanReach);
        assert_eq!(illegal_reason(&start, "Bc4"), IllegalMoveReason::PathBlocked);
        assert_eq!(illegal_reason(&start, "Qh5"), IllegalMoveReason::PathBlocked);
        assert_eq!(illegal_reason(&start, "Ke2"), IllegalMoveReason::OwnPieceOnDestination);
        assert_eq!(illegal_reason(&start, "Nxf3"), IllegalMoveReason::NothingToCapture);
        assert_eq!(illegal_reason(&start, "exd3"), IllegalMoveReason::NothingToCapture);
        assert_eq!(illegal_reason(&start, "O-O"), IllegalMoveReason::CastlingPathBlocked);

        let pinned = position("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert_eq!(illegal_reason(&pinned, "Nc3"), IllegalMoveReason::LeavesKingInCheck);

        let promo = position("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(illegal_reason(&promo, "a8"), IllegalMoveReason::PromotionRequired);

        let early = position("4k3/8/8/8/8/P7/8/4K3 w - - 0 1");
        assert_eq!(illegal_reason(&early, "a4=Q"), IllegalMoveReason::InvalidPromotion);

        let through = position("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1");
        assert_eq!(illegal_reason(&through, "O-O"), IllegalMoveReason::CastlingThroughCheck);
    }

    #[test]
    fn every_legal_move_round_trips_through_san() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        for fen in fens {
            let pos = position(fen);
            let moves = legal(&pos);
            for generated in &moves {
                let san = encode_san(generated, &moves);
                let decoded = decode_san(&san, &pos, &moves)
                    .unwrap_or_else(|err| panic!("{san} in {fen} failed: {err}"));
                assert_eq!(decoded.chess_move, generated.chess_move, "{san} in {fen}");
            }
        }
    }
}
