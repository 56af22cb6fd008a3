//! PGN read/write utilities for game history interchange.
//!
//! Writing emits the Seven Tag Roster in roster order, any further tags in
//! name order, a blank line, and numbered SAN movetext wrapped to a line
//! width and terminated by the result token.
//!
//! Reading only tokenizes: it returns the tags, the SAN move tokens and the
//! result. Moves are validated by replaying them through the game
//! controller, never here.

use std::collections::BTreeMap;
use std::fmt;

use crate::chess_errors::{NotationError, PgnError};

/// Tags every exported game carries, in export order.
pub const SEVEN_TAG_ROSTER: [&str; 7] =
    ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

/// PGN value for a date that is not known.
pub const UNKNOWN_DATE: &str = "????.??.??";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PgnResult {
    WhiteWins,
    BlackWins,
    Draw,
    #[default]
    Ongoing,
}

impl PgnResult {
    pub const fn as_str(self) -> &'static str {
        match self {
            PgnResult::WhiteWins => "1-0",
            PgnResult::BlackWins => "0-1",
            PgnResult::Draw => "1/2-1/2",
            PgnResult::Ongoing => "*",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1-0" => Some(PgnResult::WhiteWins),
            "0-1" => Some(PgnResult::BlackWins),
            "1/2-1/2" => Some(PgnResult::Draw),
            "*" => Some(PgnResult::Ongoing),
            _ => None,
        }
    }
}

impl fmt::Display for PgnResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tokenized PGN game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnGame {
    pub tags: BTreeMap<String, String>,
    pub san_tokens: Vec<String>,
    pub result: PgnResult,
}

/// Full PGN text: tag section, blank line, movetext.
///
/// Roster tags missing from `tags` are written as `?`; the `Result` tag
/// always mirrors `result`.
pub fn write_pgn(
    tags: &BTreeMap<String, String>,
    sans: &[String],
    result: PgnResult,
    line_width: usize,
) -> String {
    let mut out = String::new();

    for name in SEVEN_TAG_ROSTER {
        let value = match name {
            "Result" => result.as_str(),
            _ => tags.get(name).map_or("?", String::as_str),
        };
        push_tag(&mut out, name, value);
    }
    for (name, value) in tags {
        if !SEVEN_TAG_ROSTER.contains(&name.as_str()) {
            push_tag(&mut out, name, value);
        }
    }
    out.push('\n');

    out.push_str(&format_movetext(sans, result, line_width));
    out.push('\n');
    out
}

/// Numbered movetext (`1. e4 e5 2. Nf3`) ending in the result token, with
/// lines broken between tokens so none exceeds `line_width` when possible.
/// A move number stays on the same line as White's move.
pub fn format_movetext(sans: &[String], result: PgnResult, line_width: usize) -> String {
    let mut units = Vec::<String>::with_capacity(sans.len() + 1);
    for (ply, san) in sans.iter().enumerate() {
        if ply % 2 == 0 {
            units.push(format!("{}. {}", ply / 2 + 1, san));
        } else {
            units.push(san.clone());
        }
    }
    units.push(result.as_str().to_owned());

    let mut out = String::new();
    let mut line_len = 0usize;
    for unit in units {
        if line_len > 0 {
            if line_len + 1 + unit.len() > line_width {
                out.push('\n');
                line_len = 0;
            } else {
                out.push(' ');
                line_len += 1;
            }
        }
        out.push_str(&unit);
        line_len += unit.len();
    }
    out
}

pub fn read_pgn(pgn: &str) -> Result<PgnGame, PgnError> {
    let mut tags = BTreeMap::<String, String>::new();
    let mut movetext = String::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        // `%` at the start of a line escapes it from PGN processing.
        if trimmed.is_empty() || line.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') && movetext.trim().is_empty() {
            let (name, value) = parse_tag_line(trimmed)?;
            tags.insert(name, value);
        } else {
            movetext.push_str(line);
            movetext.push('\n');
        }
    }

    if tags.contains_key("FEN") || tags.get("SetUp").is_some_and(|v| v == "1") {
        return Err(PgnError::UnsupportedSetup);
    }

    let mut san_tokens = Vec::<String>::new();
    let mut result = None;
    for token in strip_comments_and_variations(&movetext).split_whitespace() {
        if let Some(found) = PgnResult::from_token(token) {
            result = Some(found);
            break;
        }
        if token.starts_with('$') {
            continue;
        }
        let san = strip_move_number(token);
        if !san.is_empty() {
            san_tokens.push(san.to_owned());
        }
    }

    let result = result
        .or_else(|| tags.get("Result").and_then(|v| PgnResult::from_token(v)))
        .unwrap_or_default();

    Ok(PgnGame {
        tags,
        san_tokens,
        result,
    })
}

fn parse_tag_line(line: &str) -> Result<(String, String), NotationError> {
    let invalid = || NotationError::InvalidTagPair(line.to_owned());

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?
        .trim();
    let (name, raw_value) = inner.split_once(char::is_whitespace).ok_or_else(invalid)?;
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid());
    }

    let quoted = raw_value
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    let mut value = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => value.push(chars.next().ok_or_else(invalid)?),
            '"' => return Err(invalid()),
            _ => value.push(ch),
        }
    }

    Ok((name.to_owned(), value))
}

fn push_tag(out: &mut String, name: &str, value: &str) {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    out.push_str(&format!("[{name} \"{escaped}\"]\n"));
}

/// Drops `{...}` comments, `;` rest-of-line comments and `(...)` variations,
/// which may nest.
fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_brace = false;
    let mut in_line_comment = false;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(' ');
            }
            continue;
        }
        if in_brace {
            if ch == '}' {
                in_brace = false;
                out.push(' ');
            }
            continue;
        }
        match ch {
            '{' => in_brace = true,
            ';' => in_line_comment = true,
            '(' => paren_depth += 1,
            ')' => {
                paren_depth = paren_depth.saturating_sub(1);
                out.push(' ');
            }
            _ if paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.e4` -> `e4`, `12...` -> `` and `e4` -> `e4`.
fn strip_move_number(token: &str) -> &str {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return token;
    }
    match token[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start_matches('.'),
        None => token,
    }
}
