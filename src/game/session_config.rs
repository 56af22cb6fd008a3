//! Per-game settings: PGN tag values and export layout.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::utils::pgn::{PgnResult, SEVEN_TAG_ROSTER, UNKNOWN_DATE};

/// PGN export width, per the PGN standard's line length limit.
pub const DEFAULT_LINE_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub event: String,
    pub site: String,
    /// PGN date value (`YYYY.MM.DD`, `?` for unknown parts).
    pub date: String,
    pub round: String,
    pub white: String,
    pub black: String,
    /// Tags outside the Seven Tag Roster, written after it in name order.
    pub extra_tags: BTreeMap<String, String>,
    pub line_width: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event: "?".to_owned(),
            site: "?".to_owned(),
            date: UNKNOWN_DATE.to_owned(),
            round: "?".to_owned(),
            white: "?".to_owned(),
            black: "?".to_owned(),
            extra_tags: BTreeMap::new(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl SessionConfig {
    /// Default config stamped with the local calendar date.
    pub fn dated_today() -> Self {
        Self::default().with_date(Local::now().date_naive())
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date.format("%Y.%m.%d").to_string();
        self
    }

    pub fn with_players(mut self, white: impl Into<String>, black: impl Into<String>) -> Self {
        self.white = white.into();
        self.black = black.into();
        self
    }

    /// Config carrying the tags of an imported game. Missing roster tags
    /// keep their defaults; `Result` is recomputed on export and dropped.
    pub fn from_tags(tags: &BTreeMap<String, String>, line_width: usize) -> Self {
        let mut config = Self {
            line_width,
            ..Self::default()
        };
        for (name, value) in tags {
            let slot = match name.as_str() {
                "Event" => &mut config.event,
                "Site" => &mut config.site,
                "Date" => &mut config.date,
                "Round" => &mut config.round,
                "White" => &mut config.white,
                "Black" => &mut config.black,
                "Result" => continue,
                _ => {
                    config.extra_tags.insert(name.clone(), value.clone());
                    continue;
                }
            };
            *slot = value.clone();
        }
        config
    }

    /// Every tag to export for a game ending in `result`.
    pub fn tags(&self, result: PgnResult) -> BTreeMap<String, String> {
        let mut tags = self.extra_tags.clone();
        let roster_values = [
            self.event.as_str(),
            self.site.as_str(),
            self.date.as_str(),
            self.round.as_str(),
            self.white.as_str(),
            self.black.as_str(),
            result.as_str(),
        ];
        for (name, value) in SEVEN_TAG_ROSTER.iter().zip(roster_values) {
            tags.insert((*name).to_owned(), value.to_owned());
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_deterministic() {
        let config = SessionConfig::default();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.date, "????.??.??");
        assert_eq!(config.line_width, 80);
    }

    #[test]
    fn dates_use_pgn_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        assert_eq!(SessionConfig::default().with_date(date).date, "2024.03.09");

        let today = SessionConfig::dated_today();
        assert_eq!(today.date.len(), 10);
        assert!(!today.date.contains('?'));
    }

    #[test]
    fn tags_round_trip_through_config() {
        let mut imported = BTreeMap::new();
        imported.insert("White".to_owned(), "Anderssen".to_owned());
        imported.insert("Result".to_owned(), "1-0".to_owned());
        imported.insert("ECO".to_owned(), "C33".to_owned());

        let config = SessionConfig::from_tags(&imported, 60);
        assert_eq!(config.white, "Anderssen");
        assert_eq!(config.black, "?");
        assert_eq!(config.line_width, 60);
        assert_eq!(config.extra_tags.get("ECO").map(String::as_str), Some("C33"));

        let exported = config.tags(PgnResult::Draw);
        assert_eq!(exported.get("Result").map(String::as_str), Some("1/2-1/2"));
        assert_eq!(exported.get("White").map(String::as_str), Some("Anderssen"));
        assert_eq!(exported.get("ECO").map(String::as_str), Some("C33"));
        assert_eq!(exported.len(), 8);
    }
}
