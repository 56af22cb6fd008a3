//! Owned record of the moves played in one game, with a redo tail.
//!
//! `entries[..committed]` are the moves currently on the board, in play
//! order. `entries[committed..]` is the redo buffer: moves that were undone
//! and can be replayed in their original order. Committing a new move drops
//! the redo buffer.

use crate::game_state::position::{Position, RepetitionKey};
use crate::game_state::undo_state::UndoState;
use crate::moves::move_descriptions::MoveRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub undo: UndoState,
    pub record: MoveRecord,
    pub key_after: RepetitionKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    initial_key: RepetitionKey,
    entries: Vec<HistoryEntry>,
    committed: usize,
}

impl MoveHistory {
    pub fn new(initial: &Position) -> Self {
        Self {
            initial_key: initial.repetition_key(),
            entries: Vec::new(),
            committed: 0,
        }
    }

    /// Appends `entry` after the committed moves, discarding any redo tail.
    pub fn commit(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.committed);
        self.entries.push(entry);
        self.committed += 1;
    }

    /// Moves the most recent committed entry into the redo buffer.
    pub fn step_back(&mut self) -> Option<&HistoryEntry> {
        self.committed = self.committed.checked_sub(1)?;
        self.entries.get(self.committed)
    }

    /// Re-commits the first entry of the redo buffer.
    pub fn step_forward(&mut self) -> Option<&HistoryEntry> {
        let entry = self.entries.get(self.committed)?;
        self.committed += 1;
        Some(entry)
    }

    #[inline]
    pub fn committed(&self) -> &[HistoryEntry] {
        &self.entries[..self.committed]
    }

    #[inline]
    pub fn committed_len(&self) -> usize {
        self.committed
    }

    #[inline]
    pub fn redo_len(&self) -> usize {
        self.entries.len() - self.committed
    }

    pub fn last_record(&self) -> Option<&MoveRecord> {
        self.committed().last().map(|entry| &entry.record)
    }

    pub fn records(&self) -> impl Iterator<Item = &MoveRecord> {
        self.committed().iter().map(|entry| &entry.record)
    }

    /// How often `key` occurs among the initial position and every committed
    /// position.
    pub fn repetition_count(&self, key: &RepetitionKey) -> usize {
        let committed = self
            .committed()
            .iter()
            .filter(|entry| entry.key_after == *key)
            .count();
        committed + usize::from(self.initial_key == *key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;

    /// Plays `coordinates` from the start, returning the position and one
    /// history entry per move.
    fn play(coordinates: &[&str]) -> (Position, Vec<HistoryEntry>) {
        let mut position = Position::new_game();
        let mut entries = Vec::new();
        for coordinate in coordinates {
            let generated = LegalMoveGenerator
                .generate_legal_moves(&position)
                .into_iter()
                .find(|gm| gm.chess_move.to_string() == *coordinate)
                .unwrap_or_else(|| panic!("{coordinate} should be legal"));
            let undo = position.make_move(&generated.chess_move);
            entries.push(HistoryEntry {
                undo,
                record: MoveRecord {
                    chess_move: generated.chess_move,
                    annotations: generated.annotations,
                    san: coordinate.to_string(),
                },
                key_after: position.repetition_key(),
            });
        }
        (position, entries)
    }

    #[test]
    fn stepping_moves_the_committed_pointer_within_bounds() {
        let (_, entries) = play(&["e2e4", "e7e5", "g1f3"]);
        let mut history = MoveHistory::new(&Position::new_game());
        for entry in entries {
            history.commit(entry);
        }
        assert_eq!(history.committed_len(), 3);

        assert_eq!(history.step_back().map(|e| e.record.san.clone()), Some("g1f3".to_owned()));
        assert_eq!(history.step_back().map(|e| e.record.san.clone()), Some("e7e5".to_owned()));
        assert_eq!(history.committed_len(), 1);
        assert_eq!(history.redo_len(), 2);

        assert_eq!(history.step_forward().map(|e| e.record.san.clone()), Some("e7e5".to_owned()));
        assert_eq!(history.redo_len(), 1);

        assert!(history.step_back().is_some());
        assert!(history.step_back().is_some());
        assert!(history.step_back().is_none());
        assert_eq!(history.committed_len(), 0);
        assert_eq!(history.redo_len(), 3);
    }

    #[test]
    fn committing_after_undo_truncates_the_redo_buffer() {
        let (_, mainline) = play(&["e2e4", "e7e5"]);
        let (_, sideline) = play(&["e2e4", "c7c5"]);
        let mut history = MoveHistory::new(&Position::new_game());
        for entry in mainline {
            history.commit(entry);
        }
        history.step_back();
        history.commit(sideline[1].clone());

        assert_eq!(history.redo_len(), 0);
        let sans: Vec<&str> = history.records().map(|r| r.san.as_str()).collect();
        assert_eq!(sans, ["e2e4", "c7c5"]);
        assert!(history.step_forward().is_none());
    }

    #[test]
    fn repetition_count_includes_the_initial_position() {
        let (position, entries) = play(&["g1f3", "g8f6", "f3g1", "f6g8"]);
        let mut history = MoveHistory::new(&Position::new_game());
        for entry in entries {
            history.commit(entry);
        }
        assert_eq!(position.repetition_key(), Position::new_game().repetition_key());
        assert_eq!(history.repetition_count(&position.repetition_key()), 2);

        history.step_back();
        assert_eq!(history.repetition_count(&position.repetition_key()), 1);
    }
}
