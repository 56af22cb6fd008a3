//! One game session: the single owner of position, history and status.
//!
//! Every move, whether typed interactively or replayed from PGN, goes
//! through `apply_move`: decode against the cached legal move list, commit
//! to history, play on the position, re-evaluate the status. Terminal
//! statuses reject further moves but still allow undo.

use tracing::{debug, info, warn};

use crate::chess_errors::{HistoryUnderflow, MoveError, PgnError};
use crate::game::game_status::GameStatus;
use crate::game::session_config::SessionConfig;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::move_history::{HistoryEntry, MoveHistory};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_descriptions::MoveRecord;
use crate::utils::pgn::{read_pgn, write_pgn, PgnResult};
use crate::utils::san::{decode_san, encode_san};

/// Outcome of a successfully applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub record: MoveRecord,
    pub status: GameStatus,
}

#[derive(Debug, Clone)]
pub struct GameController {
    position: Position,
    history: MoveHistory,
    status: GameStatus,
    legal_moves: Vec<GeneratedMove>,
    config: SessionConfig,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let mut controller = Self::from_position(Position::new_game());
        controller.config = config;
        controller
    }

    /// Starts from an arbitrary position. PGN export assumes the standard
    /// start, so this stays internal.
    pub(crate) fn from_position(position: Position) -> Self {
        let mut controller = Self {
            position,
            history: MoveHistory::new(&position),
            status: GameStatus::InProgress,
            legal_moves: Vec::new(),
            config: SessionConfig::default(),
        };
        controller.refresh();
        controller
    }

    /// Decodes `text` as SAN against the current legal moves and commits it.
    /// On any error the game is left untouched.
    pub fn apply_move(&mut self, text: &str) -> Result<AppliedMove, MoveError> {
        if self.status.is_terminal() {
            debug!(token = text, status = %self.status, "move rejected, game is over");
            return Err(MoveError::GameAlreadyOver(self.status));
        }

        let generated = decode_san(text, &self.position, &self.legal_moves).map_err(|err| {
            debug!(token = text, error = %err, "move rejected");
            err
        })?;

        let record = MoveRecord {
            chess_move: generated.chess_move,
            annotations: generated.annotations,
            san: encode_san(&generated, &self.legal_moves),
        };
        let undo = self.position.make_move(&generated.chess_move);
        self.history.commit(HistoryEntry {
            undo,
            record: record.clone(),
            key_after: self.position.repetition_key(),
        });
        self.refresh();

        debug!(
            ply = self.history.committed_len(),
            san = %record.san,
            status = %self.status,
            "move applied"
        );
        if self.status.is_terminal() {
            info!(status = %self.status, result = %self.result(), "game over");
        }

        Ok(AppliedMove {
            record,
            status: self.status,
        })
    }

    /// Takes back up to `count` moves, most recent first. Returns the number
    /// undone, or `HistoryUnderflow` (after undoing everything available)
    /// when fewer than `count` moves were committed.
    pub fn undo(&mut self, count: usize) -> Result<usize, HistoryUnderflow> {
        let mut performed = 0;
        while performed < count {
            let Some(undo) = self.history.step_back().map(|entry| entry.undo) else {
                break;
            };
            self.position.unmake_move(&undo);
            performed += 1;
        }
        self.finish_navigation("undo", count, performed)
    }

    /// Replays up to `count` undone moves in their original order.
    pub fn redo(&mut self, count: usize) -> Result<usize, HistoryUnderflow> {
        let mut performed = 0;
        while performed < count {
            let Some(mv) = self.history.step_forward().map(|entry| entry.undo.mv) else {
                break;
            };
            self.position.make_move(&mv);
            performed += 1;
        }
        self.finish_navigation("redo", count, performed)
    }

    /// Back to the starting position with an empty history. The session
    /// config is kept.
    pub fn reset(&mut self) {
        self.position = Position::new_game();
        self.history = MoveHistory::new(&self.position);
        self.refresh();
        info!("game reset");
    }

    #[inline]
    pub fn board_snapshot(&self) -> Board {
        self.position.board
    }

    /// The game so far as PGN, terminated by the result implied by the
    /// current status.
    pub fn pgn_string(&self) -> String {
        let result = self.result();
        let sans: Vec<String> = self.history.records().map(|record| record.san.clone()).collect();
        write_pgn(&self.config.tags(result), &sans, result, self.config.line_width)
    }

    /// Replaces this game with the one in `text`, replaying every move
    /// through `apply_move`. On error the current game is kept as it was.
    pub fn load_from_pgn(&mut self, text: &str) -> Result<(), PgnError> {
        let game = read_pgn(text).map_err(|err| {
            warn!(error = %err, "PGN load abandoned");
            err
        })?;

        let config = SessionConfig::from_tags(&game.tags, self.config.line_width);
        let mut replay = GameController::with_config(config);
        for (index, token) in game.san_tokens.iter().enumerate() {
            if let Err(source) = replay.apply_move(token) {
                let err = PgnError::Move {
                    ply: index + 1,
                    token: token.clone(),
                    source,
                };
                warn!(error = %err, "PGN load abandoned");
                return Err(err);
            }
        }

        if replay.result() != game.result {
            debug!(
                declared = %game.result,
                computed = %replay.result(),
                "declared PGN result differs from the replayed position"
            );
        }
        info!(
            plies = replay.history.committed_len(),
            status = %replay.status,
            "PGN loaded"
        );
        *self = replay;
        Ok(())
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.active_color()
    }

    /// Legal moves of the side to move, in generation order.
    #[inline]
    pub fn legal_moves(&self) -> &[GeneratedMove] {
        &self.legal_moves
    }

    pub fn legal_sans(&self) -> Vec<String> {
        self.legal_moves
            .iter()
            .map(|generated| encode_san(generated, &self.legal_moves))
            .collect()
    }

    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
    }

    fn result(&self) -> PgnResult {
        self.status.pgn_result(self.position.active_color())
    }

    fn refresh(&mut self) {
        self.legal_moves = LegalMoveGenerator.generate_legal_moves(&self.position);
        let repetitions = self.history.repetition_count(&self.position.repetition_key());
        self.status = GameStatus::evaluate(&self.position, repetitions);
    }

    fn finish_navigation(
        &mut self,
        action: &'static str,
        requested: usize,
        performed: usize,
    ) -> Result<usize, HistoryUnderflow> {
        if performed > 0 {
            self.refresh();
        }
        debug!(action, requested, performed, status = %self.status, "history navigation");
        if performed == requested {
            Ok(performed)
        } else {
            Err(HistoryUnderflow {
                requested,
                performed,
            })
        }
    }
}
