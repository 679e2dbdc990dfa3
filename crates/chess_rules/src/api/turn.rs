//! Turn bookkeeping for the coordinator
//!
//! Tracks whether a move is in flight and keeps an audit trail of completed
//! moves, kept separately from `GameState::move_history`.

use crate::moves::Move;
use crate::types::PieceColor;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use tracing::error;

/// Coordinator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No move in flight
    #[default]
    Idle,
    /// One move is between validation and commit
    MoveInProgress,
}

/// One completed move in the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based ply number
    pub ply: u32,
    pub color: PieceColor,
    pub record: Move,
    pub at: SystemTime,
}

/// Phase tracking plus audit trail
#[derive(Debug, Clone, Default)]
pub struct TurnManager {
    phase: TurnPhase,
    first_player: PieceColor,
    records: Vec<TurnRecord>,
}

impl TurnManager {
    /// Fresh manager for a game where `first_player` moves first
    pub fn new(first_player: PieceColor) -> Self {
        TurnManager {
            phase: TurnPhase::Idle,
            first_player,
            records: Vec::new(),
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    /// `Idle -> MoveInProgress`
    ///
    /// Returns `false` (and leaves the phase alone) if a move is already in
    /// flight.
    pub fn begin_move(&mut self) -> bool {
        match self.phase {
            TurnPhase::Idle => {
                self.phase = TurnPhase::MoveInProgress;
                true
            }
            TurnPhase::MoveInProgress => {
                error!("[TURN] begin_move while a move is already in progress");
                false
            }
        }
    }

    /// `MoveInProgress -> Idle`
    pub fn finish_move(&mut self) {
        if self.phase != TurnPhase::MoveInProgress {
            error!("[TURN] finish_move with no move in progress");
        }
        self.phase = TurnPhase::Idle;
    }

    /// Append a completed move to the trail
    pub fn record(&mut self, record: Move) {
        let ply = self.records.len() as u32 + 1;
        self.records.push(TurnRecord {
            ply,
            color: record.piece.color,
            record,
            at: SystemTime::now(),
        });
    }

    /// Check that sides alternate starting with the first player and that
    /// timestamps never go backwards
    pub fn audit(&self) -> Result<(), String> {
        let mut expected = self.first_player;
        let mut previous: Option<SystemTime> = None;

        for entry in &self.records {
            if entry.color != expected {
                return Err(format!(
                    "ply {} was played by {:?}, expected {:?}",
                    entry.ply, entry.color, expected
                ));
            }
            if previous.is_some_and(|earlier| entry.at < earlier) {
                return Err(format!("ply {} is timestamped before ply {}", entry.ply, entry.ply - 1));
            }
            previous = Some(entry.at);
            expected = expected.opponent();
        }
        Ok(())
    }
}
