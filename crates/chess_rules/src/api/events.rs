//! Notifications for observers
//!
//! Every subscriber gets its own unbounded channel. Events are only sent after
//! the snapshot they describe has been published, so an observer that reacts
//! to an event by reading [`GameEngine::snapshot`](super::GameEngine::snapshot)
//! never sees an older state.

use crate::moves::Move;
use crate::types::{GameMode, GameResult, PieceColor, Position};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Something observers may want to react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game was set up
    NewGame {
        version: u64,
        mode: GameMode,
        to_move: PieceColor,
    },
    /// A move was accepted and committed
    MoveMade { version: u64, record: Move },
    /// The side to move is in check (but not mated)
    CheckDetected { color: PieceColor },
    /// The game reached a terminal result
    GameEnded { result: GameResult },
    /// A new snapshot is available
    StateChanged { version: u64 },
    /// The move broke the rules
    IllegalMove {
        from: Position,
        to: Position,
        reason: String,
    },
    /// Wrong side, empty square, game over, or another move in flight
    TurnViolation { reason: String },
    /// Internal inconsistency; the game state was left unchanged
    Error { message: String },
}

/// Fan-out of [`GameEvent`]s to any number of subscribers
#[derive(Debug, Default)]
pub(crate) struct EventBus {
    subscribers: Mutex<Vec<Sender<GameEvent>>>,
}

impl EventBus {
    pub fn subscribe(&self) -> Receiver<GameEvent> {
        let (sender, receiver) = unbounded();
        self.subscribers.lock().push(sender);
        receiver
    }

    /// Send to every live subscriber, dropping the ones that hung up
    pub fn publish(&self, event: GameEvent) {
        self.subscribers
            .lock()
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
