//! Public API for running a game
//!
//! [`GameEngine`] is the entry point for applications: it coordinates turns,
//! owns the game state, and reports what happened through [`GameEvent`]s.
//! The lower-level modules ([`crate::validation`], [`crate::move_gen`]) stay
//! available for tooling that wants to query positions directly.

mod events;
mod game;
mod turn;

#[cfg(test)]
mod tests;

pub use events::GameEvent;
pub use game::GameEngine;
pub use turn::{TurnManager, TurnPhase, TurnRecord};
