//! One game driven from the command line
//!
//! A [`Session`] owns a [`GameEngine`] and an observer thread that prints
//! every [`GameEvent`] as it arrives, either as text or as JSON lines. The
//! observer only ever sees events, never the live state, so it runs without
//! touching the coordinator lock.

use crate::core::{AppError, AppResult, AppSettings};
use chess_rules::validation;
use chess_rules::{GameEngine, GameEvent, GameState, MoveRejection, UciMove};
use crossbeam_channel::Receiver;
use std::io::Write;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Render one event for output
///
/// Returns `None` for events that carry nothing worth printing in text mode.
pub fn format_event(event: &GameEvent, json: bool) -> AppResult<Option<String>> {
    if json {
        return Ok(Some(serde_json::to_string(event)?));
    }
    let line = match event {
        GameEvent::NewGame { mode, to_move, .. } => {
            format!("new {mode:?} game, {to_move:?} to move")
        }
        GameEvent::MoveMade { version, record } => {
            format!("[{version}] {:?} played {record}", record.piece.color)
        }
        GameEvent::CheckDetected { color } => format!("{color:?} is in check"),
        GameEvent::GameEnded { result } => result.message().to_string(),
        GameEvent::StateChanged { .. } => return Ok(None),
        GameEvent::IllegalMove { from, to, reason } => {
            format!("illegal move {from}{to}: {reason}")
        }
        GameEvent::TurnViolation { reason } => format!("turn violation: {reason}"),
        GameEvent::Error { message } => format!("error: {message}"),
    };
    Ok(Some(line))
}

/// Print events until every sender is gone; returns how many were received
pub fn spawn_observer<W>(events: Receiver<GameEvent>, json: bool, mut out: W) -> JoinHandle<AppResult<usize>>
where
    W: Write + Send + 'static,
{
    thread::spawn(move || {
        let mut received = 0;
        for event in events.iter() {
            received += 1;
            if let Some(line) = format_event(&event, json)? {
                writeln!(out, "{line}")?;
            }
        }
        out.flush()?;
        debug!("[SESSION] Observer finished after {} events", received);
        Ok(received)
    })
}

/// A game plus its event observer
pub struct Session {
    engine: GameEngine,
    observer: JoinHandle<AppResult<usize>>,
    settings: AppSettings,
}

impl Session {
    /// Start a session on `state`, printing events to `out`
    ///
    /// The board is validated before the observer thread is started.
    pub fn start<W>(state: GameState, settings: AppSettings, out: W) -> AppResult<Self>
    where
        W: Write + Send + 'static,
    {
        state.board.validate()?;
        let engine = GameEngine::new();
        let observer = spawn_observer(engine.subscribe(), settings.json_events, out);
        let session = Session {
            engine,
            observer,
            settings,
        };
        session.engine.load_state(state)?;
        Ok(session)
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Play one move given as UCI text, e.g. `e2e4` or `a7a8n`
    ///
    /// Without a promotion letter the configured default promotion is used.
    pub fn play_uci(&self, text: &str) -> AppResult<()> {
        let uci = UciMove::parse(text)?;
        let promotion = uci.promotion.unwrap_or(self.settings.default_promotion);

        if self
            .engine
            .try_make_move_with_promotion(uci.from, uci.to, Some(promotion))
        {
            return Ok(());
        }

        let state = self.engine.snapshot();
        let reason = if state.is_over() {
            MoveRejection::GameOver.to_string()
        } else {
            validation::check_move(&state, uci.from, uci.to)
                .and_then(|()| validation::resolve_promotion(&state, uci.from, uci.to, Some(promotion)))
                .err()
                .map_or_else(|| "the move was not accepted".to_string(), |r| r.to_string())
        };
        Err(AppError::MoveRejected {
            uci: text.to_string(),
            reason,
        })
    }

    /// Drop the engine and wait for the observer to drain
    pub fn finish(self) -> AppResult<usize> {
        let Session { engine, observer, .. } = self;
        drop(engine);
        let received = observer.join().map_err(|_| AppError::Observer {
            message: "observer thread panicked".to_string(),
        })??;
        info!("[SESSION] Session closed, {} events observed", received);
        Ok(received)
    }
}
