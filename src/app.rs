//! Command handlers
//!
//! Everything the binary does after parsing arguments and loading settings.
//! Output goes to caller-supplied writers so the handlers can be tested.

use crate::cli::{Cli, Command};
use crate::core::{settings_path, AppResult, AppSettings};
use crate::session::Session;
use chess_rules::validation;
use chess_rules::{GameState, Position};
use std::io::Write;
use tracing::info;

/// Build the starting state from `--fen` and the castling/en-passant switches
pub fn initial_state(cli: &Cli, settings: &AppSettings) -> AppResult<GameState> {
    let mut state = match &cli.fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::standard(),
    };
    state.board.allow_castling = settings.allow_castling && !cli.no_castling;
    state.board.allow_en_passant = settings.allow_en_passant && !cli.no_en_passant;
    Ok(state)
}

/// Run the parsed command
///
/// `out` receives command output; `events_out` receives the event stream of
/// a `play` session.
pub fn run<W, E>(cli: &Cli, settings: &AppSettings, out: &mut W, events_out: E) -> AppResult<()>
where
    W: Write,
    E: Write + Send + 'static,
{
    if let Command::SaveSettings = cli.command {
        let path = cli.config.clone().unwrap_or_else(settings_path);
        settings.save(&path)?;
        writeln!(out, "{}", path.display())?;
        return Ok(());
    }

    let state = initial_state(cli, settings)?;
    match &cli.command {
        Command::Fen => writeln!(out, "{}", state.to_fen())?,
        Command::Show => write!(out, "{}", state.board)?,
        Command::Moves { square: Some(square) } => {
            let from = Position::from_notation(square)?;
            let mut targets = validation::legal_moves_from(&state, from);
            targets.sort();
            let targets: Vec<String> = targets.iter().map(|p| p.to_notation()).collect();
            writeln!(out, "{}: {}", from, targets.join(" "))?;
        }
        Command::Moves { square: None } => {
            let mut moves = validation::all_legal_moves(&state);
            moves.sort();
            for (from, to) in moves {
                writeln!(out, "{from}{to}")?;
            }
        }
        Command::Play { moves } => play(state, settings, moves, out, events_out)?,
        Command::SaveSettings => {}
    }
    Ok(())
}

fn play<W, E>(state: GameState, settings: &AppSettings, moves: &[String], out: &mut W, events_out: E) -> AppResult<()>
where
    W: Write,
    E: Write + Send + 'static,
{
    let session = Session::start(state, settings.clone(), events_out)?;
    let outcome = moves.iter().try_for_each(|text| session.play_uci(text));

    let final_state = session.engine().snapshot();
    let history = session.engine().move_history_notation();
    session.finish()?;
    outcome?;

    info!("[SESSION] Played {} moves", moves.len());
    if !history.is_empty() {
        writeln!(out, "{history}")?;
    }
    writeln!(out, "{}", final_state.to_fen())?;
    if final_state.is_over() {
        writeln!(out, "{}", final_state.result.message())?;
    }
    Ok(())
}
