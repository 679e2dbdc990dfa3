use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fairychess", version, about = "Fairy chess rules engine")]
pub struct Cli {
    /// Start from this FEN instead of the standard position
    #[arg(long, global = true)]
    pub fen: Option<String>,

    /// Disable castling for this game
    #[arg(long, global = true)]
    pub no_castling: bool,

    /// Disable en passant for this game
    #[arg(long, global = true)]
    pub no_en_passant: bool,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print events as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the position as FEN
    Fen,
    /// Print the board
    Show,
    /// List legal moves, for one square or the whole side to move
    Moves { square: Option<String> },
    /// Play moves given in UCI notation, e.g. `e2e4 e7e5`
    Play { moves: Vec<String> },
    /// Write the active settings to the settings file
    SaveSettings,
}
