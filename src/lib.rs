pub mod app;
pub mod cli;
pub mod core;
pub mod session;

pub use chess_rules;
