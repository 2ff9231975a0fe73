//! Line-oriented shell over the tracker: rustyline when interactive, stdin
//! lines when `EXPENSE_TRACKER_CLI_SCRIPT` is set.

pub mod commands;
pub mod core;
pub mod forms;
mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod ui;

pub use shell::run_cli;
