//! `invtrack` command-line front end.
//!
//! Commands run against the inventory and session records kept in the data
//! directory; every command except `login`/`logout` needs an active session.

pub mod commands;
pub mod config;
pub mod render;

pub use commands::{App, Cli, Command, execute};
pub use config::CliConfig;
