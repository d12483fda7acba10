//! # baler-cli
//!
//! Command-line interface for the baler asset bundler: argument parsing,
//! logging setup, and the `build` / `graph` / `check` / `expand`
//! subcommands.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
