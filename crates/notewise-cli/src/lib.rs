//! # notewise-cli
//!
//! Command-line interface for notewise.
//!
//! ## Commands
//!
//! - `notewise extract` — Stream structured meeting info to stdout
//! - `notewise config` — Show effective configuration
//! - `notewise init` — Write a default notewise.toml
//! - `notewise version` — Show version and build info

pub mod commands;

pub use commands::Cli;
