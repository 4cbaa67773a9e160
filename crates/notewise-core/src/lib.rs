//! # notewise-core
//!
//! Shared vocabulary for the notewise workspace: the unified error type and
//! the `Result` alias every other crate builds on.

pub mod error;

pub use error::{NotewiseError, Result};
