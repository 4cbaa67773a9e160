//! # notewise-extract
//!
//! The extraction runner: reads a meeting-notes file, builds one fixed
//! extraction prompt, opens a single streaming request, and forwards each
//! response fragment verbatim to a writer as it arrives.

pub mod prompt;
pub mod runner;

pub use prompt::build_prompt;
pub use runner::{ExtractOptions, ExtractionRunner};
