//! # notewise-config
//!
//! Configuration system for notewise. Reads from `notewise.toml` and
//! environment variables — in that precedence order.

pub mod schema;
pub mod loader;

pub use schema::NotewiseConfig;
pub use schema::{ConfigWarning, WarningSeverity};
pub use loader::ConfigLoader;
