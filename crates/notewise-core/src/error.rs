use thiserror::Error;

/// Unified error type for the entire notewise workspace.
#[derive(Error, Debug)]
pub enum NotewiseError {
    // ── Provider errors ────────────────────────────────────────
    /// Any failure talking to the hosted generation service: transport,
    /// HTTP status, malformed body. All collapsed into one kind; the
    /// runner makes no transient/permanent distinction.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("model not found: {0}")]
    ModelNotFound(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NotewiseError>;
