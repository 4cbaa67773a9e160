use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration — maps to `notewise.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotewiseConfig {
    pub extract: ExtractConfig,
    pub services: ServicesConfig,
    pub logging: LoggingConfig,
}

impl Default for NotewiseConfig {
    fn default() -> Self {
        Self {
            extract: ExtractConfig::default(),
            services: ServicesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ── Extraction ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Path to the meeting notes file, relative to the working directory.
    pub notes_path: PathBuf,
    /// Model identifier, e.g. "gemini-pro".
    pub model: String,
    /// Maximum tokens per response.
    pub max_output_tokens: u32,
    /// Temperature (0.0 - 2.0).
    pub temperature: f32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            notes_path: PathBuf::from("meeting_notes.txt"),
            model: "gemini-pro".into(),
            max_output_tokens: 2048,
            temperature: 0.2,
        }
    }
}

// ── Services ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Google generative-language API key. When unset, `GEMINI_API_KEY`
    /// fills it in at load time. Presence is never checked locally; a
    /// missing key surfaces as the service's own rejection at first call.
    pub google_api_key: Option<String>,
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    pub level: String,
    /// Log format: pretty or json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, " ({h})")?;
        }
        Ok(())
    }
}

impl NotewiseConfig {
    /// Validate the config and return a list of warnings/errors.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Model ───
        if self.extract.model.is_empty() {
            warnings.push(ConfigWarning {
                field: "extract.model".into(),
                message: "model is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 'gemini-pro' or 'gemini-1.5-flash'".into()),
            });
        }

        // ── Temperature ───
        if self.extract.temperature < 0.0 || self.extract.temperature > 2.0 {
            warnings.push(ConfigWarning {
                field: "extract.temperature".into(),
                message: format!("temperature {} is out of range", self.extract.temperature),
                severity: WarningSeverity::Error,
                hint: Some("Temperature must be between 0.0 and 2.0".into()),
            });
        }

        // ── Notes path ───
        if self.extract.notes_path.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                field: "extract.notes_path".into(),
                message: "notes path is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 'meeting_notes.txt'".into()),
            });
        }

        // ── API key ───
        // Deliberately a warning, not an error: the service rejects the
        // first call itself when the key is missing.
        if self.services.google_api_key.is_none() {
            warnings.push(ConfigWarning {
                field: "services.google_api_key".into(),
                message: "no API key configured".into(),
                severity: WarningSeverity::Warning,
                hint: Some("Set services.google_api_key or the GEMINI_API_KEY env var".into()),
            });
        }

        // ── Logging format ───
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        // ── Logging level ───
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }

        // Check for hard errors
        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!(
                "Configuration errors:\n  - {}",
                errors.join("\n  - ")
            ));
        }

        Ok(warnings)
    }
}
