use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::schema::NotewiseConfig;

/// Loads the notewise configuration.
pub struct ConfigLoader {
    config: Arc<RwLock<NotewiseConfig>>,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > NOTEWISE_CONFIG env > ~/.notewise/notewise.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("NOTEWISE_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".notewise")
            .join("notewise.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> notewise_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<NotewiseConfig>(&raw).map_err(|e| {
                notewise_core::NotewiseError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            NotewiseConfig::default()
        };

        // Apply environment variable overrides
        let config = Self::apply_env_overrides(config);

        // Validate config — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(notewise_core::NotewiseError::Config(e));
            }
        }

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    /// Get a read snapshot of the current config.
    pub fn get(&self) -> NotewiseConfig {
        self.config.read().clone()
    }

    /// Path the config was loaded from (or would be written to).
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (NOTEWISE_MODEL, NOTEWISE_NOTES, etc.)
    fn apply_env_overrides(mut config: NotewiseConfig) -> NotewiseConfig {
        if let Ok(v) = std::env::var("NOTEWISE_MODEL") {
            config.extract.model = v;
        }
        if let Ok(v) = std::env::var("NOTEWISE_NOTES") {
            config.extract.notes_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("NOTEWISE_LOG_LEVEL") {
            config.logging.level = v;
        }
        // API key: env var fills in when the config file doesn't have the
        // key set. Config file takes priority, env is the fallback.
        if config.services.google_api_key.is_none() {
            if let Ok(v) = std::env::var("GEMINI_API_KEY") {
                config.services.google_api_key = Some(v);
            }
        }
        config
    }
}
