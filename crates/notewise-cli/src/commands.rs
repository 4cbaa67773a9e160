use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use notewise_config::{ConfigLoader, NotewiseConfig};
use notewise_extract::{ExtractOptions, ExtractionRunner};
use notewise_llm::GoogleProvider;

/// notewise — stream structured meeting info out of plain-text notes
#[derive(Parser)]
#[command(name = "notewise", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to notewise.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the notes file and stream the extraction to stdout
    Extract {
        /// Notes file to read (default: extract.notes_path from config)
        #[arg(short, long)]
        notes: Option<PathBuf>,

        /// Model to use (default: extract.model from config)
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Initialize a new notewise.toml in the current or home directory
    Init {
        /// Create in current directory instead of ~/.notewise/
        #[arg(long)]
        local: bool,
    },
    /// Show version and build info
    Version,
}

impl Cli {
    pub async fn run(self) -> notewise_core::Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            self.log_level
                .clone()
                .unwrap_or_else(|| config.logging.level.clone())
        };

        // Initialize tracing with appropriate format. Logs go to stderr:
        // stdout belongs to the extraction stream.
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
                )
                .with_writer(std::io::stderr)
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
                )
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }

        match self.command {
            Commands::Extract { notes, model } => Self::cmd_extract(config, notes, model).await,
            Commands::Config { json } => Self::cmd_config(config, json),
            Commands::Init { local } => Self::cmd_init(local),
            Commands::Version => Self::cmd_version(),
        }
    }

    async fn cmd_extract(
        config: NotewiseConfig,
        notes: Option<PathBuf>,
        model: Option<String>,
    ) -> notewise_core::Result<()> {
        let notes_path = notes.unwrap_or(config.extract.notes_path);
        let options = ExtractOptions {
            model: model.unwrap_or(config.extract.model),
            max_output_tokens: Some(config.extract.max_output_tokens),
            temperature: Some(config.extract.temperature),
        };

        // The key is handed to the provider as-is. A missing key is the
        // service's problem to report, not checked here.
        let api_key = config.services.google_api_key.unwrap_or_default();
        let provider = Arc::new(GoogleProvider::new(api_key));
        let runner = ExtractionRunner::new(provider, options);

        info!(notes = ?notes_path, "running extraction");

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        runner.run(&notes_path, &mut out).await
    }

    fn cmd_config(config: NotewiseConfig, json: bool) -> notewise_core::Result<()> {
        // Never print the credential itself
        let mut config = config;
        if config.services.google_api_key.is_some() {
            config.services.google_api_key = Some("<redacted>".into());
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config)
                    .map_err(|e| notewise_core::NotewiseError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_init(local: bool) -> notewise_core::Result<()> {
        let dir = if local {
            std::env::current_dir()?
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".notewise")
        };

        std::fs::create_dir_all(&dir)?;
        let config_path = dir.join("notewise.toml");

        if config_path.exists() {
            println!("{} already exists", config_path.display());
            return Ok(());
        }

        let minimal = r#"# notewise configuration

[extract]
notes_path = "meeting_notes.txt"
model = "gemini-pro"
# max_output_tokens = 2048
# temperature = 0.2

[services]
# google_api_key = "..."   # or env: GEMINI_API_KEY

[logging]
level = "info"
# format = "pretty"        # or "json"
"#;

        std::fs::write(&config_path, minimal)?;
        println!("Wrote {}", config_path.display());
        Ok(())
    }

    fn cmd_version() -> notewise_core::Result<()> {
        println!("notewise v{}", env!("CARGO_PKG_VERSION"));
        println!("   Target: {}", std::env::consts::ARCH);
        println!("   OS: {}", std::env::consts::OS);
        #[cfg(debug_assertions)]
        println!("   Profile: debug");
        #[cfg(not(debug_assertions))]
        println!("   Profile: release");
        Ok(())
    }
}
