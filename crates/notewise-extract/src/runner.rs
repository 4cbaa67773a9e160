use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use notewise_core::{NotewiseError, Result};
use notewise_llm::{GenerateRequest, StreamChunk, TextProvider};

use crate::prompt::build_prompt;

/// Per-run generation settings.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub model: String,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            model: "gemini-pro".into(),
            max_output_tokens: Some(2048),
            temperature: Some(0.2),
        }
    }
}

/// Runs one extraction: notes file in, streamed text out.
///
/// The provider is passed in explicitly; the runner holds no global state
/// and makes exactly one streaming request per `run`.
pub struct ExtractionRunner {
    provider: Arc<dyn TextProvider>,
    options: ExtractOptions,
}

impl ExtractionRunner {
    pub fn new(provider: Arc<dyn TextProvider>, options: ExtractOptions) -> Self {
        Self { provider, options }
    }

    /// Read the notes file, stream the extraction, and forward every text
    /// fragment to `out` in arrival order, flushing after each one.
    ///
    /// A file-read failure aborts before any request is opened, so a
    /// missing file never produces output. A service failure surfaces as
    /// `NotewiseError::Provider`; there is no retry and no partial-output
    /// recovery.
    pub async fn run(&self, notes_path: &Path, out: &mut (impl Write + ?Sized)) -> Result<()> {
        let notes = std::fs::read_to_string(notes_path)?;
        debug!(path = ?notes_path, bytes = notes.len(), "read meeting notes");

        let request = GenerateRequest {
            model: self.options.model.clone(),
            prompt: build_prompt(&notes),
            max_output_tokens: self.options.max_output_tokens,
            temperature: self.options.temperature,
        };

        info!(model = %request.model, provider = %self.provider.name(), "starting extraction");
        let mut rx = self.provider.stream(&request).await?;

        while let Some(chunk) = rx.recv().await {
            match chunk {
                StreamChunk::Text(text) => {
                    out.write_all(text.as_bytes())?;
                    out.flush()?;
                }
                StreamChunk::Usage(usage) => {
                    debug!(
                        prompt_tokens = usage.prompt_tokens,
                        output_tokens = usage.output_tokens,
                        "usage reported"
                    );
                }
                StreamChunk::Done(reason) => {
                    info!(?reason, "extraction stream complete");
                    return Ok(());
                }
                StreamChunk::Error(e) => {
                    return Err(NotewiseError::Provider(e));
                }
            }
        }

        // Sender dropped without a Done marker; everything received was
        // already forwarded.
        Ok(())
    }
}
