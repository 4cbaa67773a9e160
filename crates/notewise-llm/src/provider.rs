use async_trait::async_trait;
use notewise_core::Result;
use serde::{Deserialize, Serialize};

/// A single-turn request to a text-generation provider.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The model to use, e.g. "gemini-pro" (provider-specific part).
    pub model: String,
    /// The full prompt, sent as one user turn. Built once, never mutated.
    pub prompt: String,
    /// Maximum tokens to generate. `None` leaves the choice to the service.
    pub max_output_tokens: Option<u32>,
    /// Temperature.
    pub temperature: Option<f32>,
}

/// A complete (non-streaming) response.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub text: String,
    pub usage: TokenUsage,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Other,
}

/// A fragment of a streaming response.
///
/// Fragments are delivered strictly in arrival order; consumers must not
/// reorder or buffer them.
#[derive(Debug, Clone)]
pub enum StreamChunk {
    /// Response text delta, forwarded verbatim.
    Text(String),
    /// Usage stats (sent once, at end of stream).
    Usage(TokenUsage),
    /// Stream is done.
    Done(FinishReason),
    /// An error occurred mid-stream.
    Error(String),
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.output_tokens
    }
}

/// Trait implemented by each generation provider (Google, mock, etc.)
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Human-readable name, e.g. "google".
    fn name(&self) -> &str;

    /// List known models.
    fn models(&self) -> Vec<String>;

    /// Send a non-streaming request.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;

    /// Send a streaming request. Returns a receiver for chunks.
    ///
    /// The returned sequence is finite and non-restartable: pull until
    /// `Done` or `Error`, then the channel closes.
    async fn stream(
        &self,
        request: &GenerateRequest,
    ) -> Result<tokio::sync::mpsc::Receiver<StreamChunk>>;

    /// Check if this provider is usable at all.
    async fn health_check(&self) -> Result<()>;
}
