//! Mock text-generation provider for deterministic testing.
//!
//! Returns pre-configured replies without making any HTTP calls.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::provider::*;
use notewise_core::Result;

/// A mock provider that returns pre-configured replies.
///
/// # Example
/// ```
/// use notewise_llm::mock::MockProvider;
/// let provider = MockProvider::new("test")
///     .with_reply("{\"date\": \"2024-01-01\"}");
/// ```
pub struct MockProvider {
    replies: Arc<Mutex<Vec<MockReply>>>,
    /// Track all requests received (for assertions in tests).
    pub requests: Arc<Mutex<Vec<GenerateRequest>>>,
    name: String,
}

/// A pre-configured reply from the mock provider.
#[derive(Clone)]
pub struct MockReply {
    /// Exact fragments to deliver, in order. `generate` returns their
    /// concatenation.
    pub chunks: Vec<String>,
    pub usage: TokenUsage,
    pub finish: FinishReason,
    /// If set, the provider will return this error instead.
    pub error: Option<String>,
}

impl Default for MockReply {
    fn default() -> Self {
        Self {
            chunks: vec![],
            usage: TokenUsage {
                prompt_tokens: 100,
                output_tokens: 50,
            },
            finish: FinishReason::Stop,
            error: None,
        }
    }
}

impl MockReply {
    /// Create a single-chunk text reply.
    pub fn text(text: &str) -> Self {
        Self {
            chunks: vec![text.to_string()],
            ..Default::default()
        }
    }

    /// Create an error reply.
    pub fn error(msg: &str) -> Self {
        Self {
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(vec![])),
            requests: Arc::new(Mutex::new(vec![])),
            name: name.into(),
        }
    }

    /// Queue a single-chunk text reply.
    pub fn with_reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push(MockReply::text(text));
        self
    }

    /// Queue a reply delivered as the given fragments, in order.
    pub fn with_chunks<I, S>(self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies.lock().unwrap().push(MockReply {
            chunks: chunks.into_iter().map(Into::into).collect(),
            ..Default::default()
        });
        self
    }

    /// Queue an error reply.
    pub fn with_error(self, error: &str) -> Self {
        self.replies.lock().unwrap().push(MockReply::error(error));
        self
    }

    /// Queue a fully custom reply.
    pub fn with_mock_reply(self, reply: MockReply) -> Self {
        self.replies.lock().unwrap().push(reply);
        self
    }

    /// Get all requests that were made to this provider.
    pub fn recorded_requests(&self) -> Arc<Mutex<Vec<GenerateRequest>>> {
        Arc::clone(&self.requests)
    }

    /// Pop the next queued reply, or return a default "no reply queued" text.
    fn next_reply(&self) -> MockReply {
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            MockReply::text("(mock: no more queued replies)")
        } else {
            replies.remove(0)
        }
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn models(&self) -> Vec<String> {
        vec!["mock/test-model".to_string()]
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.next_reply();

        if let Some(error) = reply.error {
            return Err(notewise_core::NotewiseError::Provider(error));
        }

        Ok(GenerateResponse {
            text: reply.chunks.concat(),
            usage: reply.usage,
            finish_reason: reply.finish,
        })
    }

    async fn stream(&self, request: &GenerateRequest) -> Result<mpsc::Receiver<StreamChunk>> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.next_reply();

        let (tx, rx) = mpsc::channel(64);

        if let Some(error) = reply.error {
            tokio::spawn(async move {
                let _ = tx.send(StreamChunk::Error(error)).await;
            });
            return Ok(rx);
        }

        tokio::spawn(async move {
            for chunk in reply.chunks {
                let _ = tx.send(StreamChunk::Text(chunk)).await;
            }
            let _ = tx.send(StreamChunk::Usage(reply.usage)).await;
            let _ = tx.send(StreamChunk::Done(reply.finish)).await;
        });

        Ok(rx)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateRequest {
        GenerateRequest {
            model: "test".into(),
            prompt: "extract things".into(),
            max_output_tokens: Some(100),
            temperature: Some(0.2),
        }
    }

    #[tokio::test]
    async fn test_mock_text_reply() {
        let provider = MockProvider::new("mock").with_reply("{\"ok\": true}");
        let resp = provider.generate(&request()).await.unwrap();
        assert_eq!(resp.text, "{\"ok\": true}");
        assert_eq!(resp.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn test_mock_error() {
        let provider = MockProvider::new("mock").with_error("HTTP 429: rate limited");
        let result = provider.generate(&request()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let provider = MockProvider::new("mock").with_reply("ok");
        let _ = provider.generate(&request()).await;
        let recorded = provider.recorded_requests();
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].prompt, "extract things");
    }

    #[tokio::test]
    async fn test_mock_streaming_preserves_chunk_order() {
        let provider = MockProvider::new("mock").with_chunks(["{\"da", "te\": ", "null}"]);
        let mut rx = provider.stream(&request()).await.unwrap();

        let mut text = String::new();
        let mut saw_done = false;
        while let Some(chunk) = rx.recv().await {
            match chunk {
                StreamChunk::Text(t) => text.push_str(&t),
                StreamChunk::Done(_) => saw_done = true,
                _ => {}
            }
        }
        assert_eq!(text, "{\"date\": null}");
        assert!(saw_done);
    }

    #[tokio::test]
    async fn test_mock_multiple_replies_in_order() {
        let provider = MockProvider::new("mock")
            .with_reply("first")
            .with_reply("second")
            .with_reply("third");

        let r1 = provider.generate(&request()).await.unwrap();
        let r2 = provider.generate(&request()).await.unwrap();
        let r3 = provider.generate(&request()).await.unwrap();
        assert_eq!(r1.text, "first");
        assert_eq!(r2.text, "second");
        assert_eq!(r3.text, "third");
    }
}
