use async_trait::async_trait;
use notewise_core::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::provider::*;

const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider (generativelanguage API).
///
/// Constructed explicitly with its credential — there is no module-level
/// client; callers own the instance and its lifetime.
pub struct GoogleProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

// ── Wire format ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
}

impl GoogleProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: GOOGLE_API_BASE.into(),
        }
    }

    /// Use a custom base URL (for proxies and test servers).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Normalize "gemini-pro" to the "models/gemini-pro" resource path.
    fn model_path(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn request_body(request: &GenerateRequest) -> GenerateContentRequest {
        let generation_config =
            if request.temperature.is_some() || request.max_output_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: request.temperature,
                    max_output_tokens: request.max_output_tokens,
                })
            } else {
                None
            };

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config,
        }
    }
}

fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("STOP") => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::MaxTokens,
        Some("SAFETY") | Some("RECITATION") => FinishReason::Safety,
        _ => FinishReason::Other,
    }
}

/// Concatenated text of every part in the first candidate.
fn candidate_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[async_trait]
impl TextProvider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    fn models(&self) -> Vec<String> {
        vec![
            "gemini-pro".into(),
            "gemini-1.5-pro".into(),
            "gemini-1.5-flash".into(),
            "gemini-2.0-flash".into(),
        ]
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let body = Self::request_body(request);
        let model_path = Self::model_path(&request.model);

        info!(model = %model_path, "calling generateContent");

        let resp = self
            .client
            .post(format!("{}/{}:generateContent", self.base_url, model_path))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| notewise_core::NotewiseError::Provider(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(notewise_core::NotewiseError::Provider(format!(
                "HTTP {status}: {text}"
            )));
        }

        let data: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| notewise_core::NotewiseError::Provider(e.to_string()))?;

        if data.candidates.is_empty() {
            return Err(notewise_core::NotewiseError::Provider(
                "no candidates returned".into(),
            ));
        }

        let text = candidate_text(&data);
        let finish_reason = map_finish_reason(
            data.candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref()),
        );
        let usage = data
            .usage_metadata
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(GenerateResponse {
            text,
            usage,
            finish_reason,
        })
    }

    async fn stream(
        &self,
        request: &GenerateRequest,
    ) -> Result<tokio::sync::mpsc::Receiver<StreamChunk>> {
        let (tx, rx) = tokio::sync::mpsc::channel(256);

        let body = Self::request_body(request);
        let model_path = Self::model_path(&request.model);
        let url = format!(
            "{}/{}:streamGenerateContent",
            self.base_url, model_path
        );

        info!(model = %model_path, "opening streamGenerateContent");

        let client = self.client.clone();
        let api_key = self.api_key.clone();

        tokio::spawn(async move {
            let resp = client
                .post(url)
                .query(&[("alt", "sse"), ("key", api_key.as_str())])
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(resp) if resp.status().is_success() => {
                    use futures::StreamExt;
                    let mut stream = resp.bytes_stream();
                    let mut buffer = String::new();
                    let mut usage = TokenUsage::default();
                    let mut finish = FinishReason::Other;

                    while let Some(chunk_result) = stream.next().await {
                        match chunk_result {
                            Ok(bytes) => {
                                buffer.push_str(&String::from_utf8_lossy(&bytes));
                                // Process complete SSE lines
                                while let Some(newline_pos) = buffer.find('\n') {
                                    let line = buffer[..newline_pos].trim().to_string();
                                    buffer = buffer[newline_pos + 1..].to_string();

                                    if line.is_empty() || line.starts_with(':') {
                                        continue;
                                    }
                                    let Some(data) = line.strip_prefix("data: ") else {
                                        continue;
                                    };
                                    match serde_json::from_str::<GenerateContentResponse>(data) {
                                        Ok(event) => {
                                            let text = candidate_text(&event);
                                            if !text.is_empty() {
                                                let _ =
                                                    tx.send(StreamChunk::Text(text)).await;
                                            }
                                            if let Some(fr) = event
                                                .candidates
                                                .first()
                                                .and_then(|c| c.finish_reason.as_deref())
                                            {
                                                finish = map_finish_reason(Some(fr));
                                            }
                                            if let Some(u) = event.usage_metadata {
                                                usage = TokenUsage {
                                                    prompt_tokens: u.prompt_token_count,
                                                    output_tokens: u.candidates_token_count,
                                                };
                                            }
                                        }
                                        Err(e) => {
                                            debug!(error = %e, "skipping unparseable SSE frame");
                                        }
                                    }
                                }
                            }
                            Err(e) => {
                                let _ = tx.send(StreamChunk::Error(e.to_string())).await;
                                return;
                            }
                        }
                    }
                    // Gemini SSE has no terminator frame; the stream just ends.
                    let _ = tx.send(StreamChunk::Usage(usage)).await;
                    let _ = tx.send(StreamChunk::Done(finish)).await;
                }
                Ok(resp) => {
                    let status = resp.status();
                    let text = resp.text().await.unwrap_or_default();
                    let _ = tx
                        .send(StreamChunk::Error(format!("HTTP {status}: {text}")))
                        .await;
                }
                Err(e) => {
                    let _ = tx.send(StreamChunk::Error(e.to_string())).await;
                }
            }
        });

        Ok(rx)
    }

    async fn health_check(&self) -> Result<()> {
        info!(provider = "google", "checking API health");
        if self.api_key.is_empty() {
            return Err(notewise_core::NotewiseError::Provider(
                "google API key not set".into(),
            ));
        }
        Ok(())
    }
}
