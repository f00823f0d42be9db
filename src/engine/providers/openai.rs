// XO AI Engine — OpenAI-Compatible Provider
// Handles Groq, OpenAI, OpenRouter, Ollama and any OpenAI-compatible REST API.
// One attempt per call: no retry, no backoff. Timeouts are the HTTP
// client's defaults.

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, error, info};
use reqwest::Client;
use serde_json::Value;

use crate::atoms::constants::DIAGNOSTIC_MAX_BYTES;
use crate::atoms::traits::{AiProvider, ProviderError};
use crate::engine::types::*;

// ── SSE events ─────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum SseEvent {
    Chunk(StreamChunk),
    Done,
    Error(String),
    Skip,
}

// ── OpenAI provider struct ─────────────────────────────────────────────────

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    kind: ProviderKind,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| config.kind.default_base_url().to_string());
        let client = Client::builder()
            .user_agent(concat!("xo-ai/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(OpenAiProvider {
            client,
            base_url,
            api_key: config.api_key.clone(),
            kind: config.kind,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// POST the payload with the stream flag forced to `stream`.
    /// Non-2xx statuses are classified here; the caller only sees success.
    async fn send(&self, payload: &ChatPayload, stream: bool) -> Result<reqwest::Response, ProviderError> {
        let mut body = payload.clone();
        body.stream = stream;

        let url = self.endpoint();
        info!(
            "[provider] {} request to {} model={} messages={} stream={}",
            self.kind.name(),
            url,
            body.model,
            body.messages.len(),
            stream
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("HTTP request failed: {}", e)))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body_text = response.text().await.unwrap_or_default();
        error!(
            "[provider] {} error {}: {}",
            self.kind.name(),
            status,
            truncate_utf8(&body_text, 500)
        );
        let message = truncate_utf8(&body_text, DIAGNOSTIC_MAX_BYTES).to_string();

        Err(match status {
            401 | 403 => ProviderError::Auth(message),
            429 => ProviderError::RateLimited { message, retry_after_secs: retry_after },
            _ => ProviderError::Api { status, message },
        })
    }

    /// Extract the reply from a non-streamed response body.
    fn parse_completion(v: &Value) -> Result<Completion, ProviderError> {
        let choice = v["choices"]
            .get(0)
            .ok_or_else(|| ProviderError::Malformed("response has no choices".into()))?;
        let text = choice["message"]["content"]
            .as_str()
            .map(str::trim)
            .unwrap_or_default();
        if text.is_empty() {
            return Err(ProviderError::Malformed("response has no message content".into()));
        }
        Ok(Completion {
            text: text.to_string(),
            model: v["model"].as_str().map(|s| s.to_string()),
            finish_reason: choice["finish_reason"].as_str().map(|s| s.to_string()),
            usage: Self::parse_usage(v),
        })
    }

    fn parse_usage(v: &Value) -> Option<TokenUsage> {
        let u = v.get("usage")?;
        let input = u["prompt_tokens"].as_u64().unwrap_or(0);
        let output = u["completion_tokens"].as_u64().unwrap_or(0);
        if input == 0 && output == 0 {
            return None;
        }
        Some(TokenUsage {
            input_tokens: input,
            output_tokens: output,
            total_tokens: u["total_tokens"].as_u64().unwrap_or(input + output),
        })
    }

    /// Parse one SSE line. Only `data:` lines carry events.
    fn parse_sse_line(line: &str) -> SseEvent {
        let Some(data) = line.strip_prefix("data:").map(str::trim) else {
            return SseEvent::Skip;
        };
        if data == "[DONE]" {
            return SseEvent::Done;
        }
        let Ok(v) = serde_json::from_str::<Value>(data) else {
            return SseEvent::Skip;
        };
        if let Some(err) = v.get("error") {
            let message = err["message"].as_str().map(|s| s.to_string()).unwrap_or_else(|| err.to_string());
            return SseEvent::Error(message);
        }

        let choice = v["choices"].get(0);
        let delta_text = choice
            .and_then(|c| c["delta"]["content"].as_str())
            .map(|s| s.to_string());
        let finish_reason = choice
            .and_then(|c| c["finish_reason"].as_str())
            .map(|s| s.to_string());
        // Groq reports usage under `x_groq.usage` on the final chunk.
        let usage = Self::parse_usage(&v).or_else(|| Self::parse_usage(&v["x_groq"]));

        SseEvent::Chunk(StreamChunk {
            delta_text,
            finish_reason,
            usage,
            model: v["model"].as_str().map(|s| s.to_string()),
        })
    }

    fn absorb(completion: &mut Completion, chunk: StreamChunk, on_delta: &mut (dyn FnMut(&str) + Send)) {
        if let Some(text) = chunk.delta_text.filter(|t| !t.is_empty()) {
            on_delta(&text);
            completion.text.push_str(&text);
        }
        if chunk.finish_reason.is_some() {
            completion.finish_reason = chunk.finish_reason;
        }
        if chunk.usage.is_some() {
            completion.usage = chunk.usage;
        }
        if completion.model.is_none() {
            completion.model = chunk.model;
        }
    }

    fn finish(mut completion: Completion) -> Result<Completion, ProviderError> {
        let trimmed = completion.text.trim();
        if trimmed.is_empty() {
            return Err(ProviderError::Malformed("stream ended without any content".into()));
        }
        completion.text = trimmed.to_string();
        debug!(
            "[provider] Stream complete: {} chars, finish={:?}",
            completion.text.len(),
            completion.finish_reason
        );
        Ok(completion)
    }
}

// ── AiProvider implementation ──────────────────────────────────────────────

#[async_trait]
impl AiProvider for OpenAiProvider {
    fn name(&self) -> &str {
        self.kind.name()
    }

    async fn chat(&self, payload: &ChatPayload) -> Result<Completion, ProviderError> {
        let response = self.send(payload, false).await?;
        let v: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("invalid JSON body: {}", e)))?;
        Self::parse_completion(&v)
    }

    async fn chat_stream(
        &self,
        payload: &ChatPayload,
        on_delta: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<Completion, ProviderError> {
        let response = self.send(payload, true).await?;

        let mut decoder = SseDecoder::default();
        let mut byte_stream = response.bytes_stream();
        while let Some(result) = byte_stream.next().await {
            let bytes = result
                .map_err(|e| ProviderError::Transport(format!("Stream read error: {}", e)))?;
            if let Some(outcome) = decoder.feed(&bytes, on_delta) {
                return outcome;
            }
        }
        decoder.close(on_delta)
    }
}

// ── SSE decoder ────────────────────────────────────────────────────────────
// Splits the byte stream into lines and folds them into one completion.
// Works on raw bytes: a multi-byte character may straddle two network chunks.
// A server that ignores `stream: true` answers with a plain completion body;
// until the first `data:` line arrives the whole body is kept for that case.

#[derive(Default)]
struct SseDecoder {
    buffer: Vec<u8>,
    completion: Completion,
    saw_data: bool,
    body: Vec<u8>,
}

impl SseDecoder {
    /// Feed one network chunk. Returns the outcome once `[DONE]` or an
    /// error event arrives.
    fn feed(
        &mut self,
        bytes: &[u8],
        on_delta: &mut (dyn FnMut(&str) + Send),
    ) -> Option<Result<Completion, ProviderError>> {
        if !self.saw_data {
            self.body.extend_from_slice(bytes);
        }
        self.buffer.extend_from_slice(bytes);

        while let Some(line_end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line_bytes: Vec<u8> = self.buffer.drain(..=line_end).collect();
            let line = String::from_utf8_lossy(&line_bytes);
            if let Some(outcome) = self.line(line.trim(), on_delta) {
                return Some(outcome);
            }
        }
        None
    }

    fn line(
        &mut self,
        line: &str,
        on_delta: &mut (dyn FnMut(&str) + Send),
    ) -> Option<Result<Completion, ProviderError>> {
        if !self.saw_data && line.starts_with("data:") {
            self.saw_data = true;
            self.body = Vec::new();
        }
        match OpenAiProvider::parse_sse_line(line) {
            SseEvent::Chunk(chunk) => {
                OpenAiProvider::absorb(&mut self.completion, chunk, on_delta);
                None
            }
            SseEvent::Done => Some(OpenAiProvider::finish(std::mem::take(&mut self.completion))),
            SseEvent::Error(message) => Some(Err(ProviderError::Api { status: 200, message })),
            SseEvent::Skip => None,
        }
    }

    /// The stream closed without `[DONE]`.
    fn close(mut self, on_delta: &mut (dyn FnMut(&str) + Send)) -> Result<Completion, ProviderError> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest).to_string();
            if let Some(outcome) = self.line(line.trim(), on_delta) {
                return outcome;
            }
        }
        if !self.saw_data {
            if let Ok(v) = serde_json::from_slice::<Value>(&self.body) {
                debug!("[provider] Server ignored stream=true; reading a plain completion body");
                let completion = OpenAiProvider::parse_completion(&v)?;
                on_delta(&completion.text);
                return Ok(completion);
            }
        }
        OpenAiProvider::finish(self.completion)
    }
}
