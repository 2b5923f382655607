//! Text generation backends.
//!
//! [`TextGenerator`] is the one capability the pipeline needs from a model.
//! Each hosted provider gets its own adapter, and [`Provider`] picks one from
//! [`Config`] so callers never depend on a particular provider's wire format.

mod gemini;
mod ollama;
mod openai;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

use crate::config::{Config, ProviderKind};
use crate::error::{BookError, BookResult};
use crate::models::{GeneratedText, Prompt};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, warn};

pub trait TextGenerator: Send + Sync {
    /// Submits `prompt` and waits for the complete response.
    fn generate(&self, prompt: &Prompt) -> impl Future<Output = BookResult<GeneratedText>> + Send;

    /// Provider name (e.g. "gemini", "openai").
    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// The configured backend.
#[derive(Debug, Clone)]
pub enum Provider {
    Gemini(GeminiClient),
    OpenAi(OpenAiClient),
    Ollama(OllamaClient),
}

impl Provider {
    /// Builds the client named by `config.provider`.
    ///
    /// Hosted providers need a credential; a missing one is an
    /// authentication failure raised here, before any prompt is sent.
    pub fn from_config(config: &Config) -> BookResult<Self> {
        if config.provider.requires_credential() && config.api_key.is_none() {
            return Err(BookError::authentication(
                provider_label(config.provider),
                format!("{} is not set", config.provider.credential_key()),
            ));
        }
        let api_key = config.api_key.clone();

        let provider = match config.provider {
            ProviderKind::Gemini => Provider::Gemini(GeminiClient::new(
                api_key.unwrap_or_default(),
                &config.model,
                &config.base_url,
                config.temperature,
            )),
            ProviderKind::OpenAi => Provider::OpenAi(OpenAiClient::new(
                api_key.unwrap_or_default(),
                &config.model,
                &config.base_url,
                config.temperature,
            )),
            ProviderKind::Ollama => Provider::Ollama(OllamaClient::new(
                api_key,
                &config.model,
                &config.base_url,
                config.temperature,
            )),
        };
        Ok(provider)
    }
}

fn provider_label(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Gemini => gemini::PROVIDER,
        ProviderKind::OpenAi => openai::PROVIDER,
        ProviderKind::Ollama => ollama::PROVIDER,
    }
}

impl TextGenerator for Provider {
    async fn generate(&self, prompt: &Prompt) -> BookResult<GeneratedText> {
        match self {
            Provider::Gemini(client) => client.generate(prompt).await,
            Provider::OpenAi(client) => client.generate(prompt).await,
            Provider::Ollama(client) => client.generate(prompt).await,
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            Provider::Gemini(client) => client.provider_name(),
            Provider::OpenAi(client) => client.provider_name(),
            Provider::Ollama(client) => client.provider_name(),
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Provider::Gemini(client) => client.model_name(),
            Provider::OpenAi(client) => client.model_name(),
            Provider::Ollama(client) => client.model_name(),
        }
    }
}

/// Sends `body` as JSON and decodes the reply, classifying failures.
async fn post_json<B, R>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
    body: &B,
) -> BookResult<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = request
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| BookError::invocation(provider, e))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| BookError::invocation(provider, e))?;
    debug!(provider, %status, bytes = response_text.len(), "model response received");

    if !status.is_success() {
        warn!(provider, %status, "model call rejected");
        let detail = format!("HTTP {}: {}", status, snippet(&response_text));
        return Err(if is_auth_failure(status, &response_text) {
            BookError::authentication(provider, detail)
        } else {
            BookError::invocation(provider, detail)
        });
    }

    serde_json::from_str(&response_text)
        .map_err(|e| BookError::invocation(provider, format!("malformed response: {}", e)))
}

fn is_auth_failure(status: StatusCode, body: &str) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || (status == StatusCode::BAD_REQUEST
            && (body.contains("API_KEY_INVALID") || body.contains("API key not valid")))
}

fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Rejects a reply that carries no text.
fn non_empty(provider: &'static str, text: String) -> BookResult<GeneratedText> {
    if text.trim().is_empty() {
        Err(BookError::invocation(provider, "model returned empty text"))
    } else {
        Ok(GeneratedText { text })
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
