use super::{TextGenerator, endpoint, non_empty, post_json};
use crate::error::BookResult;
use crate::models::{GeneratedText, Prompt};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub(super) const PROVIDER: &str = "ollama";

/// Client for an Ollama-compatible `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    temperature: f32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: Options,
}

#[derive(Serialize)]
struct Options {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaClient {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        temperature: f32,
    ) -> Self {
        OllamaClient {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            base_url: base_url.into(),
            temperature,
        }
    }
}

impl TextGenerator for OllamaClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &Prompt) -> BookResult<GeneratedText> {
        info!("Requesting generation from Ollama");

        let body = GenerateRequest {
            model: &self.model,
            prompt: prompt.as_str(),
            stream: false,
            options: Options {
                temperature: self.temperature,
            },
        };

        let mut request = self.client.post(endpoint(&self.base_url, "api/generate"));
        // Local servers usually run without auth
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response: GenerateResponse = post_json(PROVIDER, request, &body).await?;
        let generated = non_empty(PROVIDER, response.response)?;

        info!(bytes = generated.text.len(), "Ollama generation complete");
        Ok(generated)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
