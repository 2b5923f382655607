use super::{TextGenerator, endpoint, non_empty, post_json};
use crate::error::{BookError, BookResult};
use crate::models::{GeneratedText, Prompt};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub(super) const PROVIDER: &str = "openai";

/// OpenAI chat completions client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        temperature: f32,
    ) -> Self {
        OpenAiClient {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            temperature,
        }
    }
}

impl TextGenerator for OpenAiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &Prompt) -> BookResult<GeneratedText> {
        info!("Requesting generation from OpenAI");

        let body = ChatRequest {
            model: &self.model,
            messages: [Message {
                role: "user",
                content: prompt.as_str(),
            }],
            temperature: self.temperature,
        };
        let request = self
            .client
            .post(endpoint(&self.base_url, "chat/completions"))
            .bearer_auth(&self.api_key);

        let response: ChatResponse = post_json(PROVIDER, request, &body).await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BookError::invocation(PROVIDER, "response has no choices"))?
            .message
            .content
            .unwrap_or_default();
        let generated = non_empty(PROVIDER, text)?;

        info!(bytes = generated.text.len(), "OpenAI generation complete");
        Ok(generated)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
