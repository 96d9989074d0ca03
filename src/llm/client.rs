use crate::config::AssistantConfig;
use crate::error::{AccountingError, Result};
use crate::llm::types::*;
use log::warn;
use reqwest::Client;

/// A chat model that answers one user message under a system role.
#[allow(async_fn_in_trait)]
pub trait ChatCompletion {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    config: AssistantConfig,
}

impl OpenAiClient {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Reads the configuration from the environment, failing before any request when the key is absent.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(AssistantConfig::from_env()?))
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl ChatCompletion for OpenAiClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let payload = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
        };

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            warn!("Chat completion request failed with status {}", status);
            return Err(AccountingError::ChatFailed(format!(
                "API error (status {}): {}",
                status, err_text
            )));
        }

        let body: ChatCompletionResponse = res.json().await?;

        body.choices
            .into_iter()
            .next()
            .ok_or_else(|| AccountingError::ChatFailed("No choices returned".to_string()))?
            .message
            .content
            .ok_or_else(|| AccountingError::ChatFailed("Model returned no text content".to_string()))
    }
}
