pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use super::{ LlmConfig, LlmType };
use self::ollama::OllamaClient;
use self::openai::OpenAIChatClient;
use crate::models::chat::Message;

#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure, timeout, or non-success status from the provider.
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("invalid provider configuration: {0}")]
    Config(String),
}

/// A text completion provider. Implementations are built once at start-up,
/// shared read-only across requests, and shut down when the server stops.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse, ProviderError>;

    fn get_model(&self) -> String;

    fn get_base_url(&self) -> Option<String>;

    async fn shutdown(&self) {}
}

pub(crate) fn build_http_client(
    timeout: Duration,
    api_key: Option<&str>
) -> Result<HttpClient, ProviderError> {
    let mut builder = HttpClient::builder().timeout(timeout);

    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        let mut headers = reqwest::header::HeaderMap::new();
        let value = reqwest::header::HeaderValue
            ::from_str(&format!("Bearer {}", key))
            .map_err(|e| ProviderError::Config(format!("Invalid API key format: {}", e)))?;
        headers.insert(reqwest::header::AUTHORIZATION, value);
        builder = builder.default_headers(headers);
    }

    builder.build().map_err(ProviderError::from)
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, ProviderError> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Ollama => {
            let specific_client = OllamaClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::OpenAI => {
            let specific_client = OpenAIChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}
