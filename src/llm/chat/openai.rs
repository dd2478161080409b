use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };

use super::{ build_http_client, ChatClient, CompletionResponse, ProviderError };
use crate::llm::{ GenerationParams, LlmConfig, LlmType };
use crate::models::chat::Message;

/// Client for OpenAI-compatible chat completion servers (llama.cpp server,
/// vLLM, TGI and similar) hosting the model locally.
pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    generation: GenerationParams,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

impl OpenAIChatClient {
    pub fn new(
        http: HttpClient,
        model: Option<String>,
        base_url: Option<String>,
        generation: GenerationParams
    ) -> Self {
        let chat_model = model.unwrap_or_else(|| "Aeshp/deepseekR1tunedchat".to_string());
        let api_url = base_url.unwrap_or_else(|| "http://localhost:8080".to_string());

        Self {
            http,
            model: chat_model,
            base_url: api_url,
            generation,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        if config.llm_type != LlmType::OpenAI {
            return Err(ProviderError::Config("Invalid config type for OpenAIChatClient".into()));
        }

        let http = build_http_client(config.timeout, config.api_key.as_deref())?;
        Ok(
            Self::new(
                http,
                config.completion_model.clone(),
                config.base_url.clone(),
                config.generation
            )
        )
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse, ProviderError> {
        let url = self.completions_url();
        let request = OpenAIChatRequest {
            model: &self.model,
            messages,
            temperature: self.generation.temperature,
            top_p: self.generation.top_p,
            max_tokens: self.generation.max_new_tokens,
            stream: false,
        };

        debug!("Sending {} messages to {}", messages.len(), url);
        let response = self.http.post(&url).json(&request).send().await?.error_for_status()?;
        let body = response.json::<OpenAIResponse>().await?;

        let content = body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::MalformedResponse("No content in response".into()))?;

        Ok(CompletionResponse { response: content })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}
