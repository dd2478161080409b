use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use async_trait::async_trait;
use super::{ build_http_client, ChatClient, CompletionResponse, ProviderError };
use crate::llm::{ GenerationParams, LlmConfig, LlmType };
use crate::models::chat::Message;
use log::debug;

#[derive(Debug)]
pub struct OllamaClient {
    http: HttpClient,
    base_url: String,
    completion_model: String,
    generation: GenerationParams,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(
        http: HttpClient,
        base_url: Option<String>,
        completion_model: Option<String>,
        generation: GenerationParams
    ) -> Self {
        let model = completion_model.unwrap_or_else(|| "deepseek-r1".to_string());
        let url = base_url.unwrap_or_else(|| "http://localhost:11434".into());

        Self {
            http,
            base_url: url,
            completion_model: model,
            generation,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        if config.llm_type != LlmType::Ollama {
            return Err(ProviderError::Config("Invalid config type for OllamaClient".into()));
        }

        let http = build_http_client(config.timeout, None)?;
        Ok(
            Self::new(
                http,
                config.base_url.clone(),
                config.completion_model.clone(),
                config.generation
            )
        )
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse, ProviderError> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let req = ChatRequest {
            model: &self.completion_model,
            messages,
            stream: false,
            options: GenerateOptions {
                temperature: self.generation.temperature,
                top_p: self.generation.top_p,
                num_predict: self.generation.max_new_tokens,
            },
        };
        debug!("Sending {} messages to Ollama at {}", messages.len(), url);
        let resp = self.http.post(&url).json(&req).send().await?.error_for_status()?;
        let data = resp.json::<ChatResponse>().await?;
        let message = data.message.ok_or_else(||
            ProviderError::MalformedResponse("Ollama response has no message".into())
        )?;
        Ok(CompletionResponse { response: message.content })
    }

    fn get_model(&self) -> String {
        self.completion_model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}
