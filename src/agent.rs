use crate::cli::Args;
use crate::config::persona;
use crate::guardrail::BannedTermFilter;
use crate::llm::chat::{ ChatClient, ProviderError, new_client as new_chat_client };
use crate::llm::{ GenerationParams, LlmConfig, LlmType };
use crate::models::chat::{ ChatRequest, HistoryEntry, Message, ProcessedResponse, Role };
use crate::postprocess::ResponseProcessor;

use log::{ debug, info };
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

/// Serves chat requests: assembles the message list, calls the completion
/// provider once, and post-processes the raw reply.
#[derive(Clone)]
pub struct CernAgent {
    chat_client: Arc<dyn ChatClient>,
    persona: Arc<String>,
    processor: Arc<ResponseProcessor>,
    assistant_role: String,
}

impl CernAgent {
    pub fn new(
        chat_client: Arc<dyn ChatClient>,
        persona: Arc<String>,
        processor: ResponseProcessor,
        assistant_role: impl Into<String>
    ) -> Self {
        Self {
            chat_client,
            persona,
            processor: Arc::new(processor),
            assistant_role: assistant_role.into(),
        }
    }

    fn initialize_chat_client(args: &Args) -> Result<Arc<dyn ChatClient>, Box<dyn Error + Send + Sync>> {
        let chat_llm_type: LlmType = args.chat_llm_type.parse()?;
        let chat_api_key = if !args.chat_api_key.is_empty() {
            Some(args.chat_api_key.clone())
        } else {
            None
        };
        let chat_config = LlmConfig {
            llm_type: chat_llm_type,
            base_url: args.chat_base_url.clone(),
            api_key: chat_api_key,
            completion_model: args.chat_model.clone(),
            generation: GenerationParams {
                max_new_tokens: args.max_new_tokens,
                temperature: args.temperature,
                top_p: args.top_p,
            },
            timeout: Duration::from_secs(args.request_timeout_secs),
        };
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Type={}, Model={}, BaseURL={}",
            chat_llm_type,
            chat_client.get_model(),
            chat_client.get_base_url().as_deref().unwrap_or("adapter default")
        );
        Ok(chat_client)
    }

    pub fn from_args(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let chat_client = Self::initialize_chat_client(args)?;
        let persona = persona::load_persona(args.persona_path.as_deref())?;

        let filter = match &args.banned_terms {
            Some(terms) => BannedTermFilter::from_terms(terms),
            None => BannedTermFilter::default(),
        };
        info!("Guardrail banned terms: {:?}", filter.terms());

        Ok(Self::new(chat_client, persona, ResponseProcessor::new(filter), args.assistant_role.clone()))
    }

    fn map_role(&self, label: &str) -> Role {
        if label == self.assistant_role { Role::Assistant } else { Role::User }
    }

    /// Builds the provider input. The persona is injected as a system
    /// message only when the conversation has no history yet.
    pub fn build_messages(&self, history: &[HistoryEntry], user_prompt: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        if history.is_empty() {
            messages.push(Message::new(Role::System, self.persona.as_str()));
        }
        messages.extend(
            history.iter().map(|entry| Message::new(self.map_role(&entry.role), entry.content.as_str()))
        );
        messages.push(Message::new(Role::User, user_prompt));
        messages
    }

    pub async fn respond(&self, request: &ChatRequest) -> Result<ProcessedResponse, ProviderError> {
        let messages = self.build_messages(&request.history, &request.user_prompt);
        debug!("Forwarding {} messages to provider", messages.len());

        let completion = self.chat_client.complete(&messages).await?;
        let raw_reply = completion.response.trim();
        debug!("--- RAW MODEL OUTPUT ---\n{}\n------------------------", raw_reply);

        let processed = self.processor.process(raw_reply);
        debug!("Processed reply: reasoning={:?} reply={:?}", processed.reasoning, processed.reply);
        Ok(processed)
    }

    pub async fn shutdown(&self) {
        info!("Shutting down chat client ({})", self.chat_client.get_model());
        self.chat_client.shutdown().await;
    }
}
