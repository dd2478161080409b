use serde::{ Serialize, Deserialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A role-tagged message as forwarded to the completion provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// A history entry as sent by clients. The role uses the client's own
/// vocabulary (e.g. "cern" for the bot) and is mapped before forwarding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub history: Vec<HistoryEntry>,
    pub user_prompt: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessedResponse {
    pub reply: String,
    pub reasoning: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub cern_response: String,
    pub thought_process: String,
}

impl From<ProcessedResponse> for ChatResponse {
    fn from(processed: ProcessedResponse) -> Self {
        Self {
            cern_response: processed.reply,
            thought_process: processed.reasoning,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
