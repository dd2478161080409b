use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Server Args ---
    /// Host address and port for the HTTP API to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:8000")]
    pub server_addr: String,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,

    // --- Chat LLM Provider Args ---
    /// Type of completion provider (ollama, openai). "openai" covers any
    /// OpenAI-compatible local server such as llama.cpp, vLLM or TGI.
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "ollama")]
    pub chat_llm_type: String,

    /// Base URL for the provider API (e.g., http://localhost:11434 for Ollama)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, let adapters handle defaults if None
    pub chat_base_url: Option<String>,

    /// Bearer token for OpenAI-compatible servers. Empty means none.
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Model name served by the provider.
    #[arg(long, env = "CHAT_MODEL")] // No default, rely on adapter defaults if None
    pub chat_model: Option<String>,

    /// Maximum number of tokens to generate per reply.
    #[arg(long, env = "MAX_NEW_TOKENS", default_value = "512")]
    pub max_new_tokens: u32,

    /// Sampling temperature.
    #[arg(long, env = "TEMPERATURE", default_value = "0.6")]
    pub temperature: f32,

    /// Nucleus sampling probability mass.
    #[arg(long, env = "TOP_P", default_value = "0.9")]
    pub top_p: f32,

    /// Timeout in seconds for a single completion call.
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value = "120")]
    pub request_timeout_secs: u64,

    // --- Persona & Guardrail Args ---
    /// Optional file replacing the built-in persona instructions.
    #[arg(long, env = "PERSONA_PATH")]
    pub persona_path: Option<String>,

    /// Comma separated banned terms, scanned in the given order.
    /// Replaces the built-in list when set.
    #[arg(long, env = "BANNED_TERMS", value_delimiter = ',')]
    pub banned_terms: Option<Vec<String>>,

    /// History role label that denotes the bot persona.
    #[arg(long, env = "ASSISTANT_ROLE", default_value = "cern")]
    pub assistant_role: String,
}
