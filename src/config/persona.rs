use std::error::Error;
use std::fmt;
use std::fs;
use std::sync::Arc;
use log::info;

/// Persona and policy instructions injected as the system message of a
/// fresh conversation. Its `<think>...</think>` output instruction is the
/// delimiter convention the post-processor parses.
const PERSONA_PROMPT: &str = include_str!("../../prompts/persona.md");

/// Identity deflection script returned whenever the guardrail fires.
pub const DEFLECTION_REPLY: &str =
    "I'm Cern, a senior specialist from the customer experience team here at Regime Audio. My purpose is to provide the best support possible for our products.";

/// Reasoning label returned alongside the deflection reply.
pub const GUARDRAIL_REASONING: &str = "Out-of-scope query.";

#[derive(Debug)]
pub enum PersonaError {
    IoError(String, std::io::Error),
    Empty(String),
}

impl fmt::Display for PersonaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonaError::IoError(path, e) => write!(f, "Failed to read persona file '{}': {}", path, e),
            PersonaError::Empty(path) => write!(f, "Persona file '{}' is empty", path),
        }
    }
}

impl Error for PersonaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PersonaError::IoError(_, e) => Some(e),
            PersonaError::Empty(_) => None,
        }
    }
}

pub fn default_persona() -> &'static str {
    PERSONA_PROMPT.trim()
}

pub fn load_persona(path: Option<&str>) -> Result<Arc<String>, PersonaError> {
    let Some(path) = path else {
        info!("Using built-in persona prompt");
        return Ok(Arc::new(default_persona().to_string()));
    };

    let content = fs
        ::read_to_string(path)
        .map_err(|e| PersonaError::IoError(path.to_string(), e))?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(PersonaError::Empty(path.to_string()));
    }
    info!("Loaded persona prompt from: {}", path);
    Ok(Arc::new(trimmed.to_string()))
}
