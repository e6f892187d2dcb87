//! Request and response types for chat-completion calls.

use crate::config::AnalyzerConfig;
use serde::{Deserialize, Serialize};

/// Chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Provider-specific tool switches (Groq compound models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound_custom: Option<serde_json::Value>,
}

impl ChatRequest {
    /// Attaches provider tool switches to the request
    pub fn with_compound_tools(mut self, tools: &[&str]) -> Self {
        self.compound_custom = Some(serde_json::json!({
            "tools": { "enabled_tools": tools }
        }));
        self
    }
}

/// Chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Model settings shared by every request a client sends.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatSettings {
    /// Builds a single-message request carrying these settings
    pub fn request(&self, content: impl Into<String>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::user(content)],
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
            compound_custom: None,
        }
    }
}

impl From<&AnalyzerConfig> for ChatSettings {
    fn from(config: &AnalyzerConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// A completed analyzer call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Completion {
    /// Text of the first choice
    pub content: String,
    /// Model reasoning, when the provider reports it
    pub reasoning: Option<String>,
    /// Tool sessions the provider ran while answering
    pub executed_tools: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    #[serde(default)]
    pub choices: Vec<ChoiceRaw>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceRaw {
    pub message: MessageRaw,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageRaw {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub executed_tools: Option<Vec<serde_json::Value>>,
}

impl From<MessageRaw> for Completion {
    fn from(message: MessageRaw) -> Self {
        Self {
            content: message.content.unwrap_or_default(),
            reasoning: message.reasoning,
            executed_tools: message.executed_tools.unwrap_or_default(),
        }
    }
}
