use serde::{Deserialize, Serialize};

use crate::message::Message;

/// A completed model response from one deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub id: String,
    pub model: String,
    pub message: Message,
    pub finish_reason: FinishReason,
    pub usage: Usage,
    /// Raw provider payload, when the transport chooses to keep it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl Completion {
    /// Text of the assistant message.
    pub fn text(&self) -> &str {
        &self.message.content
    }
}

/// Dual representation: unified reason + provider-native raw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishReason {
    pub reason: String, // "stop", "length", "content_filter", "other"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl FinishReason {
    pub fn stop() -> Self {
        Self {
            reason: "stop".into(),
            raw: None,
        }
    }
    pub fn length() -> Self {
        Self {
            reason: "length".into(),
            raw: None,
        }
    }
    pub fn content_filter() -> Self {
        Self {
            reason: "content_filter".into(),
            raw: None,
        }
    }
    pub fn other() -> Self {
        Self {
            reason: "other".into(),
            raw: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}
