//! Conversation data model: roles, turns, and the fixed user-facing strings.

use serde::{Deserialize, Serialize};

/// Role of a conversation participant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message in the conversation, tagged with its speaker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Shown when submit fires with nothing to send.
pub const EMPTY_INPUT_ERROR: &str = "Please enter a question";

/// Shown when the exchange with the remote endpoint fails for any reason.
pub const EXCHANGE_FAILED_ERROR: &str = "Failed to get response. Please try again later.";

/// Preset questions offered by the chat screen. Selecting one fills the
/// input field without submitting.
pub const SAMPLE_QUESTIONS: [&str; 4] = [
    "How do you ensure confidentiality and privacy during therapy?",
    "What are your qualifications and experience as a therapy assistant?",
    "How long will therapy take and how often will I need to attend sessions?",
    "What is the cost of therapy and do you accept insurance?",
];
