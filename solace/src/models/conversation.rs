use serde::{Deserialize, Serialize};

use crate::llm::prompts::UseCase;

/// Speaker of a prior conversation turn. System turns are never accepted from
/// callers; the system prompt is always chosen by [`UseCase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A validated support request, ready to be forwarded upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportQuery {
    pub worry: String,
    pub use_case: UseCase,
    pub history: Vec<ChatTurn>,
    pub attachment_url: Option<String>,
}

impl SupportQuery {
    pub fn new(worry: impl Into<String>) -> Self {
        Self {
            worry: worry.into(),
            use_case: UseCase::default(),
            history: Vec::new(),
            attachment_url: None,
        }
    }

    pub fn with_use_case(mut self, use_case: UseCase) -> Self {
        self.use_case = use_case;
        self
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_attachment(mut self, url: impl Into<String>) -> Self {
        self.attachment_url = Some(url.into());
        self
    }
}
