//! Request and response bodies for the companion support endpoint.
//!
//! Field names are camelCase on the wire:
//!
//! ```json
//! {
//!   "worry": "I feel anxious about my exam",
//!   "useCase": "problem-solving",
//!   "conversationHistory": [{ "role": "user", "content": "..." }],
//!   "attachmentUrl": "https://..."
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SolaceError};
use crate::llm::UseCase;
use crate::models::{ChatTurn, SupportQuery};

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    /// The user's message. Required and non-blank; a non-string value counts
    /// as missing.
    #[serde(default, deserialize_with = "string_or_none")]
    pub worry: Option<String>,

    /// One of `venting`, `journaling`, `problem-solving`,
    /// `emotional-support`, `self-reflection`. Anything else means `venting`.
    #[serde(default, deserialize_with = "string_or_none")]
    pub use_case: Option<String>,

    /// Prior turns, oldest first.
    #[serde(default)]
    pub conversation_history: Option<Vec<ChatTurn>>,

    /// Image to show the model alongside the worry.
    #[serde(default, deserialize_with = "string_or_none")]
    pub attachment_url: Option<String>,
}

impl SupportRequest {
    pub fn into_query(self) -> Result<SupportQuery> {
        let worry = self
            .worry
            .filter(|worry| !worry.trim().is_empty())
            .ok_or_else(SolaceError::worry_required)?;

        let mut query = SupportQuery::new(worry)
            .with_use_case(UseCase::from_tag(self.use_case.as_deref().unwrap_or_default()))
            .with_history(self.conversation_history.unwrap_or_default());

        if let Some(url) = self.attachment_url.filter(|url| !url.trim().is_empty()) {
            query = query.with_attachment(url);
        }

        Ok(query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SupportResponse {
    pub suggestion: String,
}

/// Error body of the support endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SupportError {
    pub error: String,
}

/// Accept any JSON value, keeping it only when it is a string.
fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}
