//! Read-only catalogs the client uses to render pickers.

use serde::Serialize;

use crate::llm::UseCase;
use crate::mood::{MoodKey, MoodSample};

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UseCaseResponse {
    pub tag: UseCase,
    pub prompt: String,
}

impl From<UseCase> for UseCaseResponse {
    fn from(use_case: UseCase) -> Self {
        Self {
            tag: use_case,
            prompt: use_case.system_prompt().to_string(),
        }
    }
}

/// Gradient colors as `#rrggbb`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MoodResponse {
    pub key: MoodKey,
    pub from: String,
    pub to: String,
}

impl From<MoodSample> for MoodResponse {
    fn from(sample: MoodSample) -> Self {
        let (from, to) = sample.gradient;
        Self {
            key: sample.key,
            from: from.hex(),
            to: to.hex(),
        }
    }
}
