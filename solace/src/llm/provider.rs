use std::sync::Arc;

use crate::config::{env_non_empty, LlmConfig};
use crate::error::{Result, SolaceError};
use crate::llm::api::LlmApiClient;
use crate::models::SupportQuery;

/// Stateless front for the upstream gateway. Cloning is cheap and every call
/// is independent, so one provider is shared by all request handlers.
#[derive(Debug, Clone)]
pub struct LlmProvider {
    client: LlmApiClient,
    config: Arc<LlmConfig>,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        Ok(Self {
            client: LlmApiClient::new(config)?,
            config: Arc::new(config.clone()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// Current bearer credential. The environment variable is read on every
    /// call, so rotating the key needs no restart.
    pub fn api_key(&self) -> Option<String> {
        self.config
            .api_key_env
            .as_deref()
            .and_then(env_non_empty)
            .or_else(|| self.config.api_key.clone())
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    pub fn client(&self) -> &LlmApiClient {
        &self.client
    }

    /// Produce one supportive reply for `query`.
    ///
    /// Validation and credential checks happen before any network traffic.
    pub async fn suggest(&self, query: &SupportQuery) -> Result<String> {
        if query.worry.trim().is_empty() {
            return Err(SolaceError::worry_required());
        }

        let api_key = self.api_key().ok_or(SolaceError::MissingCredential)?;

        let request = self.client.build_request(query)?;

        tracing::info!(
            use_case = %query.use_case,
            history_len = query.history.len(),
            has_attachment = query.attachment_url.is_some(),
            model = %self.client.model(),
            "Requesting support suggestion"
        );

        let suggestion = self.client.complete(&api_key, &request).await?;
        tracing::debug!(suggestion_len = suggestion.len(), "Suggestion received");

        Ok(suggestion)
    }
}
