use std::time::Duration;

use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestMessageContentPartImage, ChatCompletionRequestMessageContentPartText,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ImageUrl,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};
use serde::Deserialize;

use crate::{
    config::LlmConfig,
    error::{Result, SolaceError},
    models::{ChatRole, ChatTurn, SupportQuery},
};

/// Only the part of a chat-completion response the proxy reads. Everything is
/// optional so that an unexpected shape degrades to "no suggestion" instead of
/// a decode failure.
#[derive(Debug, Default, Deserialize)]
struct CompletionEnvelope {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    message: Option<CompletionMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LlmApiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                SolaceError::Internal(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(&self, query: &SupportQuery) -> Result<CreateChatCompletionRequest> {
        let messages = build_support_messages(query)?;

        CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .build()
            .map_err(|error| SolaceError::Internal(format!("Invalid LLM request: {error}")))
    }

    /// Send one chat-completion request. No retries: rate limiting and billing
    /// failures are surfaced to the caller as their own error variants.
    pub async fn complete(
        &self,
        api_key: &str,
        request: &CreateChatCompletionRequest,
    ) -> Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| SolaceError::Internal(format!("Invalid API key header: {e}")))?,
        );

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|error| {
                tracing::error!(error = %error, "AI gateway request failed");
                SolaceError::Upstream(format!("AI gateway request failed: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, &body));
        }

        let bytes = response.bytes().await?;
        Self::extract_suggestion(&bytes)
    }

    fn map_status(status: StatusCode, body: &str) -> SolaceError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("AI gateway rate limited the request");
                SolaceError::RateLimited
            }
            StatusCode::PAYMENT_REQUIRED => {
                tracing::warn!("AI gateway reported a billing problem");
                SolaceError::PaymentRequired
            }
            _ => {
                tracing::error!(status = status.as_u16(), body = %body, "AI gateway error");
                SolaceError::Upstream(format!("AI gateway error: {}", status.as_u16()))
            }
        }
    }

    fn extract_suggestion(bytes: &[u8]) -> Result<String> {
        let envelope: CompletionEnvelope = match serde_json::from_slice(bytes) {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(error = %error, "Unexpected AI gateway response shape");
                return Err(SolaceError::EmptySuggestion);
            }
        };

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(SolaceError::EmptySuggestion)
    }
}

/// `[system] + history + [user]`, with the user turn always carried as content
/// parts: the worry text, then the attachment image when one is given.
pub fn build_support_messages(query: &SupportQuery) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut messages = Vec::with_capacity(query.history.len() + 2);

    messages.push(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(query.use_case.system_prompt())
            .build()
            .map_err(|error| SolaceError::Internal(format!("Invalid system prompt: {error}")))?
            .into(),
    );

    for turn in &query.history {
        messages.push(history_message(turn)?);
    }

    let mut parts = vec![ChatCompletionRequestUserMessageContentPart::Text(
        ChatCompletionRequestMessageContentPartText {
            text: query.worry.clone(),
        },
    )];

    if let Some(url) = query.attachment_url.as_ref() {
        parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(
            ChatCompletionRequestMessageContentPartImage {
                image_url: ImageUrl {
                    url: url.clone(),
                    detail: None,
                },
            },
        ));
    }

    messages.push(
        ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(parts))
            .build()
            .map_err(|error| SolaceError::Internal(format!("Invalid user message: {error}")))?
            .into(),
    );

    Ok(messages)
}

fn history_message(turn: &ChatTurn) -> Result<ChatCompletionRequestMessage> {
    let message = match turn.role {
        ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(turn.content.as_str())
            .build()
            .map_err(|error| SolaceError::Internal(format!("Invalid history turn: {error}")))?
            .into(),
        ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(turn.content.as_str())
            .build()
            .map_err(|error| SolaceError::Internal(format!("Invalid history turn: {error}")))?
            .into(),
    };

    Ok(message)
}
