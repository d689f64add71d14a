use super::types::{ChatMessage, ChatRole, LlmError, LlmProvider, LlmResponse};
use crate::shared::config::{ApiKey, EnrichmentConfig};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Anthropic Messages API провайдер
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<ApiKey>,
    anthropic_version: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Создать провайдер из настроек обогащения
    pub fn new(config: &EnrichmentConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::InvalidRequest(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            anthropic_version: config.anthropic_version.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<LlmResponse, LlmError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| LlmError::AuthError("ANTHROPIC_API_KEY is not set".to_string()))?;

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: &messages,
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key.expose())
            .header("anthropic-version", &self.anthropic_version)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ApiError(format!("unreadable response: {e}")))?;

        if body.role != ChatRole::Assistant {
            tracing::debug!("Unexpected reply role: {:?}", body.role);
        }

        let first = body
            .content
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::ApiError("No content in response".to_string()))?;

        let content = match (first.kind.as_str(), first.text) {
            ("text", Some(text)) => text,
            (kind, _) => {
                return Err(LlmError::ApiError(format!(
                    "first content block is {kind:?}, expected text"
                )))
            }
        };

        Ok(LlmResponse {
            content,
            tokens_used: body.usage.map(|u| u.input_tokens + u.output_tokens),
            model: body.model,
            finish_reason: body.stop_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "Anthropic"
    }
}

fn classify_status(status: StatusCode, body: String) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::AuthError(body),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        _ => LlmError::ApiError(format!("status {}: {}", status, body)),
    }
}

// ============================================================================
// Request/Response structures для Messages API
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default = "assistant_role")]
    role: ChatRole,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    model: String,
    stop_reason: Option<String>,
    usage: Option<Usage>,
}

fn assistant_role() -> ChatRole {
    ChatRole::Assistant
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}
