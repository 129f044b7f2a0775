// src/core/gateway_client.rs
//! Chat-completions client for the hosted LLM gateway

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use super::config_manager::GatewayConfig;
use crate::types::response::{CompletionRequest, CompletionResponse};

const CHAT_COMPLETIONS_ENDPOINT: &str = "/v1/chat/completions";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Invalid(String),
    #[error("LLM gateway is not configured: {0}")]
    NotConfigured(String),
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("Payment required. Please add credits to your workspace.")]
    PaymentRequired,
    #[error("LLM gateway returned error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to reach LLM gateway: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("No content in AI response")]
    EmptyResponse,
    #[error("Failed to parse AI response: {0}")]
    Malformed(String),
}

impl GatewayError {
    pub fn http_status(&self) -> u16 {
        match self {
            GatewayError::Invalid(_) => 400,
            GatewayError::RateLimited => 429,
            GatewayError::PaymentRequired => 402,
            GatewayError::NotConfigured(_) => 503,
            GatewayError::Status { .. } | GatewayError::Transport(_) => 502,
            GatewayError::EmptyResponse | GatewayError::Malformed(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Invalid(_) => "INVALID_REQUEST",
            GatewayError::NotConfigured(_) => "AI_NOT_CONFIGURED",
            GatewayError::RateLimited => "RATE_LIMITED",
            GatewayError::PaymentRequired => "PAYMENT_REQUIRED",
            GatewayError::Status { .. } => "AI_GATEWAY_ERROR",
            GatewayError::Transport(_) => "AI_GATEWAY_UNREACHABLE",
            GatewayError::EmptyResponse => "AI_EMPTY_RESPONSE",
            GatewayError::Malformed(_) => "AI_MALFORMED_RESPONSE",
        }
    }
}

/// Anything that can answer a chat-completions request with text.
#[rocket::async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}

pub struct GatewayClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::NotConfigured("LLM_GATEWAY_API_KEY is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CHAT_COMPLETIONS_ENDPOINT)
    }
}

#[rocket::async_trait]
impl CompletionBackend for GatewayClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        info!(
            "Sending completion request to LLM gateway (model {}, {} messages)",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("LLM gateway error {}: {}", status, body);
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
                StatusCode::PAYMENT_REQUIRED => GatewayError::PaymentRequired,
                _ => GatewayError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        completion.first_content().ok_or(GatewayError::EmptyResponse)
    }
}
