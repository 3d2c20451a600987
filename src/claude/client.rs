use crate::claude::pricing::Model;
use crate::claude::types::{Generation, GenerationRequest, Message, MessageRequest, MessageResponse, Usage};
use crate::claude::Generator;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Error, Debug)]
pub enum ClaudeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Missing API key")]
    MissingApiKey,

    #[error("Response contained no text (stop reason: {stop_reason:?})")]
    EmptyResponse { stop_reason: Option<String> },
}

pub struct ClaudeClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: Model,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn new(api_key: String) -> Result<Self, ClaudeError> {
        if api_key.trim().is_empty() {
            return Err(ClaudeError::MissingApiKey);
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            model: Model::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub async fn send_message(
        &self,
        model: &Model,
        messages: Vec<Message>,
        system: Option<String>,
        max_tokens: u32,
    ) -> Result<(String, Usage, f64), ClaudeError> {
        let request = MessageRequest {
            model: model.model_id().to_string(),
            max_tokens,
            messages,
            system,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ClaudeError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let msg_response: MessageResponse = response.json().await?;
        tracing::debug!(
            model = %msg_response.model,
            stop_reason = ?msg_response.stop_reason,
            input_tokens = msg_response.usage.input_tokens,
            output_tokens = msg_response.usage.output_tokens,
            "message completed"
        );

        let text = msg_response.text();
        if text.trim().is_empty() {
            return Err(ClaudeError::EmptyResponse {
                stop_reason: msg_response.stop_reason,
            });
        }

        let cost = model.cost(&msg_response.usage);
        Ok((text, msg_response.usage, cost))
    }
}

#[async_trait]
impl Generator for ClaudeClient {
    async fn generate(&self, request: GenerationRequest) -> Result<Generation, ClaudeError> {
        let messages = vec![Message::user(&request.prompt)];
        let (text, usage, cost) = self
            .send_message(&self.model, messages, Some(request.system), self.max_tokens)
            .await?;

        Ok(Generation { text, usage, cost })
    }
}
