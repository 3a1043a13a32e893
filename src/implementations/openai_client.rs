use std::time::Duration;

use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::Serialize;

use crate::implementations::config::ClientConfig;
use crate::models::image::ImagePayload;
use crate::traits::completion_client::{ ClientError, CompletionClient };

/// OpenAI chat-completions request types
#[derive(Debug, Serialize, Clone, PartialEq)]
struct ChatMessage {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text {
        text: String,
    },
    ImageUrl {
        image_url: ImageUrl,
    },
}

#[derive(Debug, Serialize, Clone, PartialEq)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// [`CompletionClient`] backed by an OpenAI-compatible chat-completions endpoint
///
/// The API key is resolved on every call (config first, then the
/// `MATHSNAP_API_KEY` / `OPENAI_API_KEY` environment variables), so a missing
/// key surfaces as a classified pipeline failure rather than a startup error.
#[derive(Clone)]
pub struct OpenAiClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let http_client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .map_err(|e| ClientError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http_client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn vision_request(&self, image: &ImagePayload) -> ChatRequest {
        ChatRequest {
            model: self.config.vision_model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: MessageContent::Parts(
                    vec![
                        ContentPart::Text {
                            text: self.config.vision_prompt.clone(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: image.data_url() },
                        }
                    ]
                ),
            }],
            max_tokens: self.config.vision_max_tokens,
            temperature: self.config.temperature,
        }
    }

    fn solution_request(&self, equation: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.solution_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(self.config.solution_system_prompt.clone()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Text(
                        format!("Please solve this equation step by step: {}", equation)
                    ),
                }
            ],
            max_tokens: self.config.solution_max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// POST a chat request and return the first choice's text, if any
    async fn call_chat_api(&self, request: &ChatRequest) -> Result<Option<String>, ClientError> {
        let api_key = self.config.get_api_key()?;
        let endpoint = self.config.endpoint();

        info!("Making chat completion request with model {}", request.model);
        debug!("API endpoint: {}", endpoint);
        debug!("Max tokens: {}", request.max_tokens);

        let mut request_builder = self.http_client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(request);

        if let Some(org) = &self.config.api.organization_id {
            request_builder = request_builder.header("OpenAI-Organization", org);
        }

        let response = request_builder.send().await.map_err(|e| {
            let error_msg = format!("Network error when calling chat API: {}", e);
            warn!("{}", error_msg);
            if e.is_timeout() {
                warn!("Request timed out");
            }
            if e.is_connect() {
                warn!("Connection error - check network connectivity");
            }
            ClientError::NetworkError(error_msg)
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(ClientError::HttpError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to read response body: {}", e);
            ClientError::NetworkError(e.to_string())
        })?;
        debug!("Response length: {} characters", response_text.len());

        let response_json: serde_json::Value = serde_json
            ::from_str(&response_text)
            .map_err(|e| {
                warn!("JSON parsing error: {}", e);
                ClientError::ParseError(format!("Invalid JSON response: {}", e))
            })?;

        if let Some(message) = response_json["error"]["message"].as_str() {
            warn!("API returned an error object: {}", message);
            return Err(ClientError::ApiError(message.to_string()));
        }

        let content = extract_message_content(&response_json);
        if content.is_none() {
            warn!("API response carried no message content");
        }
        Ok(content)
    }
}

/// Text of `choices[0].message.content`, when present and non-empty
fn extract_message_content(response: &serde_json::Value) -> Option<String> {
    response["choices"]
        .get(0)
        .and_then(|choice| choice["message"]["content"].as_str())
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn extract_equation(&self, image: &ImagePayload) -> Result<Option<String>, ClientError> {
        info!("Sending image ({} base64 characters) to vision model", image.data_base64.len());
        self.call_chat_api(&self.vision_request(image)).await
    }

    async fn request_solution(&self, equation: &str) -> Result<Option<String>, ClientError> {
        info!("Requesting solution for {}", equation);
        self.call_chat_api(&self.solution_request(equation)).await
    }
}
