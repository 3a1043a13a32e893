use async_trait::async_trait;
use thiserror::Error;

use crate::implementations::config::ConfigError;
use crate::models::image::ImagePayload;

/// Low-level failure from a remote completion call, before classification
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")] ConfigError(#[from] ConfigError),

    #[error("Network error: {0}")] NetworkError(String),

    #[error("HTTP error: {status} - {message}")] HttpError {
        status: u16,
        message: String,
    },

    #[error("Failed to parse API response: {0}")] ParseError(String),

    #[error("API error: {0}")] ApiError(String),
}

/// Remote model calls used by the solving pipeline.
///
/// Both calls return `Ok(None)` when the service answered but produced no
/// content; that case is distinct from a transport or API failure.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Ask a vision model to read the equation in `image`
    async fn extract_equation(&self, image: &ImagePayload) -> Result<Option<String>, ClientError>;

    /// Ask a text model for a step-by-step solution of `equation`
    async fn request_solution(&self, equation: &str) -> Result<Option<String>, ClientError>;
}
