use crate::errors::{ ClassifiedError, ErrorCode };
use crate::implementations::config::ConfigError;
use crate::traits::completion_client::ClientError;

/// Phrases a vision model uses when it finds no equation (matched lowercase)
pub const NO_EQUATION_PHRASES: &[&str] = &[
    "cannot see",
    "can't see",
    "no equation",
    "unable to extract",
    "unable to read",
    "not able to see",
    "no mathematical equation",
    "does not contain",
    "doesn't contain",
];

const AUTH_INDICATORS: &[&str] = &[
    "401",
    "invalid api key",
    "incorrect api key",
    "invalid_api_key",
    "unauthorized",
];

const RATE_LIMIT_INDICATORS: &[&str] = &["429", "rate limit", "rate_limit", "too many requests"];

const NETWORK_INDICATORS: &[&str] = &["network", "connection", "timed out", "timeout", "dns"];

/// Any failure raised inside a pipeline, before it reaches the caller
#[derive(Debug)]
pub enum Failure {
    /// Already carries its code and is passed through unchanged
    Classified(ClassifiedError),
    Client(ClientError),
}

impl From<ClassifiedError> for Failure {
    fn from(err: ClassifiedError) -> Self {
        Failure::Classified(err)
    }
}

impl From<ClientError> for Failure {
    fn from(err: ClientError) -> Self {
        Failure::Client(err)
    }
}

/// Assign exactly one code to a failure. Total: unmatched input is `UNKNOWN_ERROR`.
pub fn classify(failure: Failure) -> ClassifiedError {
    match failure {
        Failure::Classified(err) => err,
        Failure::Client(err) => classify_client_error(err),
    }
}

fn classify_client_error(err: ClientError) -> ClassifiedError {
    let code = match &err {
        ClientError::ConfigError(ConfigError::MissingApiKey(_)) => ErrorCode::InvalidApiKey,
        ClientError::ConfigError(_) => ErrorCode::UnknownError,
        ClientError::NetworkError(_) => ErrorCode::NetworkError,
        ClientError::HttpError { status: 401 | 403, .. } => ErrorCode::InvalidApiKey,
        ClientError::HttpError { status: 429, .. } => ErrorCode::RateLimit,
        ClientError::HttpError { message, .. } => code_from_message(message),
        ClientError::ParseError(_) => ErrorCode::UnknownError,
        ClientError::ApiError(message) => code_from_message(message),
    };
    ClassifiedError::new(code, user_message(code, &err.to_string()))
}

/// Match indicator substrings, most specific first
pub fn code_from_message(message: &str) -> ErrorCode {
    let lower = message.to_lowercase();
    let contains_any = |needles: &[&str]| needles.iter().any(|n| contains_indicator(&lower, n));

    if contains_any(AUTH_INDICATORS) {
        ErrorCode::InvalidApiKey
    } else if contains_any(RATE_LIMIT_INDICATORS) {
        ErrorCode::RateLimit
    } else if contains_any(NETWORK_INDICATORS) {
        ErrorCode::NetworkError
    } else {
        ErrorCode::UnknownError
    }
}

/// Numeric indicators only match as whole numbers, so `401` is not found
/// inside a request id such as `74012`
fn contains_indicator(haystack: &str, needle: &str) -> bool {
    if !needle.bytes().all(|b| b.is_ascii_digit()) {
        return haystack.contains(needle);
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric()) &&
            !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}

/// True when a vision reply says there is no equation to read
pub fn is_no_equation_reply(text: &str) -> bool {
    let lower = text.to_lowercase();
    NO_EQUATION_PHRASES.iter().any(|p| lower.contains(p))
}

fn user_message(code: ErrorCode, detail: &str) -> String {
    match code {
        ErrorCode::InvalidApiKey => "Invalid API key. Please check your configuration.".to_string(),
        ErrorCode::RateLimit => "Too many requests. Please try again later.".to_string(),
        ErrorCode::NetworkError => "Network error. Please check your connection.".to_string(),
        _ if detail.trim().is_empty() => "An unexpected error occurred".to_string(),
        _ => detail.to_string(),
    }
}
