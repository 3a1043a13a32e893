use std::fmt;

use serde::{ Deserialize, Serialize };
use thiserror::Error;

/// Closed set of failure codes surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoInternet,
    InvalidApiKey,
    RateLimit,
    NetworkError,
    ExtractionFailed,
    SolutionFailed,
    InvalidSolution,
    UnknownError,
}

impl ErrorCode {
    /// Every code, in display order
    pub const ALL: [ErrorCode; 8] = [
        ErrorCode::NoInternet,
        ErrorCode::InvalidApiKey,
        ErrorCode::RateLimit,
        ErrorCode::NetworkError,
        ErrorCode::ExtractionFailed,
        ErrorCode::SolutionFailed,
        ErrorCode::InvalidSolution,
        ErrorCode::UnknownError,
    ];

    /// Wire name of the code, e.g. `NO_INTERNET`
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoInternet => "NO_INTERNET",
            ErrorCode::InvalidApiKey => "INVALID_API_KEY",
            ErrorCode::RateLimit => "RATE_LIMIT",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ExtractionFailed => "EXTRACTION_FAILED",
            ErrorCode::SolutionFailed => "SOLUTION_FAILED",
            ErrorCode::InvalidSolution => "INVALID_SOLUTION",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Follow-up advice shown under the error message
    pub fn user_hint(&self) -> Option<&'static str> {
        match self {
            ErrorCode::NoInternet => Some("Please check your internet connection and try again."),
            ErrorCode::InvalidApiKey => Some("Please check your API key configuration."),
            ErrorCode::RateLimit => Some("Please wait a moment before trying again."),
            ErrorCode::NetworkError =>
                Some("The service could not be reached. Please try again."),
            ErrorCode::ExtractionFailed =>
                Some("Please try taking a clearer picture of the equation."),
            ErrorCode::SolutionFailed =>
                Some("We couldn't generate a solution. Please try again."),
            ErrorCode::InvalidSolution =>
                Some("The solution generated was invalid. Please try again."),
            ErrorCode::UnknownError => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure that has been assigned exactly one [`ErrorCode`].
///
/// Created where the failure is first detected and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ClassifiedError {
    pub message: String,
    pub code: ErrorCode,
}

impl ClassifiedError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub fn no_internet() -> Self {
        Self::new(
            ErrorCode::NoInternet,
            "No internet connection. Please check your connection and try again."
        )
    }

    pub fn extraction_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExtractionFailed, message)
    }

    pub fn solution_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SolutionFailed, message)
    }

    pub fn invalid_solution(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSolution, message)
    }
}

/// Result type for the solving pipeline
pub type MathSnapResult<T> = Result<T, ClassifiedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_names_match_serde() {
        for code in ErrorCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn only_unknown_has_no_hint() {
        for code in ErrorCode::ALL {
            assert_eq!(code.user_hint().is_none(), code == ErrorCode::UnknownError);
        }
    }
}
