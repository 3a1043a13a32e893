use serde::{ Deserialize, Serialize };
use thiserror::Error;

/// Environment variables checked for an API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["MATHSNAP_API_KEY", "OPENAI_API_KEY"];

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// API key for the completion service
    pub api_key: Option<String>,

    /// Chat-completions endpoint
    pub api_endpoint: Option<String>,

    /// Organization ID (if applicable)
    pub organization_id: Option<String>,
}

/// Settings for the two completion calls made per pipeline
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,

    /// Vision-capable model used to read the equation off the image
    pub vision_model: String,

    /// Text model used to produce the step-by-step solution
    pub solution_model: String,

    pub vision_max_tokens: usize,

    pub solution_max_tokens: usize,

    /// Sampling temperature; omitted from requests when unset
    pub temperature: Option<f32>,

    /// Transport timeout for each remote call
    pub request_timeout_secs: u64,

    /// Instruction sent alongside the image
    pub vision_prompt: String,

    /// System prompt for the tutoring call
    pub solution_system_prompt: String,
}

impl ClientConfig {
    /// Get the API key, checking environment variables if not in config
    pub fn get_api_key(&self) -> Result<String, ConfigError> {
        use log::debug;

        if let Some(api_key) = self.api.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            debug!("Using API key from config");
            return Ok(api_key.clone());
        }

        for env_var in API_KEY_ENV_VARS {
            match std::env::var(env_var) {
                Ok(key) if !key.trim().is_empty() => {
                    debug!("Using API key from {}", env_var);
                    return Ok(key);
                }
                _ => {
                    debug!("{} not set", env_var);
                }
            }
        }

        Err(
            ConfigError::MissingApiKey(
                format!("set api.api_key or one of {}", API_KEY_ENV_VARS.join(", "))
            )
        )
    }

    pub fn endpoint(&self) -> &str {
        self.api.api_endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Reject settings that would make every request fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vision_model.trim().is_empty() || self.solution_model.trim().is_empty() {
            return Err(ConfigError::Invalid("model names cannot be empty".to_string()));
        }
        if self.vision_max_tokens == 0 || self.solution_max_tokens == 0 {
            return Err(ConfigError::Invalid("max token limits must be positive".to_string()));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::Invalid(format!("temperature {} out of range", t)));
            }
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api: ApiConfig {
                api_key: None,
                api_endpoint: Some(DEFAULT_ENDPOINT.to_string()),
                organization_id: None,
            },
            vision_model: "gpt-4o-mini".to_string(),
            solution_model: "gpt-4".to_string(),
            vision_max_tokens: 100,
            solution_max_tokens: 1000,
            temperature: None,
            request_timeout_secs: 120,
            vision_prompt: "This image contains a mathematical equation. Please extract and return ONLY the equation in LaTeX format, nothing else. For example, if you see 'y² = 16', return '$y^2 = 16$'.".to_string(),
            solution_system_prompt: r#"You are a clear and concise math tutor. When solving equations:
1. Break the solution into short, clear steps
2. For each step:
   - Use 1-2 short sentences to explain the concept
   - Show the equation
   - Keep explanations brief but clear
3. Use LaTeX formatting for equations (enclosed in $ signs)
4. When using special symbols like ±, use proper LaTeX notation (\pm)
5. Format your response in this exact structure:

STEP 1: [One clear sentence about what we're doing] $[equation]$

STEP 2: [One clear sentence about what we're doing] $[equation]$
...
FINAL ANSWER: [Brief explanation] $[answer]$

Example of good explanation:
"STEP 1: Apply the quadratic formula $x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}$""#.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: ClientConfig = serde_yaml
            ::from_str("solution_model: gpt-4o\napi:\n  api_key: sk-test\n")
            .unwrap();
        assert_eq!(config.solution_model, "gpt-4o");
        assert_eq!(config.vision_model, "gpt-4o-mini");
        assert_eq!(config.solution_max_tokens, 1000);
        assert_eq!(config.get_api_key().unwrap(), "sk-test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_token_limit() {
        let mut config = ClientConfig::default();
        config.vision_max_tokens = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn endpoint_falls_back_to_default() {
        let mut config = ClientConfig::default();
        config.api.api_endpoint = None;
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
    }
}
