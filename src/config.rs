use std::fs;
use std::path::{ Path, PathBuf };
use std::time::Duration;

use serde::{ Deserialize, Serialize };

use crate::implementations::config::{ ClientConfig, ConfigError };

pub const DEFAULT_HISTORY_PATH: &str = "mathsnap_history.json";
pub const DEFAULT_PROBE_URL: &str = "https://api.openai.com";

/// Configuration for the MathSnap workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MathSnapConfig {
    pub client: ClientConfig,
    /// JSON file holding solved equations
    pub history_path: PathBuf,
    pub connectivity: ConnectivityConfig,
}

/// How reachability is probed before a remote call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    pub probe_url: String,
    pub timeout_secs: u64,
}

impl ConnectivityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_url: DEFAULT_PROBE_URL.to_string(),
            timeout_secs: 5,
        }
    }
}

impl Default for MathSnapConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            connectivity: ConnectivityConfig::default(),
        }
    }
}

impl MathSnapConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: MathSnapConfig = serde_yaml::from_str(&contents)?;
        config.client.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
