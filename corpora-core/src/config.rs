use std::env;

/// Load .env file if it exists (called automatically when using `from_env`)
pub fn load_dotenv() {
    // Silently ignore errors (file might not exist)
    let _ = dotenvy::dotenv();
}

/// Connector configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Dify dataset API, e.g. `https://api.dify.ai/v1`
    pub api_url: String,
    /// Bearer token for the Dify dataset API
    pub api_key: String,
    /// Per-knowledge-base result budget (default: 10)
    pub page_size: usize,
    /// Maximum number of knowledge bases queried per call (default: 10)
    pub max_knowledge_bases: usize,
    /// Maximum number of in-flight source queries during fan-out (default: 4)
    pub fanout_concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function automatically loads a .env file from the project root if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from env without loading .env
    fn from_env_inner() -> Result<Self, ConfigError> {
        let api_url = env::var("DIFY_API_URL")
            .map_err(|_| ConfigError::MissingVar("DIFY_API_URL".to_string()))?;
        let api_key = env::var("DIFY_API_KEY")
            .map_err(|_| ConfigError::MissingVar("DIFY_API_KEY".to_string()))?;

        Ok(Self {
            api_url,
            api_key,
            page_size: env::var("DIFY_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_knowledge_bases: env::var("DIFY_MAX_KNOWLEDGE_BASES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            fanout_concurrency: env::var("DIFY_FANOUT_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
}
