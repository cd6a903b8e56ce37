use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables the model-assisted keyword path. The deterministic vocabulary
    /// fallback is always available regardless of this flag.
    pub enable_llm_keywords: bool,
    pub anthropic_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let enable_llm_keywords = std::env::var("ENABLE_LLM_KEYWORDS")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").ok();

        ensure!(
            !enable_llm_keywords || anthropic_api_key.is_some(),
            "ENABLE_LLM_KEYWORDS is set but ANTHROPIC_API_KEY is missing"
        );

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            enable_llm_keywords,
            anthropic_api_key,
        })
    }
}
