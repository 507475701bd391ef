use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "https://api.anthropic.com";
const MAX_LLM_RETRIES: u32 = 5;

/// Application configuration loaded from environment variables.
/// Startup fails if the API key is missing.
#[derive(Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    pub llm_max_retries: u32,
    pub llm_retry_delay_ms: u64,
    pub session_idle_ttl_secs: u64,
    pub session_sweep_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("anthropic_api_key", &"[REDACTED]")
            .field("anthropic_api_url", &self.anthropic_api_url)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("llm_max_retries", &self.llm_max_retries)
            .field("llm_retry_delay_ms", &self.llm_retry_delay_ms)
            .field("session_idle_ttl_secs", &self.session_idle_ttl_secs)
            .field("session_sweep_secs", &self.session_sweep_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let anthropic_api_key = require_env("ANTHROPIC_API_KEY")
            .or_else(|_| require_env("CLAUDE_API_KEY"))
            .context("Set ANTHROPIC_API_KEY (or CLAUDE_API_KEY) to your Anthropic API key")?;

        Ok(Config {
            anthropic_api_key,
            anthropic_api_url: std::env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 30)
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            llm_max_retries: parse_env::<u32>("LLM_MAX_RETRIES", 1)
                .context("LLM_MAX_RETRIES must be a non-negative integer")?
                .min(MAX_LLM_RETRIES),
            llm_retry_delay_ms: parse_env("LLM_RETRY_DELAY_MS", 1000)
                .context("LLM_RETRY_DELAY_MS must be a whole number of milliseconds")?,
            session_idle_ttl_secs: parse_env("SESSION_IDLE_TTL_SECS", 3600)
                .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?,
            session_sweep_secs: parse_env::<u64>("SESSION_SWEEP_SECS", 60)
                .context("SESSION_SWEEP_SECS must be a whole number of seconds")?
                .max(1),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value '{raw}' for '{key}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_padded_numbers() {
        let port: u16 = parse_value("PORT", " 9090 ").unwrap();
        assert_eq!(port, 9090);
    }

    #[test]
    fn test_parse_value_rejects_out_of_range_port() {
        let err = parse_value::<u16>("PORT", "70000").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            anthropic_api_key: "sk-ant-secret".to_string(),
            anthropic_api_url: DEFAULT_API_URL.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            llm_timeout_secs: 30,
            llm_max_retries: 1,
            llm_retry_delay_ms: 1000,
            session_idle_ttl_secs: 3600,
            session_sweep_secs: 60,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-ant-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
