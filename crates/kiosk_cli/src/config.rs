use kiosk_core::{Error, Result};
use std::env;

const DEFAULT_PORT: u16 = 8000;

/// Process configuration, read once at startup. A missing required variable
/// refuses to start the process instead of failing lazily mid-request.
#[derive(Debug, Clone)]
pub struct Config {
    pub news_api_key: String,
    pub jina_api_key: String,
    pub gemini_api_key: String,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub redis_url: String,
    pub port: u16,
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Config(format!("missing {} in environment", name)))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT value: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            news_api_key: required("NEWS_API_KEY")?,
            jina_api_key: required("JINA_API_KEY")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            qdrant_url: required("QDRANT_URL")?,
            qdrant_api_key: env::var("QDRANT_API_KEY").ok().filter(|v| !v.is_empty()),
            redis_url: required("REDIS_URL")?,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_empty() {
        // Env mutation is process-wide; use a name no other test touches.
        env::set_var("KIOSK_TEST_EMPTY_VAR", "");
        assert!(required("KIOSK_TEST_EMPTY_VAR").is_err());
        env::set_var("KIOSK_TEST_EMPTY_VAR", "value");
        assert_eq!(required("KIOSK_TEST_EMPTY_VAR").unwrap(), "value");
        env::remove_var("KIOSK_TEST_EMPTY_VAR");
    }

    #[test]
    fn test_missing_variable_is_a_config_error() {
        let err = required("KIOSK_TEST_MISSING_VAR").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
