use crate::{ConfigError, FromEnv};
use std::env;

/// Cross-origin policy for the HTTP API.
///
/// `CORS_ALLOWED_ORIGIN` holds a comma-separated list of origins. When the
/// variable is absent every origin is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CorsConfig {
    #[default]
    AnyOrigin,
    Origins(Vec<String>),
}

impl CorsConfig {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "at least one origin is required when the variable is set".to_string(),
            });
        }

        if let Some(bad) = origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: format!("'{}' is not an http(s) origin", bad),
            });
        }

        Ok(CorsConfig::Origins(origins))
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        match env::var("CORS_ALLOWED_ORIGIN") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(CorsConfig::AnyOrigin),
        }
    }
}
