use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://graph.threads.net";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub access_token: Option<String>,
    /// Label used in log lines only.
    pub username: String,
    pub days: u32,
    pub api_base_url: String,
    pub pacing_interval_ms: u64,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            username: "Unknown".to_string(),
            days: 7,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            pacing_interval_ms: 500,
            log_filter: "info".to_string(),
        }
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("days", &self.days)
            .field("api_base_url", &self.api_base_url)
            .field("pacing_interval_ms", &self.pacing_interval_ms)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.access_token()?;

        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url".to_string(),
                value: self.api_base_url.clone(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_filter".to_string(),
                value: self.log_filter.clone(),
            });
        }
        Ok(())
    }

    pub fn access_token(&self) -> Result<&str, ConfigError> {
        match self.access_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ConfigError::MissingField {
                field: "access_token".to_string(),
            }),
        }
    }

    pub fn pacing_interval(&self) -> Duration {
        Duration::from_millis(self.pacing_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.username, "Unknown");
        assert_eq!(config.days, 7);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.pacing_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            access_token = "abc"
            days = 14
            "#,
        )
        .unwrap();

        assert_eq!(config.access_token().unwrap(), "abc");
        assert_eq!(config.days, 14);
        assert_eq!(config.username, "Unknown");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let config = AppConfig {
            access_token: Some("   ".to_string()),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { field }) if field == "access_token"
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = AppConfig {
            access_token: Some("secret-token".to_string()),
            ..AppConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml_str("days = \"seven\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
