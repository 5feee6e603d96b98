//! Connector settings and validation.

use std::time::Duration;
use thiserror::Error;

/// Service API version the REST provider speaks by default.
pub const DEFAULT_API_VERSION: &str = "2021-04-30-Preview";

/// Per-request timeout; the connector enforces nothing beyond this.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required connector setting `{0}` is missing or empty")]
    MissingSetting(&'static str),
    #[error("failed to build the HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Options for the underlying REST client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub api_version: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Immutable connection settings held for the connector's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSettings {
    /// Service endpoint, e.g. `https://myservice.search.windows.net`.
    pub endpoint: String,
    /// Query API key sent with every request.
    pub query_key: String,
    /// Name of the index to query.
    pub index_name: String,
    pub options: ClientOptions,
}

impl ConnectorSettings {
    pub fn new(
        endpoint: impl Into<String>,
        query_key: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            query_key: query_key.into(),
            index_name: index_name.into(),
            options: ClientOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Read settings from the environment: `AZS_ENDPOINT`, `AZS_QUERY_KEY`,
    /// `AZS_INDEX`, plus optional `AZS_API_VERSION` and `AZS_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint =
            dotenvy::var("AZS_ENDPOINT").map_err(|_| ConfigError::MissingSetting("endpoint"))?;
        let query_key =
            dotenvy::var("AZS_QUERY_KEY").map_err(|_| ConfigError::MissingSetting("query_key"))?;
        let index_name =
            dotenvy::var("AZS_INDEX").map_err(|_| ConfigError::MissingSetting("index_name"))?;

        let mut settings = Self::new(endpoint, query_key, index_name);
        if let Ok(version) = dotenvy::var("AZS_API_VERSION") {
            settings.options.api_version = version;
        }
        if let Ok(value) = dotenvy::var("AZS_TIMEOUT_MS")
            && let Ok(ms) = value.parse::<u64>()
        {
            settings.options.timeout = Duration::from_millis(ms);
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Every required setting must be present and non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingSetting("endpoint"));
        }
        if self.query_key.trim().is_empty() {
            return Err(ConfigError::MissingSetting("query_key"));
        }
        if self.index_name.trim().is_empty() {
            return Err(ConfigError::MissingSetting("index_name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ConnectorSettings {
        ConnectorSettings::new("https://svc.search.windows.net", "key", "idx")
    }

    #[test]
    fn complete_settings_validate() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn each_required_setting_is_checked() {
        for (field, broken) in [
            ("endpoint", ConnectorSettings::new("", "key", "idx")),
            ("query_key", ConnectorSettings::new("https://svc", "", "idx")),
            ("index_name", ConnectorSettings::new("https://svc", "key", " ")),
        ] {
            match broken.validate() {
                Err(ConfigError::MissingSetting(name)) => assert_eq!(name, field),
                other => panic!("expected missing `{field}`, got {other:?}"),
            }
        }
    }

    #[test]
    fn default_options_carry_api_version_and_timeout() {
        let options = ClientOptions::default();
        assert_eq!(options.api_version, DEFAULT_API_VERSION);
        assert_eq!(options.timeout, Duration::from_secs(10));
    }
}
