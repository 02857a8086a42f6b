//! Configuration of the WFS data source.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://gs-stg.politerm.com/geoserver/term/wfs";
/// Feature type requested from the server by default.
pub const DEFAULT_TYPE_NAME: &str = "term:oktmo";
/// Default maximum number of features in one response.
pub const DEFAULT_MAX_FEATURES: u32 = 100;

/// How the controller treats load requests that overlap in time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOrdering {
    /// Every load gets an increasing request id. A result is applied only if it belongs to the latest issued
    /// request, results of older requests are discarded.
    #[default]
    LatestRequest,
    /// Results are applied in the order they complete, so a slow stale request can overwrite a newer result.
    LastCompleted,
}

/// Settings of the WFS server connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WfsConfig {
    /// Base url of the WFS service, without query parameters.
    pub endpoint: String,
    /// Name of the feature type to request.
    pub type_name: String,
    /// Maximum number of features to request.
    pub max_features: u32,
    /// User name for basic authentication.
    pub username: String,
    /// Password for basic authentication.
    pub password: String,
    /// Request timeout in milliseconds. `None` leaves the transport default (no timeout).
    pub request_timeout_ms: Option<u64>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Policy for overlapping loads.
    pub load_ordering: LoadOrdering,
}

impl Default for WfsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            type_name: DEFAULT_TYPE_NAME.to_owned(),
            max_features: DEFAULT_MAX_FEATURES,
            username: "mo".to_owned(),
            password: "mo".to_owned(),
            request_timeout_ms: None,
            user_agent: concat!("wfs-map/", env!("CARGO_PKG_VERSION")).to_owned(),
            load_ordering: LoadOrdering::default(),
        }
    }
}

impl WfsConfig {
    /// Reads the configuration from a JSON document. Missing fields get their default values.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| MapError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values can be used to build requests.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.type_name.trim().is_empty() {
            return Err(MapError::Config("type name must not be empty".into()));
        }

        if self.max_features == 0 {
            return Err(MapError::Config("max features must be positive".into()));
        }

        Ok(())
    }

    /// Request timeout, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Creates a new instance from a copy of the current, but with the given endpoint.
    pub fn with_endpoint(self, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given feature type.
    pub fn with_type_name(self, type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given feature limit.
    pub fn with_max_features(self, max_features: u32) -> Self {
        Self {
            max_features,
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given credentials.
    pub fn with_credentials(
        self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given request timeout.
    pub fn with_request_timeout(self, timeout: Duration) -> Self {
        Self {
            request_timeout_ms: Some(timeout.as_millis() as u64),
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given load ordering policy.
    pub fn with_load_ordering(self, load_ordering: LoadOrdering) -> Self {
        Self {
            load_ordering,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_from_empty_json() {
        let config = WfsConfig::from_json_str("{}").expect("valid config");
        assert_eq!(config, WfsConfig::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.max_features, 100);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn partial_json() {
        let config = WfsConfig::from_json_str(
            r#"{"type_name": "topp:states", "request_timeout_ms": 1500, "load_ordering": "last_completed"}"#,
        )
        .expect("valid config");

        assert_eq!(config.type_name, "topp:states");
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.load_ordering, LoadOrdering::LastCompleted);
        assert_eq!(config.username, "mo");
    }

    #[test]
    fn invalid_config() {
        assert_matches!(
            WfsConfig::from_json_str(r#"{"max_features": 0}"#),
            Err(MapError::Config(_))
        );
        assert_matches!(
            WfsConfig::from_json_str(r#"{"max_features": "many"}"#),
            Err(MapError::Config(_))
        );
    }
}
