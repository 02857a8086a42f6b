//! Error types used by the crate.

use thiserror::Error;

/// Error of the map controller infrastructure.
///
/// Failures to load features from a WFS server are not reported through this type: they are classified into
/// [`AcquisitionResult`](crate::layer::data_provider::AcquisitionResult) and handled by falling back to the demo
/// dataset.
#[derive(Debug, Error)]
pub enum MapError {
    /// The request could not complete: DNS failure, refused connection, timeout etc.
    #[error("network error: {0}")]
    Network(String),
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for MapError {
    fn from(value: reqwest::Error) -> Self {
        let message = if value.is_timeout() {
            format!("request timed out: {value}")
        } else if value.is_connect() {
            format!("connection failed: {value}")
        } else {
            value.to_string()
        };

        Self::Network(message)
    }
}
