//! Loading of feature collections from remote sources.

use async_trait::async_trait;
use thiserror::Error;
use wfs_map_types::FeatureCollection;

mod wfs_provider;

pub use wfs_provider::WfsProvider;

/// Outcome of one attempt to load features from a remote source.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionResult {
    /// A non-empty collection was loaded.
    Success(FeatureCollection),
    /// The response was a valid feature collection without usable features.
    EmptyResult,
    /// The server answered with a non-success status code.
    HttpError(u16),
    /// No response was received.
    NetworkError(String),
    /// The response body is not a feature collection.
    MalformedResponse,
}

impl AcquisitionResult {
    /// Converts the outcome into a `Result`. A `Success` with an empty collection is treated as
    /// [`AcquisitionError::Empty`].
    pub fn into_result(self) -> Result<FeatureCollection, AcquisitionError> {
        match self {
            AcquisitionResult::Success(collection) if !collection.is_empty() => Ok(collection),
            AcquisitionResult::Success(_) | AcquisitionResult::EmptyResult => {
                Err(AcquisitionError::Empty)
            }
            AcquisitionResult::HttpError(status) => Err(AcquisitionError::Http(status)),
            AcquisitionResult::NetworkError(message) => Err(AcquisitionError::Network(message)),
            AcquisitionResult::MalformedResponse => Err(AcquisitionError::Malformed),
        }
    }
}

/// Reason a remote load did not produce features. The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    /// See [`AcquisitionResult::EmptyResult`].
    #[error("WFS unavailable: no features in the server response")]
    Empty,
    /// See [`AcquisitionResult::HttpError`].
    #[error("WFS unavailable: server error {0}")]
    Http(u16),
    /// See [`AcquisitionResult::NetworkError`].
    #[error("WFS unavailable: network failure: {0}")]
    Network(String),
    /// See [`AcquisitionResult::MalformedResponse`].
    #[error("WFS unavailable: response is not a valid feature collection")]
    Malformed,
}

/// Source of remote feature collections.
///
/// Implementations make a single attempt per call and never mutate shared state: the outcome is returned, it is up
/// to the caller to apply it.
#[async_trait]
pub trait FeatureProvider {
    /// Loads features from the given endpoint.
    async fn fetch_features(&self, endpoint: &str) -> AcquisitionResult;
}
