//! Provides platform specific logic and [`PlatformService`] to access it.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::MapError;

mod native;

pub use native::NativePlatformService;

/// HTTP GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Full url including query parameters.
    pub url: String,
    /// Additional request headers.
    pub headers: Vec<(String, String)>,
}

/// Response of the server, whatever its status is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns true for `2xx` status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Service that performs HTTP requests for the crate.
///
/// Implementations return `Ok` for any response received from the server, including error statuses, and
/// [`MapError::Network`] only when no response was received at all.
#[async_trait]
pub trait PlatformService {
    /// Sends a GET request.
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, MapError>;
}
