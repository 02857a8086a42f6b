use async_trait::async_trait;
use log::{debug, info};

use crate::config::WfsConfig;
use crate::error::MapError;
use crate::platform::{HttpRequest, HttpResponse, PlatformService};

/// [`PlatformService`] implementation backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct NativePlatformService {
    http_client: reqwest::Client,
}

impl NativePlatformService {
    /// Creates a new instance with the user agent and the timeout from the config.
    pub fn new(config: &WfsConfig) -> Result<Self, MapError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|err| MapError::Config(format!("failed to create http client: {err}")))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl PlatformService for NativePlatformService {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, MapError> {
        debug!("GET {}", request.url);

        let mut builder = self.http_client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = if status.is_success() {
            response.bytes().await?
        } else {
            info!("Failed to load {}: {status}", request.url);
            // Only the status of an error response is used.
            response.bytes().await.unwrap_or_default()
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
