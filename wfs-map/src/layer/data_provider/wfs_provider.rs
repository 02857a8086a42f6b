use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use maybe_sync::{MaybeSend, MaybeSync};
use wfs_map_types::geojson::parse_feature_collection;
use wfs_map_types::Provenance;

use crate::config::WfsConfig;
use crate::error::MapError;
use crate::layer::data_provider::{AcquisitionResult, FeatureProvider};
use crate::platform::{HttpRequest, HttpResponse, NativePlatformService, PlatformService};

/// Loads features with a WFS 1.0.0 `GetFeature` request asking for GeoJSON output.
pub struct WfsProvider<Service = NativePlatformService> {
    platform_service: Service,
    type_name: String,
    max_features: u32,
    authorization: String,
}

impl WfsProvider<NativePlatformService> {
    /// Creates a new provider that uses `reqwest` for requests.
    pub fn new(config: &WfsConfig) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Self::with_service(config, NativePlatformService::new(config)?))
    }
}

impl<Service> WfsProvider<Service> {
    /// Creates a new provider that sends requests through the given service.
    pub fn with_service(config: &WfsConfig, platform_service: Service) -> Self {
        let credentials = format!("{}:{}", config.username, config.password);
        Self {
            platform_service,
            type_name: config.type_name.clone(),
            max_features: config.max_features,
            authorization: format!("Basic {}", STANDARD.encode(credentials)),
        }
    }

    /// Full `GetFeature` url for the given service endpoint.
    pub fn request_url(&self, endpoint: &str) -> String {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{endpoint}{separator}service=WFS&version=1.0.0&request=GetFeature&typeName={}&maxFeatures={}&outputFormat=application/json",
            self.type_name, self.max_features
        )
    }

    /// Value of the `Authorization` header sent with every request.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    fn request(&self, endpoint: &str) -> HttpRequest {
        HttpRequest {
            url: self.request_url(endpoint),
            headers: vec![("Authorization".to_owned(), self.authorization.clone())],
        }
    }
}

fn classify(response: HttpResponse) -> AcquisitionResult {
    if !response.is_success() {
        return AcquisitionResult::HttpError(response.status);
    }

    match parse_feature_collection(&response.body, Provenance::Remote) {
        Ok(collection) if collection.is_empty() => AcquisitionResult::EmptyResult,
        Ok(collection) => AcquisitionResult::Success(collection),
        Err(err) => {
            log::warn!("Failed to decode WFS response: {err}");
            AcquisitionResult::MalformedResponse
        }
    }
}

#[async_trait]
impl<Service> FeatureProvider for WfsProvider<Service>
where
    Service: PlatformService + MaybeSend + MaybeSync,
{
    async fn fetch_features(&self, endpoint: &str) -> AcquisitionResult {
        let request = self.request(endpoint);
        log::info!("Loading WFS features from {}", request.url);

        let result = match self.platform_service.get(request).await {
            Ok(response) => classify(response),
            Err(MapError::Network(message)) => AcquisitionResult::NetworkError(message),
            Err(err) => AcquisitionResult::NetworkError(err.to_string()),
        };

        match &result {
            AcquisitionResult::Success(collection) => {
                log::info!("Loaded {} features from {endpoint}", collection.len())
            }
            other => log::warn!("Failed to load features from {endpoint}: {other:?}"),
        }

        result
    }
}
