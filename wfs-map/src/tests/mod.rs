use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::MapError;
use crate::platform::{HttpRequest, HttpResponse, PlatformService};

pub(crate) const THREE_POLYGONS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "id": "oktmo.1", "geometry": {"type": "Polygon", "coordinates": [[[30, 50], [31, 50], [31, 51], [30, 50]]]}, "properties": {"name": "A"}},
        {"type": "Feature", "id": "oktmo.2", "geometry": {"type": "Polygon", "coordinates": [[[32, 50], [33, 50], [33, 51], [32, 50]]]}, "properties": {"name": "B"}},
        {"type": "Feature", "id": "oktmo.3", "geometry": {"type": "Polygon", "coordinates": [[[34, 50], [35, 50], [35, 51], [34, 50]]]}, "properties": {"name": "C"}}
    ]
}"#;

pub(crate) const ONE_POINT: &str = r#"{
    "features": [
        {"id": "p", "geometry": {"type": "Point", "coordinates": [37.6, 55.7]}, "properties": {"name": "P"}}
    ]
}"#;

/// Platform service that answers from a fixed table and records the requests it receives.
///
/// Endpoints are matched by the url part before `?`. Unknown endpoints fail with a network error. A gated endpoint
/// does not answer until the sender returned by [`StubService::gate`] is used or dropped.
#[derive(Default)]
pub(crate) struct StubService {
    responses: HashMap<String, Result<HttpResponse, String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    pub(crate) requests: Mutex<Vec<HttpRequest>>,
}

impl StubService {
    pub(crate) fn respond(mut self, endpoint: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            endpoint.to_owned(),
            Ok(HttpResponse {
                status,
                body: Bytes::from(body.to_owned()),
            }),
        );
        self
    }

    pub(crate) fn fail(mut self, endpoint: &str, message: &str) -> Self {
        self.responses
            .insert(endpoint.to_owned(), Err(message.to_owned()));
        self
    }

    pub(crate) fn gate(self, endpoint: &str) -> (Self, oneshot::Sender<()>) {
        let (sender, receiver) = oneshot::channel();
        self.gates.lock().insert(endpoint.to_owned(), receiver);
        (self, sender)
    }
}

#[async_trait]
impl PlatformService for StubService {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, MapError> {
        let endpoint = request
            .url
            .split('?')
            .next()
            .unwrap_or_default()
            .to_owned();
        self.requests.lock().push(request);

        let gate = self.gates.lock().remove(&endpoint);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        match self.responses.get(&endpoint) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(MapError::Network(message.clone())),
            None => Err(MapError::Network(format!("connection refused: {endpoint}"))),
        }
    }
}
