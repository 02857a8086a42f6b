//! Immutable snapshots of the controller state and the transition function between them.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use wfs_map_types::FeatureCollection;

use crate::config::LoadOrdering;
use crate::layer::data_provider::{AcquisitionError, AcquisitionResult};
use crate::layer::demo::shared_demo_data;
use crate::layer::{FeatureLayer, FeatureStore};

/// Which dataset the feature layer shows.
///
/// The value is set by the controller on every transition and is never derived from the data itself.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveLayerState {
    /// The bundled demo dataset.
    #[default]
    Demo,
    /// Features loaded from the WFS server.
    Remote,
}

impl ActiveLayerState {
    /// Text of the data source badge.
    pub fn badge_text(&self) -> &'static str {
        match self {
            ActiveLayerState::Demo => "Demo data",
            ActiveLayerState::Remote => "WFS server",
        }
    }

    /// Label of the data kind in the info panel.
    pub fn data_kind_label(&self) -> &'static str {
        match self {
            ActiveLayerState::Demo => "Demonstration",
            ActiveLayerState::Remote => "Live WFS data",
        }
    }
}

/// How the demo dataset became active.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemoOrigin {
    /// The user asked for the demo data.
    Requested,
    /// A remote load failed.
    Fallback,
}

/// Sequence number of a load request. Every started load gets a number greater than all previous ones.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RequestId(u64);

impl RequestId {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stage of the load cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing was loaded yet.
    #[default]
    Idle,
    /// A load is in progress. The previous dataset stays visible.
    Loading {
        /// Id of the request.
        request: RequestId,
        /// Endpoint the features are requested from.
        endpoint: String,
    },
    /// A dataset is displayed.
    Ready(ActiveLayerState),
}

/// Input of [`MapState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A load from the given endpoint was started.
    LoadStarted {
        /// Candidate endpoint url.
        endpoint: String,
    },
    /// A load finished with the given result.
    LoadFinished {
        /// Id the load got when it was started.
        request: RequestId,
        /// Outcome of the load.
        result: AcquisitionResult,
    },
    /// The user asked to show the demo data.
    DemoRequested,
}

/// Information for the UI shell around the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    /// Text of the data source badge.
    pub badge_text: &'static str,
    /// Label of the data kind.
    pub data_kind_label: &'static str,
    /// Number of features on the map.
    pub feature_count: usize,
    /// A load is in progress.
    pub loading: bool,
    /// Error to show in the error panel.
    pub error_message: Option<String>,
    /// The demo notice should be shown.
    pub show_demo_notice: bool,
}

/// Snapshot of the controller state.
///
/// A snapshot never changes. [`MapState::apply`] creates the next snapshot from the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    phase: LoadPhase,
    active_layer: ActiveLayerState,
    store: FeatureStore,
    error: Option<AcquisitionError>,
    demo_origin: Option<DemoOrigin>,
    last_request: RequestId,
    ordering: LoadOrdering,
    sequence: u64,
}

impl Default for MapState {
    fn default() -> Self {
        Self::new(LoadOrdering::default())
    }
}

impl MapState {
    /// Initial state: nothing loaded, nothing loading.
    pub fn new(ordering: LoadOrdering) -> Self {
        Self {
            phase: LoadPhase::Idle,
            active_layer: ActiveLayerState::default(),
            store: FeatureStore::new(),
            error: None,
            demo_origin: None,
            last_request: RequestId::default(),
            ordering,
            sequence: 0,
        }
    }

    /// Computes the state after the transition.
    ///
    /// Returns `None` if the transition does not change anything, which is the case for a result of a stale load
    /// under [`LoadOrdering::LatestRequest`].
    pub fn apply(&self, transition: Transition) -> Option<MapState> {
        let next = self.next_state(transition)?;
        Some(Self {
            sequence: self.sequence + 1,
            ..next
        })
    }

    fn next_state(&self, transition: Transition) -> Option<MapState> {
        match transition {
            Transition::LoadStarted { endpoint } => {
                let request = self.last_request.next();
                debug!("Load {request} started for {endpoint}");

                Some(Self {
                    phase: LoadPhase::Loading { request, endpoint },
                    last_request: request,
                    ..self.clone()
                })
            }
            Transition::LoadFinished { request, result } => {
                if self.ordering == LoadOrdering::LatestRequest && request != self.last_request {
                    debug!(
                        "Discarding result of load {request}, latest load is {}",
                        self.last_request
                    );
                    return None;
                }

                Some(match result.into_result() {
                    Ok(collection) => self.with_remote(collection),
                    Err(error) => self.with_fallback(error),
                })
            }
            Transition::DemoRequested => Some(Self {
                phase: LoadPhase::Ready(ActiveLayerState::Demo),
                active_layer: ActiveLayerState::Demo,
                store: self.store.replaced(shared_demo_data()),
                error: None,
                demo_origin: Some(DemoOrigin::Requested),
                ..self.clone()
            }),
        }
    }

    fn with_remote(&self, collection: FeatureCollection) -> Self {
        Self {
            phase: LoadPhase::Ready(ActiveLayerState::Remote),
            active_layer: ActiveLayerState::Remote,
            store: self.store.replaced(Arc::new(collection)),
            error: None,
            demo_origin: None,
            ..self.clone()
        }
    }

    fn with_fallback(&self, error: AcquisitionError) -> Self {
        warn!("{error}, showing demo data");

        Self {
            phase: LoadPhase::Ready(ActiveLayerState::Demo),
            active_layer: ActiveLayerState::Demo,
            store: self.store.replaced(shared_demo_data()),
            error: Some(error),
            demo_origin: Some(DemoOrigin::Fallback),
            ..self.clone()
        }
    }

    /// Stage of the load cycle.
    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    /// Dataset the feature layer shows.
    pub fn active_layer(&self) -> ActiveLayerState {
        self.active_layer
    }

    /// Features of the active dataset.
    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// Active dataset, if any was loaded.
    pub fn collection(&self) -> Option<&Arc<FeatureCollection>> {
        self.store.collection()
    }

    /// Error to show in the error panel. Always `None` while the demo dataset is active.
    pub fn error_panel(&self) -> Option<&AcquisitionError> {
        match self.active_layer {
            ActiveLayerState::Demo => None,
            ActiveLayerState::Remote => self.error.as_ref(),
        }
    }

    /// Error of the last failed load, if the demo dataset is shown because of it.
    pub fn diagnostic_error(&self) -> Option<&AcquisitionError> {
        self.error.as_ref()
    }

    /// How the demo dataset became active. `None` while the remote dataset is shown or nothing was loaded.
    pub fn demo_origin(&self) -> Option<DemoOrigin> {
        self.demo_origin
    }

    /// Returns true if the demo dataset is shown because a remote load failed.
    pub fn is_fallback(&self) -> bool {
        self.demo_origin == Some(DemoOrigin::Fallback)
    }

    /// Returns true while a load is in progress.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading { .. })
    }

    /// Id of the latest started load.
    pub fn last_request(&self) -> RequestId {
        self.last_request
    }

    /// Number of transitions applied since the initial state. Every snapshot has a greater sequence than the one
    /// it was created from.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Policy for overlapping loads.
    pub fn ordering(&self) -> LoadOrdering {
        self.ordering
    }

    /// Feature layer to draw for this state.
    pub fn feature_layer(&self) -> FeatureLayer {
        FeatureLayer::new(self.store.collection().cloned(), self.active_layer)
    }

    /// Information for the UI shell.
    pub fn status(&self) -> StatusSummary {
        StatusSummary {
            badge_text: self.active_layer.badge_text(),
            data_kind_label: self.active_layer.data_kind_label(),
            feature_count: self.store.len(),
            loading: self.is_loading(),
            error_message: self.error_panel().map(|error| error.to_string()),
            show_demo_notice: self.phase == LoadPhase::Ready(ActiveLayerState::Demo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::demo::demo_data;
    use assert_matches::assert_matches;
    use wfs_map_types::{latlon, Feature, PropertyMap, Provenance};

    fn remote_collection() -> FeatureCollection {
        FeatureCollection::new(
            vec![Feature::new("a", latlon!(1.0, 2.0), PropertyMap::new())],
            Provenance::Remote,
        )
    }

    fn start(state: &MapState) -> (MapState, RequestId) {
        let state = state
            .apply(Transition::LoadStarted {
                endpoint: "http://localhost/wfs".into(),
            })
            .expect("load started");
        let request = state.last_request();
        (state, request)
    }

    #[test]
    fn initial_state() {
        let state = MapState::default();
        assert_eq!(state.phase(), &LoadPhase::Idle);
        assert_eq!(state.active_layer(), ActiveLayerState::Demo);
        assert!(state.store().is_empty());
        assert!(!state.is_loading());
        assert!(!state.status().show_demo_notice);
        assert_eq!(state.sequence(), 0);
    }

    #[test]
    fn sequence_grows_with_applied_transitions() {
        let (loading, request) = start(&MapState::default());
        assert_eq!(loading.sequence(), 1);

        let (restarted, _) = start(&loading);
        assert_eq!(restarted.sequence(), 2);

        let stale = restarted.apply(Transition::LoadFinished {
            request,
            result: AcquisitionResult::EmptyResult,
        });
        assert_eq!(stale, None);

        let demo = restarted.apply(Transition::DemoRequested).expect("demo");
        assert_eq!(demo.sequence(), 3);
    }

    #[test]
    fn loading_keeps_previous_dataset() {
        let state = MapState::default()
            .apply(Transition::DemoRequested)
            .expect("demo");
        let (loading, request) = start(&state);

        assert!(loading.is_loading());
        assert_matches!(loading.phase(), LoadPhase::Loading { request: r, .. } if *r == request);
        assert_eq!(loading.store(), state.store());
        assert!(loading.status().loading);
    }

    #[test]
    fn success_goes_remote() {
        let (state, request) = start(&MapState::default());
        let state = state
            .apply(Transition::LoadFinished {
                request,
                result: AcquisitionResult::Success(remote_collection()),
            })
            .expect("applied");

        assert_eq!(state.phase(), &LoadPhase::Ready(ActiveLayerState::Remote));
        assert_eq!(state.store().len(), 1);
        assert_eq!(state.diagnostic_error(), None);
        assert_eq!(state.demo_origin(), None);

        let status = state.status();
        assert_eq!(status.badge_text, "WFS server");
        assert_eq!(status.data_kind_label, "Live WFS data");
        assert!(!status.show_demo_notice);
    }

    #[test]
    fn failure_falls_back() {
        let (state, request) = start(&MapState::default());
        let state = state
            .apply(Transition::LoadFinished {
                request,
                result: AcquisitionResult::MalformedResponse,
            })
            .expect("applied");

        assert_eq!(state.active_layer(), ActiveLayerState::Demo);
        assert_eq!(state.collection().map(|c| (**c).clone()), Some(demo_data()));
        assert_eq!(state.diagnostic_error(), Some(&AcquisitionError::Malformed));
        assert_eq!(state.error_panel(), None);
        assert!(state.is_fallback());

        let status = state.status();
        assert_eq!(status.badge_text, "Demo data");
        assert_eq!(status.data_kind_label, "Demonstration");
        assert_eq!(status.feature_count, 8);
        assert_eq!(status.error_message, None);
        assert!(status.show_demo_notice);
    }

    #[test]
    fn success_after_failure_clears_error() {
        let (state, request) = start(&MapState::default());
        let state = state
            .apply(Transition::LoadFinished {
                request,
                result: AcquisitionResult::HttpError(500),
            })
            .expect("applied");
        let (state, request) = start(&state);
        let state = state
            .apply(Transition::LoadFinished {
                request,
                result: AcquisitionResult::Success(remote_collection()),
            })
            .expect("applied");

        assert_eq!(state.diagnostic_error(), None);
        assert_eq!(state.store().revision(), 2);
    }

    #[test]
    fn demo_request_clears_error() {
        let (state, request) = start(&MapState::default());
        let state = state
            .apply(Transition::LoadFinished {
                request,
                result: AcquisitionResult::EmptyResult,
            })
            .expect("applied");
        assert_eq!(state.demo_origin(), Some(DemoOrigin::Fallback));

        let state = state.apply(Transition::DemoRequested).expect("applied");
        assert_eq!(state.diagnostic_error(), None);
        assert_eq!(state.demo_origin(), Some(DemoOrigin::Requested));
        assert!(!state.is_fallback());
    }

    #[test]
    fn stale_result_ordering() {
        for (ordering, applied) in [
            (LoadOrdering::LatestRequest, false),
            (LoadOrdering::LastCompleted, true),
        ] {
            let (state, first) = start(&MapState::new(ordering));
            let (state, second) = start(&state);
            assert!(first < second);

            let state = state
                .apply(Transition::LoadFinished {
                    request: second,
                    result: AcquisitionResult::Success(remote_collection()),
                })
                .expect("latest result is applied");

            let stale = state.apply(Transition::LoadFinished {
                request: first,
                result: AcquisitionResult::HttpError(503),
            });
            assert_eq!(stale.is_some(), applied, "{ordering:?}");
        }
    }
}
