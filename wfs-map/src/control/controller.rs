use std::sync::Arc;

use log::{debug, info};
use maybe_sync::{MaybeSend, MaybeSync};
use parking_lot::RwLock;

use crate::async_runtime;
use crate::config::{LoadOrdering, WfsConfig};
use crate::control::state::{MapState, Transition};
use crate::error::MapError;
use crate::layer::data_provider::{FeatureProvider, WfsProvider};
use crate::observer::StateObserver;

/// Decides which dataset the map shows.
///
/// The controller tries to load features from a WFS endpoint and shows the bundled demo dataset whenever that does
/// not produce any features. All state changes go through [`MapState::apply`], and every new state is given to the
/// subscribed [observers](StateObserver).
///
/// Loads are never cancelled. What happens when they overlap is decided by the [`LoadOrdering`] of the state.
pub struct FallbackController<P = WfsProvider> {
    provider: P,
    endpoint: String,
    state: RwLock<Arc<MapState>>,
    observers: RwLock<Vec<Arc<dyn StateObserver>>>,
}

impl FallbackController<WfsProvider> {
    /// Creates a controller that loads features over HTTP with the given configuration.
    pub fn from_config(config: &WfsConfig) -> Result<Self, MapError> {
        Ok(Self::new(
            WfsProvider::new(config)?,
            config.endpoint.clone(),
            config.load_ordering,
        ))
    }
}

impl<P: FeatureProvider> FallbackController<P> {
    /// Creates a new controller. `endpoint` is the url used by [`FallbackController::init`].
    pub fn new(provider: P, endpoint: impl Into<String>, ordering: LoadOrdering) -> Self {
        Self {
            provider,
            endpoint: endpoint.into(),
            state: RwLock::new(Arc::new(MapState::new(ordering))),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Current state.
    pub fn state(&self) -> Arc<MapState> {
        self.state.read().clone()
    }

    /// Adds an observer that is called after every state change.
    pub fn subscribe(&self, observer: Arc<dyn StateObserver>) {
        self.observers.write().push(observer);
    }

    /// Loads features from the default endpoint.
    pub async fn init(&self) -> Arc<MapState> {
        self.load(&self.endpoint).await
    }

    /// Loads features from the given endpoint and waits until the result is applied.
    ///
    /// Returns the state after the load. If the result of this load was discarded because a newer load was
    /// started in the meantime, the returned state is the current one.
    pub async fn load(&self, endpoint: &str) -> Arc<MapState> {
        let started = self.update(Transition::LoadStarted {
            endpoint: endpoint.to_owned(),
        });
        let request = started.last_request();

        let result = self.provider.fetch_features(endpoint).await;

        self.update(Transition::LoadFinished { request, result })
    }

    /// Shows the demo dataset without any network requests.
    pub fn use_demo_data(&self) -> Arc<MapState> {
        info!("Switching to demo data");
        self.update(Transition::DemoRequested)
    }

    /// Starts loading from the given endpoint in the background.
    ///
    /// Must be called from within a tokio runtime. Observers are notified when the load starts and when it
    /// finishes.
    pub fn spawn_load(self: &Arc<Self>, endpoint: impl Into<String>)
    where
        P: MaybeSend + MaybeSync + 'static,
    {
        let controller = self.clone();
        let endpoint = endpoint.into();
        async_runtime::spawn(async move {
            controller.load(&endpoint).await;
        });
    }

    fn update(&self, transition: Transition) -> Arc<MapState> {
        let next = {
            let mut state = self.state.write();
            match state.apply(transition) {
                Some(next) => {
                    let next = Arc::new(next);
                    *state = next.clone();
                    next
                }
                None => return state.clone(),
            }
        };

        debug!("State changed: {:?}", next.phase());
        self.notify(&next);
        next
    }

    fn notify(&self, state: &Arc<MapState>) {
        let observers = self.observers.read().clone();
        for observer in observers {
            observer.state_changed(state);
        }
    }
}
