//! `wfs-map` loads geographic features from a WFS server for an interactive map, falls back to a bundled demo
//! dataset when the server cannot provide them, and keeps track of what the user selects on the map.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use wfs_map::config::WfsConfig;
//! use wfs_map::control::{FallbackController, InteractionEngine, UserEvent};
//!
//! # tokio_test::block_on(async {
//! let controller = FallbackController::from_config(&WfsConfig::default())?;
//! let engine = Arc::new(InteractionEngine::new(controller.state()));
//! controller.subscribe(engine.clone());
//!
//! let state = controller.init().await;
//! println!("{}: {} features", state.status().badge_text, state.store().len());
//!
//! engine.handle(&UserEvent::FeatureClick("kazan".into()));
//! # Ok::<(), wfs_map::error::MapError>(())
//! # });
//! ```
//!
//! # Main components
//!
//! * [`FallbackController`](control::FallbackController) runs the load cycle. It asks a
//!   [`FeatureProvider`](layer::data_provider::FeatureProvider) for features and shows the
//!   [demo dataset](layer::demo) whenever that fails. Every change produces a new immutable
//!   [`MapState`](control::MapState) which is given to the subscribed [`StateObserver`]s.
//! * [`FeatureLayer`](layer::FeatureLayer) tells the rendering surface what to draw: the features of the active
//!   dataset, their [styles](symbol) and markers.
//! * [`InteractionEngine`](control::InteractionEngine) turns clicks and pointer movement into the selection and
//!   hover state, and the [`popup`] module prepares the attributes of the selected feature for display.
//! * [`base`](layer::base) describes the base tile layers under the features.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub(crate) mod async_runtime;
mod color;
pub mod config;
pub mod control;
pub mod error;
pub mod layer;
mod observer;
pub mod platform;
pub mod popup;

#[cfg(test)]
mod tests;

pub use color::Color;
pub use layer::feature_layer::symbol;
pub use observer::StateObserver;

// Reexport wfs_map_types
pub use wfs_map_types;
