//! Control of the map state and of user interaction with the features.
//!
//! * [`FallbackController`] loads features and decides which dataset is shown. Its state is an immutable
//!   [`MapState`] snapshot replaced on every [`Transition`].
//! * [`InteractionEngine`] keeps the selection and hover state. The rendering surface gives it [`UserEvent`]s,
//!   which are passed to a list of [`UserEventHandler`]s until one of them stops the propagation.

use maybe_sync::{MaybeSend, MaybeSync};
use wfs_map_types::GeoPoint2d;

mod controller;
mod interaction;
mod state;

pub use controller::FallbackController;
pub use interaction::{
    FeatureClickHandler, InteractionEngine, InteractionState, MapClickHandler, SelectionState,
};
pub use state::{
    ActiveLayerState, DemoOrigin, LoadPhase, MapState, RequestId, StatusSummary, Transition,
};

/// User input handler.
pub trait UserEventHandler: MaybeSend + MaybeSync {
    /// Handle the event.
    fn handle(&self, event: &UserEvent, state: &mut InteractionState) -> EventPropagation;
}

impl<T> UserEventHandler for T
where
    T: Fn(&UserEvent, &mut InteractionState) -> EventPropagation + MaybeSend + MaybeSync,
{
    fn handle(&self, event: &UserEvent, state: &mut InteractionState) -> EventPropagation {
        self(event, state)
    }
}

/// Event produced by the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// The feature with the given id was clicked.
    FeatureClick(String),
    /// The map was clicked at a place without features.
    BackgroundClick,
    /// The map was clicked at the given position. Features within `tolerance` degrees are hit.
    Click {
        /// Clicked position.
        position: GeoPoint2d,
        /// Hit tolerance in degrees.
        tolerance: f64,
    },
    /// The pointer moved over the feature with the given id.
    PointerEnter(String),
    /// The pointer left the feature with the given id.
    PointerLeave(String),
    /// The user closed the popup.
    PopupClosed,
}

/// Value returned by an [`UserEventHandler`] to indicate the status of the event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event should not be propagated to the next handler.
    Stop,
}
