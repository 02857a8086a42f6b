use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};

use crate::control::MapState;

/// Receives every new [`MapState`] produced by a [`FallbackController`](crate::control::FallbackController).
///
/// Rendering surfaces and UI shells implement this trait to redraw when the active dataset, the loading flag or the
/// error changes. Closures taking `&Arc<MapState>` implement it automatically.
pub trait StateObserver: MaybeSend + MaybeSync {
    /// Called after a state transition with the new state.
    fn state_changed(&self, state: &Arc<MapState>);
}

impl<T> StateObserver for T
where
    T: Fn(&Arc<MapState>) + MaybeSend + MaybeSync,
{
    fn state_changed(&self, state: &Arc<MapState>) {
        self(state)
    }
}
