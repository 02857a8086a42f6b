use std::future::Future;

use maybe_sync::MaybeSend;

/// Runs the future on the tokio runtime without waiting for it.
///
/// Must be called from within a runtime context.
pub fn spawn<T>(future: T)
where
    T: Future + MaybeSend + 'static,
    T::Output: MaybeSend + 'static,
{
    tokio::spawn(future);
}
