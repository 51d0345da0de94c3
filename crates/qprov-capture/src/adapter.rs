//! Adapter seam: one adapter per external capability.
//!
//! An adapter knows which functions of one external capability to intercept
//! and how to turn their call data into capture events. The per-framework
//! extraction logic itself lives outside this crate; adapters built on this
//! seam receive call payloads as `serde_json::Value` and construct events
//! from them.
//!
//! Wrapper discipline, which [`observing_wrapper`] enforces:
//!
//! 1. forward the call to the original with unchanged arguments and return
//!    its result or error unchanged — capture never alters host behavior;
//! 2. emit capture events on the way in and/or out;
//! 3. never let a failure in event construction escape to the caller — the
//!    host function's own outcome always wins.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::error::CaptureResult;
use crate::event::CaptureEvent;
use crate::hook::{HostCallError, HostFn};
use crate::registry::InterceptRegistry;
use crate::session::Session;

/// One external capability's interception logic.
///
/// Both `install` and `uninstall` must be idempotent: installing an
/// already-installed adapter is a no-op, as is uninstalling one that was
/// never installed.
pub trait Adapter: Send {
    /// Capability name this adapter covers.
    fn name(&self) -> &str;

    /// Wrap each relevant function exactly once.
    fn install(&mut self, registry: &mut InterceptRegistry) -> CaptureResult<()>;

    /// Reverse exactly the wraps this adapter installed.
    fn uninstall(&mut self, registry: &mut InterceptRegistry) -> CaptureResult<()>;
}

/// Factory building an adapter for a registered capability.
pub type AdapterFactory = Box<dyn Fn() -> Box<dyn Adapter> + Send>;

/// Build a wrapper that forwards to `original` and emits capture events to
/// `session` around the call.
///
/// `before` runs with the call arguments; `after` runs with the arguments
/// and the host outcome. Either may decline to produce an event. Panics in
/// event construction are caught, logged, and dropped — they never reach
/// the host caller.
pub fn observing_wrapper<B, A>(session: Arc<Session>, original: HostFn, before: B, after: A) -> HostFn
where
    B: Fn(&Value) -> Option<CaptureEvent> + Send + Sync + 'static,
    A: Fn(&Value, &Result<Value, HostCallError>) -> Option<CaptureEvent> + Send + Sync + 'static,
{
    Arc::new(move |args| {
        emit_guarded(&session, || before(args));
        let outcome = original(args);
        emit_guarded(&session, || after(args, &outcome));
        outcome
    })
}

/// Emit an event produced by `build`, isolating every capture failure.
fn emit_guarded<F>(session: &Arc<Session>, build: F)
where
    F: FnOnce() -> Option<CaptureEvent>,
{
    match catch_unwind(AssertUnwindSafe(build)) {
        Ok(Some(event)) => {
            let kind = event.kind();
            if let Err(e) = session.dispatch(event) {
                warn!(kind, "capture event dropped: {e}");
            }
        }
        Ok(None) => {}
        Err(_) => warn!("capture event construction panicked; event dropped"),
    }
}
