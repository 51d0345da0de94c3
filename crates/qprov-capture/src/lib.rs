//! Zero-configuration provenance capture for quantum experiments.
//!
//! This crate intercepts named host functions (circuit construction,
//! transpilation, job submission, result retrieval) through a reversible
//! [`InterceptRegistry`], merges the observations into provenance records
//! through per-scope [`Accumulator`]s, and persists frozen records through
//! a file-per-record [`TraceStore`]. A process-wide [`Session`] wires the
//! three together.
//!
//! Two invariants hold throughout:
//!
//! - **Non-interference.** Wrapped functions forward arguments and return
//!   values unchanged, and every capture-side failure is contained —
//!   logged and swallowed, never surfaced to the host call.
//! - **Reversibility.** Every installed wrap records its original, and
//!   [`InterceptRegistry::uninstall_all`] restores all of them.

mod accumulator;
mod adapter;
mod error;
mod event;
mod hook;
mod registry;
mod session;
mod store;

pub use accumulator::Accumulator;
pub use adapter::{observing_wrapper, Adapter, AdapterFactory};
pub use error::{CaptureError, CaptureResult};
pub use event::CaptureEvent;
pub use hook::{FunctionTable, HostCallError, HostFn};
pub use registry::InterceptRegistry;
pub use session::{ExperimentScope, Session};
pub use store::{TraceStore, ENV_HOME, ENV_NO_AUTOSAVE};
