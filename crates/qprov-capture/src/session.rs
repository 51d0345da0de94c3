//! Process-wide capture session.
//!
//! The session owns the interception registry, the stack of in-flight
//! accumulators, and the set of registered capability adapters. One global
//! instance serves the whole process ([`Session::global`]); independent
//! instances can be built with [`Session::new`] for embedding and tests.
//!
//! Scope discipline: events with no explicitly entered scope land in an
//! implicit one, created on demand and popped when it freezes. Named
//! scopes are entered with [`Session::enter_experiment`] and exited when
//! the returned [`ExperimentScope`] guard drops or finishes. A scope
//! frozen mid-flight (by a terminal event) stays on the stack until its
//! guard exits, so events arriving after the freeze surface as
//! [`CaptureError::Closed`] rather than spilling into a sibling scope.
//!
//! The session never keeps a frozen record beyond the scope exit that
//! hands it to the caller; "most recent" lookups go through the store by
//! remembered identifier.

use std::sync::{Arc, Mutex, OnceLock};

use qprov_model::{Metadata, Record};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::adapter::{Adapter, AdapterFactory};
use crate::error::{CaptureError, CaptureResult};
use crate::event::CaptureEvent;
use crate::accumulator::Accumulator;
use crate::registry::InterceptRegistry;
use crate::store::TraceStore;

const IMPLICIT_SCOPE: &str = "<implicit>";

static GLOBAL: OnceLock<Arc<Session>> = OnceLock::new();

/// One in-flight scope: its accumulator, plus the frozen record parked
/// between a mid-scope freeze and the scope's exit.
struct ScopeSlot {
    acc: Accumulator,
    frozen: Option<Record>,
}

/// A registered capability and its installation state.
struct AdapterSlot {
    factory: AdapterFactory,
    adapter: Option<Box<dyn Adapter>>,
    attempted: bool,
}

#[derive(Default)]
struct SessionState {
    scopes: Vec<ScopeSlot>,
    registry: InterceptRegistry,
    adapters: FxHashMap<String, AdapterSlot>,
    last_frozen_id: Option<String>,
}

/// Process-wide coordinator for capture.
pub struct Session {
    state: Mutex<SessionState>,
    store: TraceStore,
}

impl Session {
    /// Build a session around the given store.
    pub fn new(store: TraceStore) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(SessionState::default()),
            store,
        })
    }

    /// The process-wide session, created on first use from the
    /// environment-configured store.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Session::new(TraceStore::from_env())))
    }

    /// The store this session persists frozen records into.
    pub fn store(&self) -> &TraceStore {
        &self.store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // Capture state is recoverable even if a panic poisoned the lock.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Merge one event into the active scope, creating an implicit scope
    /// if none is active.
    ///
    /// A terminal event freezes the scope after it is applied; the frozen
    /// record is persisted (unless autosave is off) and, for the implicit
    /// scope, the scope is popped so the next event starts fresh.
    pub fn dispatch(&self, event: CaptureEvent) -> CaptureResult<()> {
        let mut state = self.lock();

        if state.scopes.is_empty() {
            debug!("opening implicit capture scope");
            state.scopes.push(ScopeSlot {
                acc: Accumulator::new(),
                frozen: None,
            });
        }

        let terminal = event.is_terminal();
        let slot = state
            .scopes
            .last_mut()
            .ok_or(CaptureError::NoActiveScope)?;
        slot.acc.apply(event)?;

        if terminal {
            self.freeze_top(&mut state)?;
        }
        Ok(())
    }

    /// Freeze the active scope's accumulator, persist the record, and
    /// park or pop it depending on scope kind.
    fn freeze_top(&self, state: &mut SessionState) -> CaptureResult<Record> {
        let slot = state
            .scopes
            .last_mut()
            .ok_or(CaptureError::NoActiveScope)?;
        let record = slot.acc.freeze()?;
        state.last_frozen_id = Some(record.id.clone());
        self.persist(&record);

        if slot.acc.scope() == IMPLICIT_SCOPE {
            state.scopes.pop();
        } else {
            slot.frozen = Some(record.clone());
        }
        Ok(record)
    }

    /// Persistence is best-effort; a failed save never breaks the host
    /// program's execution path.
    fn persist(&self, record: &Record) {
        if !self.store.autosave_enabled() {
            return;
        }
        match self.store.save(record) {
            Ok(path) => info!(id = %record.id, "saved provenance record to {}", path.display()),
            Err(e) => warn!(id = %record.id, "failed to save provenance record: {e}"),
        }
    }

    /// Explicitly freeze the active scope and take ownership of the record.
    pub fn freeze_active(&self) -> CaptureResult<Record> {
        let mut state = self.lock();
        self.freeze_top(&mut state)
    }

    /// Whether any scope is currently in flight.
    pub fn has_active_scope(&self) -> bool {
        !self.lock().scopes.is_empty()
    }

    /// Enter a named experiment scope. Events dispatched while the
    /// returned guard lives merge into this scope; dropping the guard
    /// freezes it (if a terminal event has not already).
    pub fn enter_experiment(
        self: &Arc<Self>,
        name: impl Into<String>,
        metadata: Metadata,
    ) -> ExperimentScope {
        let name = name.into();
        debug!(scope = %name, "entering experiment scope");
        self.lock().scopes.push(ScopeSlot {
            acc: Accumulator::named(name, metadata),
            frozen: None,
        });
        ExperimentScope {
            session: Arc::clone(self),
            finished: false,
        }
    }

    /// Pop the top scope, freezing it if still open, and hand its record
    /// to the caller.
    fn exit_scope(&self) -> CaptureResult<Record> {
        let mut state = self.lock();
        let slot = state.scopes.last_mut().ok_or(CaptureError::NoActiveScope)?;

        if let Some(record) = slot.frozen.take() {
            state.scopes.pop();
            return Ok(record);
        }

        let record = slot.acc.freeze()?;
        state.last_frozen_id = Some(record.id.clone());
        self.persist(&record);
        state.scopes.pop();
        Ok(record)
    }

    /// Register a factory for a capability's adapter. Registration alone
    /// installs nothing; see [`Session::on_capability_detected`].
    pub fn register_adapter(&self, capability: impl Into<String>, factory: AdapterFactory) {
        let capability = capability.into();
        debug!(%capability, "registered capture adapter");
        self.lock().adapters.insert(
            capability,
            AdapterSlot {
                factory,
                adapter: None,
                attempted: false,
            },
        );
    }

    /// React to a capability becoming available: build and install its
    /// adapter, exactly once per session. An unregistered capability and
    /// a repeated detection are both no-ops; an installation failure is
    /// logged and the capability is skipped for the rest of the session —
    /// capture never takes the host process down.
    pub fn on_capability_detected(&self, capability: &str) {
        let mut state = self.lock();
        let SessionState {
            adapters, registry, ..
        } = &mut *state;

        let Some(slot) = adapters.get_mut(capability) else {
            debug!(%capability, "no adapter registered for capability");
            return;
        };
        if slot.attempted {
            return;
        }
        slot.attempted = true;

        let mut adapter = (slot.factory)();
        match adapter.install(registry) {
            Ok(()) => {
                info!(%capability, "installed capture adapter");
                slot.adapter = Some(adapter);
            }
            Err(e) => warn!(%capability, "adapter installation failed, capability not captured: {e}"),
        }
    }

    /// Whether the capability's adapter is currently installed.
    pub fn is_capability_installed(&self, capability: &str) -> bool {
        self.lock()
            .adapters
            .get(capability)
            .is_some_and(|slot| slot.adapter.is_some())
    }

    /// The most recently frozen record in this session, loaded back from
    /// the store. `None` when nothing froze yet or the record is no
    /// longer retrievable (autosave off, file deleted).
    pub fn most_recent(&self) -> Option<Record> {
        let id = self.lock().last_frozen_id.clone()?;
        self.store.load(&id).ok()
    }

    /// Recently persisted records, newest first.
    pub fn list_recent_records(&self, limit: usize) -> CaptureResult<Vec<Record>> {
        self.store.list_recent(limit)
    }

    /// Tear down all interception and discard in-flight state without
    /// freezing. Adapter registrations survive; their installation state
    /// resets so a later detection installs afresh.
    pub fn reset(&self) {
        let mut state = self.lock();
        let SessionState {
            adapters, registry, ..
        } = &mut *state;

        for (capability, slot) in adapters.iter_mut() {
            if let Some(mut adapter) = slot.adapter.take() {
                if let Err(e) = adapter.uninstall(registry) {
                    warn!(%capability, "adapter uninstall failed: {e}");
                }
            }
            slot.attempted = false;
        }
        registry.uninstall_all();
        state.scopes.clear();
        state.last_frozen_id = None;
        debug!("capture session reset");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Session")
            .field("scopes", &state.scopes.len())
            .field("installed", &state.registry.installed_count())
            .field("store_root", &self.store.root())
            .finish()
    }
}

/// Guard for a named experiment scope.
///
/// Dropping the guard freezes and exits the scope, discarding the record
/// (it is still persisted if autosave is on). Call
/// [`ExperimentScope::finish`] instead to take ownership of the record.
#[must_use = "dropping the guard immediately closes the experiment scope"]
pub struct ExperimentScope {
    session: Arc<Session>,
    finished: bool,
}

impl ExperimentScope {
    /// Close the scope and return its frozen record.
    pub fn finish(mut self) -> CaptureResult<Record> {
        self.finished = true;
        self.session.exit_scope()
    }

    /// The session this scope belongs to.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl Drop for ExperimentScope {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.session.exit_scope() {
                warn!("failed to close experiment scope: {e}");
            }
        }
    }
}
