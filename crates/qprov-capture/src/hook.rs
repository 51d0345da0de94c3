//! Host function tables — the seam between qprov and external libraries.
//!
//! qprov never reaches into a third-party library's internals. Instead, an
//! instrumentation shim (the external collaborator that owns the actual
//! framework binding) exposes the functions it is willing to have observed
//! as named entries in a [`FunctionTable`]. The interception registry swaps
//! entries in these tables and restores them on uninstall; the shim keeps
//! calling through the table and is oblivious to whether a wrapper is
//! currently in place.
//!
//! Arguments and return values cross this seam as `serde_json::Value`, so
//! the capture core stays independent of any particular framework's object
//! model.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use rustc_hash::FxHashMap;
use serde_json::Value;

/// Error raised by the host function itself.
///
/// Wrappers must propagate this unchanged: the capture layer has to be
/// invisible on the error path as much as on the success path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct HostCallError {
    /// Host-defined error kind (e.g. "ValueError").
    pub kind: String,
    /// Host-defined message.
    pub message: String,
}

impl HostCallError {
    /// Create a host call error.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Error for a call to a name the table does not define.
    pub fn undefined(name: &str) -> Self {
        Self::new("UndefinedFunction", format!("no function named '{name}'"))
    }
}

/// A callable entry in a [`FunctionTable`].
pub type HostFn = Arc<dyn Fn(&Value) -> Result<Value, HostCallError> + Send + Sync>;

/// A named table of host callables, shared between a shim and the registry.
///
/// Entry lookup and replacement are internally synchronized; calls execute
/// outside the table lock, so concurrent calls through the same table do
/// not serialize against each other.
pub struct FunctionTable {
    name: String,
    entries: Mutex<FxHashMap<String, HostFn>>,
}

impl FunctionTable {
    /// Create an empty table with the given name.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            entries: Mutex::new(FxHashMap::default()),
        })
    }

    /// Name of this table.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, FxHashMap<String, HostFn>> {
        // This sits on the host call path: a panic elsewhere must not
        // poison the table into panicking inside the user's own call.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Define or replace an entry.
    pub fn define(&self, name: impl Into<String>, f: HostFn) {
        self.lock().insert(name.into(), f);
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<HostFn> {
        self.lock().get(name).cloned()
    }

    /// Call an entry by name. An undefined name produces a host-side error,
    /// exactly as the unwrapped shim would report it.
    pub fn call(&self, name: &str, args: &Value) -> Result<Value, HostCallError> {
        let Some(f) = self.get(name) else {
            return Err(HostCallError::undefined(name));
        };
        f(args)
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.lock().keys().cloned().collect();
        f.debug_struct("FunctionTable")
            .field("name", &self.name)
            .field("entries", &names)
            .finish()
    }
}
