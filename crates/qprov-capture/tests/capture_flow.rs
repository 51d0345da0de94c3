//! End-to-end capture flow tests.
//!
//! These tests drive a small fake backend through a function table, wrap
//! its entry points with a real adapter, and verify that running an
//! "experiment" leaves the host behavior untouched while producing a
//! complete provenance record in the store.

use std::sync::Arc;

use qprov_capture::{
    observing_wrapper, Adapter, CaptureEvent, CaptureResult, FunctionTable, HostFn,
    InterceptRegistry, Session, TraceStore,
};
use qprov_model::{Counts, ExperimentResult, GateOp, Hardware, Metadata};
use serde_json::{json, Value};
use tempfile::TempDir;

fn test_session() -> (TempDir, Arc<Session>) {
    let dir = TempDir::new().unwrap();
    let session = Session::new(TraceStore::new(dir.path()));
    (dir, session)
}

/// A fake provider surface: `run` takes a shot count and returns counts.
fn backend_table() -> Arc<FunctionTable> {
    let table = FunctionTable::new("fake_provider.backend");
    table.define(
        "run",
        Arc::new(|args: &Value| {
            let shots = args["shots"].as_u64().unwrap_or(0);
            Ok(json!({ "counts": { "00": shots / 2, "11": shots / 2 } }))
        }),
    );
    table
}

/// Adapter wrapping the fake backend's `run`, emitting hardware on the way
/// in and the final result on the way out.
struct FakeBackendAdapter {
    session: Arc<Session>,
    table: Arc<FunctionTable>,
    installed: bool,
}

impl FakeBackendAdapter {
    fn new(session: Arc<Session>, table: Arc<FunctionTable>) -> Self {
        Self {
            session,
            table,
            installed: false,
        }
    }
}

impl Adapter for FakeBackendAdapter {
    fn name(&self) -> &str {
        "fake-backend"
    }

    fn install(&mut self, registry: &mut InterceptRegistry) -> CaptureResult<()> {
        if self.installed {
            return Ok(());
        }
        let session = Arc::clone(&self.session);
        registry.install(&self.table, "run", move |original: HostFn| {
            observing_wrapper(
                session,
                original,
                |_args| Some(CaptureEvent::HardwareObserved(Hardware::simulator("fake_sim", 2))),
                |_args, outcome| {
                    let value = outcome.as_ref().ok()?;
                    let counts = value["counts"].as_object()?;
                    let pairs: Vec<(String, u64)> = counts
                        .iter()
                        .map(|(k, v)| (k.clone(), v.as_u64().unwrap_or(0)))
                        .collect();
                    Some(CaptureEvent::ResultObserved {
                        result: ExperimentResult::from_counts(Counts::from_pairs(pairs)),
                        final_: true,
                    })
                },
            )
        })?;
        self.installed = true;
        Ok(())
    }

    fn uninstall(&mut self, registry: &mut InterceptRegistry) -> CaptureResult<()> {
        if self.installed {
            registry.uninstall(&self.table, "run");
            self.installed = false;
        }
        Ok(())
    }
}

fn register_fake_backend(session: &Arc<Session>, table: &Arc<FunctionTable>) {
    let factory_session = Arc::clone(session);
    let factory_table = Arc::clone(table);
    session.register_adapter(
        "fake-backend",
        Box::new(move || {
            Box::new(FakeBackendAdapter::new(
                Arc::clone(&factory_session),
                Arc::clone(&factory_table),
            ))
        }),
    );
}

#[test]
fn captured_run_is_transparent_to_the_caller() {
    let (_dir, session) = test_session();
    let table = backend_table();

    let bare = table.call("run", &json!({ "shots": 1000 })).unwrap();

    register_fake_backend(&session, &table);
    session.on_capability_detected("fake-backend");
    let wrapped = table.call("run", &json!({ "shots": 1000 })).unwrap();

    assert_eq!(bare, wrapped);
}

#[test]
fn run_produces_a_persisted_record() {
    let (_dir, session) = test_session();
    let table = backend_table();
    register_fake_backend(&session, &table);
    session.on_capability_detected("fake-backend");

    table.call("run", &json!({ "shots": 1024 })).unwrap();

    let records = session.list_recent_records(10).unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.hardware.as_ref().unwrap().backend, "fake_sim");
    let result = record.result.as_ref().unwrap();
    assert_eq!(result.counts.shots, 1024);
    assert_eq!(result.counts.raw["00"], 512);
}

#[test]
fn each_run_freezes_its_own_record() {
    let (_dir, session) = test_session();
    let table = backend_table();
    register_fake_backend(&session, &table);
    session.on_capability_detected("fake-backend");

    table.call("run", &json!({ "shots": 100 })).unwrap();
    table.call("run", &json!({ "shots": 200 })).unwrap();

    let records = session.list_recent_records(10).unwrap();
    assert_eq!(records.len(), 2);
    let mut shots: Vec<u64> = records
        .iter()
        .map(|r| r.result.as_ref().unwrap().counts.shots)
        .collect();
    shots.sort();
    assert_eq!(shots, vec![100, 200]);
}

#[test]
fn named_scope_collects_manual_and_intercepted_events() {
    let (_dir, session) = test_session();
    let table = backend_table();
    register_fake_backend(&session, &table);
    session.on_capability_detected("fake-backend");

    let scope = session.enter_experiment("bell", Metadata::named("Bell State"));
    session
        .dispatch(CaptureEvent::CircuitObserved(qprov_model::Circuit::from_ops(
            Some("bell".into()),
            2,
            2,
            2,
            &[GateOp::new("h", [0]), GateOp::new("cx", [0, 1])],
        )))
        .unwrap();
    table.call("run", &json!({ "shots": 512 })).unwrap();

    let record = scope.finish().unwrap();
    assert_eq!(record.metadata.name.as_deref(), Some("Bell State"));
    assert_eq!(record.circuits.len(), 1);
    assert!(record.result.is_some());
    assert_eq!(record.hardware.unwrap().backend, "fake_sim");
}

#[test]
fn reset_restores_the_original_function() {
    let (_dir, session) = test_session();
    let table = backend_table();
    register_fake_backend(&session, &table);
    session.on_capability_detected("fake-backend");

    table.call("run", &json!({ "shots": 10 })).unwrap();
    assert_eq!(session.list_recent_records(10).unwrap().len(), 1);

    session.reset();

    // Calls after reset behave identically but produce no new records.
    table.call("run", &json!({ "shots": 10 })).unwrap();
    assert_eq!(session.list_recent_records(10).unwrap().len(), 1);
}

#[test]
fn host_errors_pass_through_the_wrapper() {
    let (_dir, session) = test_session();
    let table = FunctionTable::new("fake_provider.backend");
    table.define(
        "run",
        Arc::new(|_: &Value| {
            Err(qprov_capture::HostCallError::new(
                "IBMRuntimeError",
                "job limit exceeded",
            ))
        }),
    );

    register_fake_backend(&session, &table);
    session.on_capability_detected("fake-backend");

    let err = table.call("run", &json!({ "shots": 1 })).unwrap_err();
    assert_eq!(err.kind, "IBMRuntimeError");
}
