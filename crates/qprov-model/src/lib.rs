//! Qprov Provenance Data Model
//!
//! This crate provides the core data structures for describing one quantum
//! experiment: the software environment it ran in, the circuits it executed,
//! how they were compiled, the hardware (and its calibration) they ran on,
//! the execution parameters, and the measured results. Together these form a
//! [`Record`] — the frozen, content-addressable unit everything else in
//! qprov operates on.
//!
//! # Overview
//!
//! - **Environment**: [`Environment`], [`Package`] — software snapshot
//! - **Circuit**: [`Circuit`], [`GateCounts`], [`GateOp`] — the quantum program
//! - **Transpilation**: [`Transpilation`], [`QubitMapping`] — compilation record
//! - **Hardware**: [`Hardware`], [`Calibration`], [`QubitProperties`],
//!   [`GateProperties`] — backend and its physical state
//! - **Execution**: [`Execution`], [`ErrorMitigation`] — run parameters and timing
//! - **Result**: [`ExperimentResult`], [`Counts`] — measurement outcomes
//! - **Record**: [`Record`], [`Metadata`] — the frozen trace
//!
//! # Content addressing
//!
//! Every [`Record`] exposes a deterministic [`Record::content_hash`] computed
//! over its scientific fields only — never over the generated identifier or
//! the wall-clock creation time. Two independently captured records of the
//! same experiment under the same conditions therefore hash identically.
//!
//! # Example
//!
//! ```rust
//! use qprov_model::{Circuit, GateOp, Record};
//!
//! let ops = vec![
//!     GateOp::new("h", [0]),
//!     GateOp::new("cx", [0, 1]),
//! ];
//! let circuit = Circuit::from_ops(Some("bell".into()), 2, 2, 3, &ops);
//!
//! let record = Record::builder().circuit(circuit).build();
//! assert_eq!(record.content_hash().len(), 16);
//! ```

pub mod circuit;
pub mod environment;
pub mod execution;
pub mod hardware;
pub mod hash;
pub mod metadata;
pub mod record;
pub mod result;
pub mod transpilation;

pub use circuit::{Circuit, GateCounts, GateOp};
pub use environment::{Environment, Package};
pub use execution::{ErrorMitigation, Execution};
pub use hardware::{Calibration, GateProperties, Hardware, QubitProperties};
pub use metadata::Metadata;
pub use record::{Record, RecordBuilder, FORMAT_VERSION};
pub use result::{Counts, ExperimentResult};
pub use transpilation::{QubitMapping, Transpilation};
