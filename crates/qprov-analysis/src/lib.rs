//! Analysis engines over provenance records.
//!
//! Four consumers of a frozen [`qprov_model::Record`]:
//!
//! - [`score`] — a 0-100 reproducibility score with a per-category
//!   breakdown and recommendations;
//! - [`drift`] — calibration drift between the record's snapshot and a
//!   newer one, with a reproduction-feasibility verdict;
//! - [`diff`] — fixed-shape side-by-side comparison of two records;
//! - [`validation`] — severity-graded issues with concrete fix guidance.
//!
//! All of them are total functions: missing data degrades the output, it
//! never produces an error.

pub mod diff;
pub mod drift;
pub mod score;
pub mod validation;

pub use diff::{diff_records, DiffReport, DiffRow};
pub use drift::{
    analyze_drift, analyze_drift_with, explain_result_difference, DriftConfig, DriftReport,
    Feasibility, GateDrift, QubitDrift,
};
pub use score::{
    compute_score, compute_score_with, ComponentStatus, Grade, ReproducibilityScore,
    ScoreComponent, ScoreConfig,
};
pub use validation::{
    validate_for_publication, validate_record, IssueLevel, ValidationIssue, ValidationReport,
};
