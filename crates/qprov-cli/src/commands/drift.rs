//! Drift command implementation.
//!
//! Compares a record's calibration snapshot against a newer one. Without
//! `--against`, the report degrades to what calibration age alone can say.

use anyhow::{anyhow, Result};
use console::style;
use qprov_analysis::drift::{analyze_drift, DriftReport, Feasibility};
use qprov_model::Calibration;

use super::common::{load_record, open_store};

/// Execute the drift command.
pub fn execute(reference: &str, against: Option<&str>) -> Result<()> {
    let store = open_store();
    let record = load_record(&store, reference)?;

    let current: Option<Calibration> = match against {
        Some(other) => {
            let comparison = load_record(&store, other)?;
            Some(
                comparison
                    .hardware
                    .and_then(|h| h.calibration)
                    .ok_or_else(|| anyhow!("'{other}' has no calibration snapshot"))?,
            )
        }
        None => None,
    };

    let Some(report) = analyze_drift(&record, current.as_ref()) else {
        println!(
            "Record {} has no hardware section; nothing to analyze.",
            style(&record.id).dim()
        );
        return Ok(());
    };

    println!(
        "{} Calibration drift for {}\n",
        style("→").cyan().bold(),
        style(&record.id).dim()
    );
    println!("  {}", report.summary());

    let feasibility = match report.feasibility {
        Feasibility::High => style(report.feasibility.to_string()).green().bold(),
        Feasibility::Medium => style(report.feasibility.to_string()).yellow(),
        Feasibility::Low | Feasibility::VeryLow => {
            style(report.feasibility.to_string()).red().bold()
        }
    };
    println!("  Reproduction feasibility: {feasibility}");

    print_qubit_table(&report);
    print_gate_table(&report);

    if !report.unmatched_qubits.is_empty() {
        println!(
            "\n  Qubits in only one snapshot: {:?}",
            report.unmatched_qubits
        );
    }

    if !report.recommendations.is_empty() {
        println!("\n{}", style("Recommendations").bold());
        for recommendation in &report.recommendations {
            println!("  • {recommendation}");
        }
    }

    Ok(())
}

fn fmt_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{pct:+.1}%"),
        None => "-".to_string(),
    }
}

fn print_qubit_table(report: &DriftReport) {
    if report.qubit_drift.is_empty() {
        return;
    }

    println!("\n{}", style("Qubit drift").bold());
    println!(
        "  {:<6}  {:>8}  {:>8}  {:>8}  {}",
        style("QUBIT").bold(),
        style("T1").bold(),
        style("T2").bold(),
        style("READOUT").bold(),
        style("SUMMARY").bold()
    );
    println!("  {}", "-".repeat(54));

    for drift in &report.qubit_drift {
        let summary = if drift.has_significant_drift() {
            style(drift.summary()).red()
        } else {
            style(drift.summary()).green()
        };
        println!(
            "  {:<6}  {:>8}  {:>8}  {:>8}  {summary}",
            drift.qubit_index,
            fmt_change(drift.t1_change_percent),
            fmt_change(drift.t2_change_percent),
            fmt_change(drift.readout_change_percent),
        );
    }
}

fn print_gate_table(report: &DriftReport) {
    if report.gate_drift.is_empty() {
        return;
    }

    println!("\n{}", style("Gate drift").bold());
    println!(
        "  {:<20}  {:>10}  {:>10}  {:>8}",
        style("GATE").bold(),
        style("ORIGINAL").bold(),
        style("CURRENT").bold(),
        style("CHANGE").bold()
    );
    println!("  {}", "-".repeat(54));

    for drift in &report.gate_drift {
        let change = fmt_change(drift.error_change_percent);
        let change = if drift.has_significant_drift() {
            style(change).red()
        } else {
            style(change).green()
        };
        println!(
            "  {:<20}  {:>10}  {:>10}  {:>8}",
            format!("{}{:?}", drift.gate, drift.qubits),
            fmt_error(drift.error_original),
            fmt_error(drift.error_current),
            change,
        );
    }
}

fn fmt_error(error: Option<f64>) -> String {
    match error {
        Some(e) => format!("{e:.5}"),
        None => "-".to_string(),
    }
}
