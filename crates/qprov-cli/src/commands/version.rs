//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum experiment provenance capture and analysis",
        style("qprov").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qprov-model     Provenance record data model");
    println!("  qprov-capture   Interception, sessions, and the trace store");
    println!("  qprov-analysis  Scoring, drift, diff, and validation engines");
    println!("  qprov-export    JSON, CycloneDX, SPDX, and YAML exporters");
    println!("  qprov-cli       Command-line interface");
    println!();
    println!(
        "Record format: {}",
        style(qprov_model::FORMAT_VERSION).dim()
    );
}
