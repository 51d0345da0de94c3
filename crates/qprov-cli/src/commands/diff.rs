//! Diff command implementation.

use anyhow::Result;
use console::style;
use qprov_analysis::diff::diff_records;
use qprov_analysis::drift::explain_result_difference;

use super::common::{load_record, open_store};

/// Execute the diff command.
pub fn execute(left: &str, right: &str) -> Result<()> {
    let store = open_store();
    let left_record = load_record(&store, left)?;
    let right_record = load_record(&store, right)?;

    let report = diff_records(&left_record, &right_record);

    println!(
        "{} Comparing {} with {}\n",
        style("→").cyan().bold(),
        style(&report.left_id).dim(),
        style(&report.right_id).dim()
    );

    println!(
        "  {:<22}  {:<28}  {}",
        style("PROPERTY").bold(),
        style("LEFT").bold(),
        style("RIGHT").bold()
    );
    println!("  {}", "-".repeat(80));

    for row in &report.rows {
        let icon = if row.matches() {
            style("✓").green()
        } else {
            style("✗").red().bold()
        };
        println!(
            "{icon} {:<22}  {:<28}  {}",
            row.property, row.left, row.right
        );
    }

    let mismatches = report.mismatches().count();
    if report.is_identical() {
        println!(
            "\n{} Records describe the same experiment",
            style("✓").green().bold()
        );
    } else {
        println!(
            "\n{} {mismatches} propert{} differ",
            style("✗").red().bold(),
            if mismatches == 1 { "y" } else { "ies" },
        );
        println!("\n{}", style("Possible causes").bold());
        for explanation in explain_result_difference(&left_record, &right_record) {
            println!("  • {explanation}");
        }
    }

    Ok(())
}
