//! Validate command implementation.

use anyhow::Result;
use console::style;
use qprov_analysis::validation::{validate_for_publication, validate_record, IssueLevel};

use super::common::{load_record, open_store};

/// Execute the validate command.
pub fn execute(reference: &str, publication: bool) -> Result<()> {
    let store = open_store();
    let record = load_record(&store, reference)?;

    let report = if publication {
        validate_for_publication(&record)
    } else {
        validate_record(&record)
    };

    let verdict = if report.is_complete {
        style("PASS").green().bold()
    } else if report.is_valid {
        style("WARNINGS").yellow().bold()
    } else {
        style("FAIL").red().bold()
    };
    println!(
        "{} {verdict} {}",
        style("→").cyan().bold(),
        style(&record.id).dim()
    );
    println!("  {}\n", report.summary);

    for issue in &report.issues {
        let tag = match issue.level {
            IssueLevel::Error => style("error  ").red().bold(),
            IssueLevel::Warning => style("warning").yellow(),
            IssueLevel::Info => style("info   ").cyan(),
        };
        println!("  {tag} [{}] {}", issue.category, issue.message);
        println!("          Fix: {}", style(&issue.fix).dim());
    }

    if !report.issues.is_empty() {
        println!(
            "\n  {} error(s) | {} warning(s) | {} info",
            report.error_count(),
            report.warning_count(),
            report.info_count(),
        );
    }

    if !report.is_valid {
        std::process::exit(1);
    }

    Ok(())
}
