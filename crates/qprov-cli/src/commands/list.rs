//! List command implementation.

use anyhow::Result;
use console::style;

use super::common::open_store;

/// Execute the list command.
pub fn execute(limit: usize) -> Result<()> {
    let store = open_store();
    let records = store.list_recent(limit)?;

    if records.is_empty() {
        println!("No records found in {}.", store.root().display());
        return Ok(());
    }

    println!("{} {} record(s):\n", style("→").cyan().bold(), records.len());

    println!(
        "  {:<24}  {:<16}  {:<18}  {:<8}  {}",
        style("RECORD ID").bold(),
        style("CREATED").bold(),
        style("BACKEND").bold(),
        style("SHOTS").bold(),
        style("NAME").bold()
    );
    println!("  {}", "-".repeat(86));

    for record in &records {
        let backend = record.hardware.as_ref().map_or("-", |h| h.backend.as_str());
        let shots = record
            .execution
            .as_ref()
            .map_or_else(|| "-".to_string(), |e| e.shots.to_string());
        let name = record.metadata.name.as_deref().unwrap_or("-");

        println!(
            "  {:<24}  {:<16}  {:<18}  {:<8}  {}",
            style(&record.id).dim(),
            record.created_at.format("%Y-%m-%d %H:%M"),
            backend,
            shots,
            name,
        );
    }

    Ok(())
}
