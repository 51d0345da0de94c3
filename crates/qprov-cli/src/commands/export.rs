//! Export command implementation.

use anyhow::{Context, Result};
use console::style;
use qprov_export::{export_record, ExportFormat};

use super::common::{load_record, open_store};

/// Execute the export command.
pub fn execute(reference: &str, format: &str, output: Option<&str>) -> Result<()> {
    let store = open_store();
    let record = load_record(&store, reference)?;

    let format: ExportFormat = format.parse()?;
    let rendered = export_record(&record, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write '{path}'"))?;
            println!(
                "{} Exported {} as {} to {}",
                style("→").cyan().bold(),
                style(&record.id).dim(),
                style(format.to_string()).cyan(),
                path,
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
