//! Delete command implementation.
//!
//! The only mutating command: removes one record from the store.

use anyhow::Result;
use console::style;

use super::common::{load_record, open_store};

/// Execute the delete command.
pub fn execute(reference: &str) -> Result<()> {
    let store = open_store();
    let record = load_record(&store, reference)?;

    if store.delete(&record.id)? {
        println!(
            "{} Deleted record {}",
            style("→").cyan().bold(),
            style(&record.id).dim()
        );
    } else {
        println!(
            "Record {} is not in the store (loaded from a file?); nothing deleted.",
            style(&record.id).dim()
        );
    }

    Ok(())
}
