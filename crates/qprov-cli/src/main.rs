//! qprov Command-Line Interface
//!
//! Inspection and analysis of captured provenance records. Every
//! subcommand except `delete` is read-only over the trace store.

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{delete, diff, drift, export, list, score, show, validate, version};

/// qprov - quantum experiment provenance capture and analysis
#[derive(Parser)]
#[command(name = "qprov")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List captured records, newest first
    List {
        /// Maximum number of records to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Show one record in full
    Show {
        /// Record ID, unique ID prefix, or path to a record file
        record: String,
    },

    /// Export a record to an interchange format
    Export {
        /// Record ID, unique ID prefix, or path to a record file
        record: String,

        /// Output format (json, cyclonedx, spdx, yaml)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Score a record for reproducibility
    Score {
        /// Record ID, unique ID prefix, or path to a record file
        record: String,
    },

    /// Analyze calibration drift since a record was captured
    Drift {
        /// Record ID, unique ID prefix, or path to a record file
        record: String,

        /// Newer record whose calibration to compare against
        #[arg(short, long)]
        against: Option<String>,
    },

    /// Compare two records property by property
    Diff {
        /// First record
        left: String,

        /// Second record
        right: String,
    },

    /// Validate a record for completeness
    Validate {
        /// Record ID, unique ID prefix, or path to a record file
        record: String,

        /// Apply the stricter publication checks
        #[arg(long)]
        publication: bool,
    },

    /// Delete a record from the store
    Delete {
        /// Record ID or unique ID prefix
        record: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::List { limit } => list::execute(limit),

        Commands::Show { record } => show::execute(&record),

        Commands::Export {
            record,
            format,
            output,
        } => export::execute(&record, &format, output.as_deref()),

        Commands::Score { record } => score::execute(&record),

        Commands::Drift { record, against } => drift::execute(&record, against.as_deref()),

        Commands::Diff { left, right } => diff::execute(&left, &right),

        Commands::Validate {
            record,
            publication,
        } => validate::execute(&record, publication),

        Commands::Delete { record } => delete::execute(&record),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
