//! Score command implementation.

use anyhow::Result;
use console::style;
use qprov_analysis::score::{compute_score, ComponentStatus, Grade};

use super::common::{load_record, open_store};

/// Execute the score command.
pub fn execute(reference: &str) -> Result<()> {
    let store = open_store();
    let record = load_record(&store, reference)?;
    let score = compute_score(&record);

    println!(
        "{} Reproducibility score for {}\n",
        style("→").cyan().bold(),
        style(&record.id).dim()
    );

    let grade = match score.grade {
        Grade::Excellent => style(score.grade.to_string()).green().bold(),
        Grade::Good => style(score.grade.to_string()).green(),
        Grade::Fair => style(score.grade.to_string()).yellow(),
        Grade::Poor | Grade::Critical => style(score.grade.to_string()).red().bold(),
    };
    println!(
        "  Total: {} ({grade})",
        style(format!("{}/{}", score.total_score, score.max_score)).bold(),
    );
    if score.is_reproducible() {
        println!("  {}", style("Meets the reproducibility bar").green());
    } else {
        println!("  {}", style("Below the reproducibility bar").red());
    }
    println!();

    println!(
        "  {:<18}  {:>7}  {}",
        style("CATEGORY").bold(),
        style("POINTS").bold(),
        style("STATUS").bold()
    );
    println!("  {}", "-".repeat(40));

    for component in &score.components {
        let icon = match component.status {
            ComponentStatus::Complete => style("●").green(),
            ComponentStatus::Partial => style("◐").yellow(),
            ComponentStatus::Missing => style("○").red(),
        };
        println!(
            "  {icon} {:<16}  {:>3}/{:<3}  {:.0}%",
            component.name,
            component.earned_points,
            component.max_points,
            component.percentage(),
        );
    }

    if !score.recommendations.is_empty() {
        println!("\n{}", style("Recommendations").bold());
        for recommendation in &score.recommendations {
            println!("  • {recommendation}");
        }
    }

    Ok(())
}
