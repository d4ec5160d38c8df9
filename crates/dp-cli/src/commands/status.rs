//! Status command implementation

use anyhow::{Context, Result};
use dp_migrate::MigrationStatus;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::load_project;

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = project.open_store(global)?;
    let runner = project.runner(&args.source);

    let status = runner
        .status(&db)
        .await
        .with_context(|| format!("Failed to read status for {}", runner.source().describe()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print!("{}", render(&status));
    }
    Ok(())
}

fn render(status: &MigrationStatus) -> String {
    let mut out = String::new();

    for entry in &status.applied {
        out.push_str(&format!(
            "  applied   {}  ({})\n",
            entry.name,
            entry.executed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    for name in &status.pending {
        let marker = if status.out_of_order.contains(name) {
            "  (out of order)"
        } else {
            ""
        };
        out.push_str(&format!("  pending   {name}{marker}\n"));
    }
    for entry in &status.orphaned {
        out.push_str(&format!("  orphaned  {}  (no file)\n", entry.name));
    }

    out.push('\n');
    if status.is_up_to_date() {
        out.push_str(&format!("Up to date ({} applied)\n", status.applied.len()));
    } else {
        out.push_str(&format!(
            "{} pending, {} applied\n",
            status.pending.len(),
            status.applied.len()
        ));
    }
    out
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
