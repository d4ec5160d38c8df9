//! Migrate command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::load_project;

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = project.open_store(global)?;
    let runner = project.runner(&args.source);

    log::info!("Running migrations from {}", runner.source().describe());
    let report = runner
        .run(&db)
        .await
        .with_context(|| format!("Migration failed for {}", runner.source().describe()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for name in &report.applied {
        println!("  applied  {name}");
    }
    if global.verbose {
        for name in &report.skipped {
            println!("  skipped  {name}");
        }
    }

    if report.is_noop() {
        println!("Nothing to apply ({} already applied)", report.skipped.len());
    } else {
        println!(
            "Applied {} migration{} ({} already applied)",
            report.applied_count(),
            if report.applied_count() == 1 { "" } else { "s" },
            report.skipped.len()
        );
    }
    Ok(())
}
