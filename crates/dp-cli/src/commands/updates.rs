//! Updates command implementation
//!
//! Opens the store the way the bot does at startup: the compiled-in schema
//! is migrated before any query runs.

use anyhow::{Context, Result};
use dp_state::DailyUpdates;

use crate::cli::{GlobalArgs, UpdatesCommand};
use crate::commands::common::{load_project, ExitCode};

/// Execute an updates subcommand
pub async fn execute(cmd: &UpdatesCommand, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = project.open_store(global)?;

    let report = dp_state::migrate(&db)
        .await
        .context("Failed to migrate the state schema")?;
    if !report.is_noop() {
        log::info!("Applied {} state migration(s)", report.applied_count());
    }

    let updates = DailyUpdates::new(&db);
    match cmd {
        UpdatesCommand::Latest { json } => {
            let latest = updates.latest().await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&latest)?);
            } else {
                match latest {
                    Some(update) => println!(
                        "{}  posted {}",
                        update.message_ts,
                        update.posted_at.format("%Y-%m-%d %H:%M:%S UTC")
                    ),
                    None => println!("No daily updates recorded"),
                }
            }
        }
        UpdatesCommand::Record { ts } => {
            updates.create(ts).await?;
            println!("Recorded daily update {ts}");
        }
        UpdatesCommand::Check { ts } => {
            if updates.is_daily(ts).await? {
                println!("{ts} is a daily update");
            } else {
                println!("{ts} is not a daily update");
                return Err(ExitCode(1).into());
            }
        }
    }
    Ok(())
}
