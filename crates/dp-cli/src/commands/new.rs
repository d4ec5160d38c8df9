//! New command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, NewArgs};
use crate::commands::common::load_project;

/// Execute the new command
pub async fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let dir = project.migrations_dir(args.dir.as_deref());

    let path = dp_migrate::scaffold::create_unit_file(
        &dir,
        &args.description,
        &project.config.migrations.suffix,
    )
    .with_context(|| format!("Failed to create migration in {}", dir.display()))?;

    println!("Created {}", path.display());
    Ok(())
}
