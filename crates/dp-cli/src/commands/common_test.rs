use super::*;
use std::fs;
use tempfile::TempDir;

fn global(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.display().to_string(),
        config: None,
        database: None,
    }
}

#[test]
fn test_load_project_without_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let project = load_project(&global(dir.path())).unwrap();
    assert_eq!(project.config.name, "dawnpost");
    assert_eq!(
        project.database_path(&global(dir.path())),
        dir.path().join("target/dawnpost.duckdb").display().to_string()
    );
    assert_eq!(project.migrations_dir(None), dir.path().join("migrations"));
}

#[test]
fn test_database_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("dawnpost.yml"),
        "name: bot\ndatabase:\n  path: target/bot.duckdb\n",
    )
    .unwrap();

    let mut args = global(dir.path());
    let project = load_project(&args).unwrap();
    assert_eq!(
        project.database_path(&args),
        dir.path().join("target/bot.duckdb").display().to_string()
    );

    args.database = Some(":memory:".to_string());
    assert_eq!(project.database_path(&args), ":memory:");
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let mut args = global(dir.path());
    args.config = Some(dir.path().join("missing.yml").display().to_string());
    assert!(load_project(&args).is_err());
}

#[test]
fn test_open_store_creates_parent_dir() {
    let dir = TempDir::new().unwrap();
    let mut args = global(dir.path());
    args.database = Some(dir.path().join("nested/state.duckdb").display().to_string());

    let project = load_project(&args).unwrap();
    project.open_store(&args).unwrap();
    assert!(dir.path().join("nested").is_dir());
}

#[test]
fn test_dir_flag_overrides_config_path() {
    let dir = TempDir::new().unwrap();
    let project = load_project(&global(dir.path())).unwrap();
    assert_eq!(project.migrations_dir(Some("other")), PathBuf::from("other"));
}
