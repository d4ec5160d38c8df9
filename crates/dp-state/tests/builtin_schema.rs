//! The compiled-in units and the on-disk `migrations/` directory describe
//! the same schema and share one ledger.

use dp_core::MessageTs;
use dp_db::{Database, DuckDbBackend};
use dp_migrate::{Ledger, MigrationRunner};
use dp_state::{migrate, DailyUpdates, MIGRATIONS};
use std::path::PathBuf;

fn workspace_migrations() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../migrations")
}

#[tokio::test]
async fn builtin_units_are_idempotent() {
    let db = DuckDbBackend::in_memory().unwrap();

    let first = migrate(&db).await.unwrap();
    assert_eq!(first.applied_count(), MIGRATIONS.len());

    let second = migrate(&db).await.unwrap();
    assert!(second.is_noop());
    assert_eq!(second.skipped.len(), MIGRATIONS.len());
    assert!(db.relation_exists("daily_updates").await.unwrap());
}

#[tokio::test]
async fn directory_run_after_builtin_run_is_noop() {
    let db = DuckDbBackend::in_memory().unwrap();
    migrate(&db).await.unwrap();

    let report = MigrationRunner::from_dir(workspace_migrations())
        .run(&db)
        .await
        .unwrap();
    assert!(report.is_noop());
}

#[tokio::test]
async fn builtin_names_match_directory() {
    let db = DuckDbBackend::in_memory().unwrap();
    MigrationRunner::from_dir(workspace_migrations())
        .run(&db)
        .await
        .unwrap();

    let recorded: Vec<String> = Ledger::new(&db)
        .entries()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name.into_inner())
        .collect();
    let builtin: Vec<&str> = MIGRATIONS.iter().map(|u| u.name).collect();
    assert_eq!(recorded, builtin);
}

#[tokio::test]
async fn daily_update_flow_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.duckdb");
    let ts = MessageTs::parse("1709913600.000100").unwrap();

    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        migrate(&db).await.unwrap();
        DailyUpdates::new(&db).create(&ts).await.unwrap();
    }

    let db = DuckDbBackend::from_path(&path).unwrap();
    assert!(migrate(&db).await.unwrap().is_noop());
    let latest = DailyUpdates::new(&db).latest().await.unwrap().unwrap();
    assert_eq!(latest.message_ts, ts);
    assert!(DailyUpdates::new(&db).is_daily(&ts).await.unwrap());
}
