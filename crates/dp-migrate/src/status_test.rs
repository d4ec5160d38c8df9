use super::*;
use crate::runner::MigrationRunner;
use crate::source::StaticSource;
use dp_db::DuckDbBackend;

fn names(list: &[UnitName]) -> Vec<&str> {
    list.iter().map(|n| n.as_str()).collect()
}

#[tokio::test]
async fn test_status_fresh_database() {
    let db = DuckDbBackend::in_memory().unwrap();
    let source = StaticSource::from_pairs("t", [("001_a", "SELECT 1;"), ("002_b", "SELECT 1;")]);

    let st = status(&db, &source).await.unwrap();
    assert!(st.applied.is_empty());
    assert_eq!(names(&st.pending), vec!["001_a", "002_b"]);
    assert!(st.out_of_order.is_empty());
    assert!(!st.is_up_to_date());
}

#[tokio::test]
async fn test_status_after_run_is_up_to_date() {
    let db = DuckDbBackend::in_memory().unwrap();
    let runner = MigrationRunner::new(StaticSource::from_pairs(
        "t",
        [("001_a", "CREATE TABLE a (id INT);"), ("002_b", "CREATE TABLE b (id INT);")],
    ));
    runner.run(&db).await.unwrap();

    let st = runner.status(&db).await.unwrap();
    assert!(st.is_up_to_date());
    let applied: Vec<&str> = st.applied.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(applied, vec!["001_a", "002_b"]);
}

#[tokio::test]
async fn test_status_detects_orphans_and_out_of_order() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db);
    ledger.ensure_schema().await.unwrap();
    ledger.record_applied(&UnitName::new("000_removed")).await.unwrap();
    ledger.record_applied(&UnitName::new("003_c")).await.unwrap();

    let source = StaticSource::from_pairs(
        "t",
        [("001_a", "SELECT 1;"), ("003_c", "SELECT 1;"), ("004_d", "SELECT 1;")],
    );
    let st = status(&db, &source).await.unwrap();

    let orphaned: Vec<&str> = st.orphaned.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(orphaned, vec!["000_removed"]);
    assert_eq!(names(&st.pending), vec!["001_a", "004_d"]);
    assert_eq!(names(&st.out_of_order), vec!["001_a"]);
}

#[tokio::test]
async fn test_status_writes_no_ledger_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    let source = StaticSource::from_pairs("t", [("001_a", "CREATE TABLE a (id INT);")]);

    status(&db, &source).await.unwrap();
    assert!(Ledger::new(&db).entries().await.unwrap().is_empty());
    assert!(!db.relation_exists("a").await.unwrap());
}
