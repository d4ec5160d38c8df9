use super::*;
use dp_db::DuckDbBackend;

fn name(s: &str) -> UnitName {
    UnitName::new(s)
}

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db);
    ledger.ensure_schema().await.unwrap();
    ledger.ensure_schema().await.unwrap();
    assert!(db.relation_exists(LEDGER_TABLE).await.unwrap());
}

#[tokio::test]
async fn test_record_then_has_applied() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db);
    ledger.ensure_schema().await.unwrap();

    assert!(!ledger.has_applied(&name("001_a")).await.unwrap());
    ledger.record_applied(&name("001_a")).await.unwrap();
    assert!(ledger.has_applied(&name("001_a")).await.unwrap());
    assert!(!ledger.has_applied(&name("002_b")).await.unwrap());
}

#[tokio::test]
async fn test_record_twice_is_unique_violation() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db);
    ledger.ensure_schema().await.unwrap();
    ledger.record_applied(&name("001_a")).await.unwrap();

    let err = ledger.record_applied(&name("001_a")).await.unwrap_err();
    assert!(err.is_unique_violation(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_entries_in_insertion_order() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db);
    ledger.ensure_schema().await.unwrap();
    for n in ["002_b", "001_a", "003_c"] {
        ledger.record_applied(&name(n)).await.unwrap();
    }

    let entries = ledger.entries().await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["002_b", "001_a", "003_c"]);
    assert!(entries.windows(2).all(|w| w[0].id < w[1].id));
    assert!(entries.iter().all(|e| e.executed_at <= Utc::now()));
}

#[tokio::test]
async fn test_entries_empty() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db);
    ledger.ensure_schema().await.unwrap();
    assert!(ledger.entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_has_applied_without_schema_fails() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db);
    let err = ledger.has_applied(&name("001_a")).await.unwrap_err();
    assert!(matches!(err, DbError::TableNotFound(_)));
}

#[test]
fn test_parse_timestamp_variants() {
    let utc = parse_timestamp("2024-03-08 09:00:00.123456+00").unwrap();
    assert_eq!(utc.to_rfc3339(), "2024-03-08T09:00:00.123456+00:00");

    let offset = parse_timestamp("2024-03-08 10:00:00+01").unwrap();
    assert_eq!(offset.to_rfc3339(), "2024-03-08T09:00:00+00:00");

    let naive = parse_timestamp("2024-03-08 09:00:00").unwrap();
    assert_eq!(naive.to_rfc3339(), "2024-03-08T09:00:00+00:00");

    assert!(parse_timestamp("yesterday").is_err());
}
