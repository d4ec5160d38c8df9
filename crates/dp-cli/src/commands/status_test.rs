use super::*;
use dp_core::UnitName;
use dp_migrate::LedgerEntry;

fn entry(id: i64, name: &str) -> LedgerEntry {
    LedgerEntry {
        id,
        name: UnitName::new(name),
        executed_at: "2024-03-08T09:00:00Z".parse().unwrap(),
    }
}

#[test]
fn test_render_up_to_date() {
    let status = MigrationStatus {
        applied: vec![entry(1, "001_a")],
        ..Default::default()
    };
    let out = render(&status);
    assert!(out.contains("applied   001_a  (2024-03-08 09:00:00 UTC)"));
    assert!(out.ends_with("Up to date (1 applied)\n"));
}

#[test]
fn test_render_marks_out_of_order_and_orphans() {
    let status = MigrationStatus {
        applied: vec![entry(1, "001_a"), entry(2, "003_c")],
        pending: vec![UnitName::new("002_b"), UnitName::new("004_d")],
        orphaned: vec![entry(3, "000_gone")],
        out_of_order: vec![UnitName::new("002_b")],
    };
    let out = render(&status);
    assert!(out.contains("pending   002_b  (out of order)\n"));
    assert!(out.contains("pending   004_d\n"));
    assert!(out.contains("orphaned  000_gone  (no file)"));
    assert!(out.ends_with("2 pending, 2 applied\n"));
}
