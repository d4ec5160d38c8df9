//! Store wrappers that inject failures and count writes around a real
//! in-memory DuckDB backend.

use async_trait::async_trait;
use dp_db::{Database, DbError, DbResult, DuckDbBackend};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type MakeError = fn(String) -> DbError;

pub struct ScriptedStore {
    pub inner: DuckDbBackend,
    fail_when: Option<(&'static str, MakeError)>,
    stale_names: Mutex<HashSet<String>>,
    begins: AtomicUsize,
    writes: AtomicUsize,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self {
            inner: DuckDbBackend::in_memory().unwrap(),
            fail_when: None,
            stale_names: Mutex::new(HashSet::new()),
            begins: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Fail any write whose SQL contains `needle`.
    pub fn fail_when(mut self, needle: &'static str, make: MakeError) -> Self {
        self.fail_when = Some((needle, make));
        self
    }

    /// Report `name` as absent from the ledger on its first lookup only,
    /// like a check made just before another runner commits it.
    pub fn stale_lookup(self, name: &str) -> Self {
        self.stale_names.lock().unwrap().insert(name.to_string());
        self
    }

    pub fn begins(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self, sql: &str) -> DbResult<()> {
        match self.fail_when {
            Some((needle, make)) if sql.contains(needle) => Err(make(format!("injected: {sql}"))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Database for ScriptedStore {
    async fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check(sql)?;
        self.inner.execute(sql, params).await
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        if !sql.contains("IF NOT EXISTS migrations") {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        self.check(sql)?;
        self.inner.execute_batch(sql).await
    }

    async fn query_one(&self, sql: &str, params: &[&str]) -> DbResult<Option<String>> {
        if sql.contains("FROM migrations WHERE name") {
            if let Some(name) = params.first() {
                if self.stale_names.lock().unwrap().remove(*name) {
                    return Ok(None);
                }
            }
        }
        self.inner.query_one(sql, params).await
    }

    async fn query_rows(&self, sql: &str, params: &[&str]) -> DbResult<Vec<Vec<String>>> {
        self.inner.query_rows(sql, params).await
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.inner.relation_exists(name).await
    }

    async fn begin(&self) -> DbResult<()> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        self.inner.begin().await
    }

    async fn commit(&self) -> DbResult<()> {
        self.inner.commit().await
    }

    async fn rollback(&self) -> DbResult<()> {
        self.inner.rollback().await
    }

    fn db_type(&self) -> &'static str {
        "scripted-duckdb"
    }
}

/// Write unit files into `dir`.
pub fn write_units(dir: &std::path::Path, units: &[(&str, &str)]) {
    for (file, body) in units {
        std::fs::write(dir.join(file), body).unwrap();
    }
}
