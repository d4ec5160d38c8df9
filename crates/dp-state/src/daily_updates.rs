//! Queries over the `daily_updates` table.

use crate::error::{StateError, StateResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use dp_core::MessageTs;
use dp_db::Database;
use serde::Serialize;

/// A daily update message the bot has posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyUpdate {
    pub id: i64,
    pub message_ts: MessageTs,
    pub posted_at: DateTime<Utc>,
}

/// Daily-update queries over a borrowed store handle.
pub struct DailyUpdates<'a> {
    db: &'a dyn Database,
}

impl<'a> DailyUpdates<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// The most recently posted daily update, if any.
    pub async fn latest(&self) -> StateResult<Option<DailyUpdate>> {
        let rows = self
            .db
            .query_rows(
                "SELECT id, message_ts, CAST(posted_at AS VARCHAR) FROM daily_updates \
                 ORDER BY posted_at DESC, id DESC LIMIT 1",
                &[],
            )
            .await?;

        rows.into_iter().next().map(decode_row).transpose()
    }

    /// Record a daily update posted as message `ts`.
    pub async fn create(&self, ts: &MessageTs) -> StateResult<()> {
        match self
            .db
            .execute(
                "INSERT INTO daily_updates (message_ts) VALUES (?)",
                &[ts.as_str()],
            )
            .await
        {
            Ok(_) => {
                log::debug!("Recorded daily update {}", ts);
                Ok(())
            }
            Err(err) if err.is_unique_violation() => {
                Err(StateError::AlreadyRecorded(ts.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Whether the thread rooted at `ts` is a daily update.
    pub async fn is_daily(&self, ts: &MessageTs) -> StateResult<bool> {
        let found = self
            .db
            .query_one(
                "SELECT id FROM daily_updates WHERE message_ts = ?",
                &[ts.as_str()],
            )
            .await?;
        Ok(found.is_some())
    }
}

fn decode_row(row: Vec<String>) -> StateResult<DailyUpdate> {
    let [id, message_ts, posted_at]: [String; 3] = row
        .try_into()
        .map_err(|row: Vec<String>| StateError::CorruptRow(format!("expected 3 columns, got {}", row.len())))?;

    Ok(DailyUpdate {
        id: id
            .parse()
            .map_err(|_| StateError::CorruptRow(format!("id '{id}' is not an integer")))?,
        message_ts: MessageTs::parse(message_ts).map_err(|e| StateError::CorruptRow(e.to_string()))?,
        posted_at: parse_posted_at(&posted_at)?,
    })
}

fn parse_posted_at(value: &str) -> StateResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| StateError::CorruptRow(format!("posted_at '{value}': {e}")))
}

#[cfg(test)]
#[path = "daily_updates_test.rs"]
mod tests;
