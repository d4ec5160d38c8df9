//! Relational state kept by the Dawnpost bot.
//!
//! The only persisted fact is which chat messages are daily updates: the
//! scheduler records each one it posts, and the reply listener checks thread
//! roots against it.

pub mod daily_updates;
pub mod error;
pub mod schema;

pub use daily_updates::{DailyUpdate, DailyUpdates};
pub use error::{StateError, StateResult};
pub use schema::{migrate, runner, MIGRATIONS};
