//! dp-core - Core library for Dawnpost
//!
//! This crate provides the project configuration (`dawnpost.yml`), the core
//! error type, and the strongly-typed names shared by the store, migration,
//! and state crates.

pub mod config;
pub mod error;
pub mod message_ts;
pub mod unit_name;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use message_ts::MessageTs;
pub use unit_name::UnitName;
