//! ID Module
//!
//! Snowflake-style unique id generation.

mod snowflake;

pub use snowflake::{decompose, SnowflakeGenerator, SnowflakeParts, EPOCH_MS, MAX_WORKER_ID};
