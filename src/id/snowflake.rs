//! Snowflake ID Generator
//!
//! 64-bit, roughly time-ordered ids built from a millisecond timestamp, a
//! worker id and a per-millisecond sequence.
//!
//! ```text
//! | 1 bit unused | 41 bits ms since epoch | 10 bits worker | 12 bits sequence |
//! ```

use std::sync::Arc;

use serde::Serialize;

use crate::cache::{Clock, SystemClock};
use crate::error::ConfigError;

// == Layout Constants ==
/// Custom epoch: 2024-01-01T00:00:00Z in Unix milliseconds
pub const EPOCH_MS: u64 = 1_704_067_200_000;

const WORKER_ID_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const TIMESTAMP_BITS: u32 = 41;

/// Largest accepted worker id
pub const MAX_WORKER_ID: u16 = (1 << WORKER_ID_BITS) - 1;

const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;
const MAX_TIMESTAMP: u64 = (1 << TIMESTAMP_BITS) - 1;
const WORKER_ID_SHIFT: u32 = SEQUENCE_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS;

// == Snowflake Parts ==
/// Decoded fields of an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnowflakeParts {
    /// Unix milliseconds
    pub timestamp_ms: u64,
    pub worker_id: u16,
    pub sequence: u16,
}

/// Splits an id into its fields.
pub fn decompose(id: u64) -> SnowflakeParts {
    SnowflakeParts {
        timestamp_ms: ((id >> TIMESTAMP_SHIFT) & MAX_TIMESTAMP) + EPOCH_MS,
        worker_id: ((id >> WORKER_ID_SHIFT) & MAX_WORKER_ID as u64) as u16,
        sequence: (id & MAX_SEQUENCE) as u16,
    }
}

// == Snowflake Generator ==
/// Explicitly owned id generator. Each worker in a deployment needs its own
/// worker id.
///
/// Ids from one generator are strictly increasing. When the sequence runs
/// out within a millisecond, or the clock steps backwards, the generator
/// keeps counting from its last timestamp instead of waiting.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_id: u16,
    clock: Arc<dyn Clock>,
    /// Milliseconds since `EPOCH_MS` of the last id
    last_timestamp: u64,
    sequence: u64,
}

impl SnowflakeGenerator {
    /// Creates a generator reading wall-clock time.
    pub fn new(worker_id: u16) -> Result<Self, ConfigError> {
        Self::with_clock(worker_id, Arc::new(SystemClock))
    }

    /// Creates a generator with an explicit time source.
    ///
    /// # Errors
    /// `ConfigError::InvalidWorkerId` when `worker_id` exceeds 10 bits.
    pub fn with_clock(worker_id: u16, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        if worker_id > MAX_WORKER_ID {
            return Err(ConfigError::InvalidWorkerId(worker_id));
        }

        Ok(Self {
            worker_id,
            clock,
            last_timestamp: 0,
            sequence: 0,
        })
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    // == Next Id ==
    /// Produces the next id.
    pub fn next_id(&mut self) -> u64 {
        let now = self.clock.now_ms().saturating_sub(EPOCH_MS) & MAX_TIMESTAMP;

        if now > self.last_timestamp {
            self.last_timestamp = now;
            self.sequence = 0;
        } else if self.sequence < MAX_SEQUENCE {
            self.sequence += 1;
        } else {
            // Sequence exhausted: borrow the next millisecond
            self.last_timestamp += 1;
            self.sequence = 0;
        }

        (self.last_timestamp << TIMESTAMP_SHIFT)
            | ((self.worker_id as u64) << WORKER_ID_SHIFT)
            | self.sequence
    }
}
