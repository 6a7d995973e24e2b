//! Request and Response models for the cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

// Re-export commonly used types
pub use requests::{validate_key, SetRequest};
pub use responses::{
    DeleteResponse, EntriesResponse, EntryItem, GetResponse, HasResponse, HealthResponse,
    IdResponse, MaintenanceResponse, SetResponse, StatsResponse,
};
