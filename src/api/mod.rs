//! API Module
//!
//! HTTP handlers and routing for the cache front-end.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /has/:key` - Check whether a key is live
//! - `DELETE /del/:key` - Delete a key
//! - `GET /entries` - List live entries, oldest first
//! - `DELETE /clear` - Drop every entry
//! - `POST /cleanup` - Force an expiration sweep
//! - `GET /stats` - Get cache statistics
//! - `GET /id` - Mint a snowflake id
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
