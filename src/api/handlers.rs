//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::cache::BoundedCache;
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};
use crate::id::SnowflakeGenerator;
use crate::models::{
    validate_key, DeleteResponse, EntriesResponse, EntryItem, GetResponse, HasResponse,
    HealthResponse, IdResponse, MaintenanceResponse, SetRequest, SetResponse, StatsResponse,
};

/// Cache type served over HTTP.
pub type JsonCache = BoundedCache<String, Value>;

/// Application state shared across all handlers.
///
/// The cache has no internal locking, so every handler goes through the
/// RwLock. Reads that touch recency or sweep expired entries still need
/// the write half.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<JsonCache>>,
    pub ids: Arc<Mutex<SnowflakeGenerator>>,
}

impl AppState {
    /// Creates a new AppState from an existing cache and id generator.
    pub fn new(cache: JsonCache, ids: SnowflakeGenerator) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            ids: Arc::new(Mutex::new(ids)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        let cache = BoundedCache::with_options(config.max_entries, config.cache_options())?;
        let ids = SnowflakeGenerator::new(config.worker_id)?;
        Ok(Self::new(cache, ids))
    }
}

fn check_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(message) => Err(ApiError::InvalidRequest(message)),
        None => Ok(()),
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    if !cache.set(req.key.clone(), req.value, req.ttl_ms) {
        return Err(ApiError::ValueTooLarge(req.key));
    }

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Takes the write lock: a hit moves the key to the newest position.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    check_key(&key)?;

    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;
    let ttl_remaining_ms = cache.ttl_remaining_ms(&key);

    Ok(Json(GetResponse::new(key, value, ttl_remaining_ms)))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    check_key(&key)?;

    let exists = state.cache.write().await.has(&key);
    Ok(Json(HasResponse { key, exists }))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    check_key(&key)?;

    let mut cache = state.cache.write().await;
    if !cache.delete(&key) {
        return Err(ApiError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /entries
pub async fn entries_handler(State(state): State<AppState>) -> Json<EntriesResponse> {
    let mut cache = state.cache.write().await;
    let entries = cache
        .entries()
        .map(|(key, value)| EntryItem { key, value })
        .collect();

    Json(EntriesResponse::new(entries))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<MaintenanceResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.size();
    cache.clear();

    Json(MaintenanceResponse { removed, size: 0 })
}

/// Handler for POST /cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<MaintenanceResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.force_cleanup();
    let size = cache.size();

    Json(MaintenanceResponse { removed, size })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(cache.stats(), cache.capacity()))
}

/// Handler for GET /id
pub async fn id_handler(State(state): State<AppState>) -> Json<IdResponse> {
    let id = state.ids.lock().await.next_id();
    Json(IdResponse::new(id))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheOptions, ManualClock};
    use serde_json::json;

    fn test_state(options: CacheOptions) -> (AppState, ManualClock) {
        let clock = ManualClock::new(1_800_000_000_000);
        let cache = BoundedCache::with_clock(100, options, Arc::new(clock.clone())).unwrap();
        let ids = SnowflakeGenerator::with_clock(5, Arc::new(clock.clone())).unwrap();
        (AppState::new(cache, ids), clock)
    }

    fn set_request(key: &str, value: Value, ttl_ms: Option<i64>) -> Json<SetRequest> {
        Json(SetRequest {
            key: key.to_string(),
            value,
            ttl_ms,
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let (state, _) = test_state(CacheOptions::default());

        let result = set_handler(
            State(state.clone()),
            set_request("test_key", json!({"a": 1}), Some(500)),
        )
        .await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"a": 1}));
        assert_eq!(response.ttl_remaining_ms, Some(500));
    }

    #[tokio::test]
    async fn test_get_expired_key() {
        let (state, clock) = test_state(CacheOptions::default());

        set_handler(State(state.clone()), set_request("k", json!("v"), Some(10)))
            .await
            .unwrap();
        clock.advance(11);

        let result = get_handler(State(state), Path("k".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_oversized_value() {
        let (state, _) = test_state(CacheOptions::default().with_max_entry_bytes(4));

        let result = set_handler(State(state.clone()), set_request("k", json!("too long"), None)).await;
        assert!(matches!(result, Err(ApiError::ValueTooLarge(_))));

        let has = has_handler(State(state), Path("k".to_string())).await.unwrap();
        assert!(!has.exists);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let (state, _) = test_state(CacheOptions::default());

        set_handler(State(state.clone()), set_request("to_delete", json!(1), None))
            .await
            .unwrap();

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());

        let result = delete_handler(State(state), Path("to_delete".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_entries_and_clear_handlers() {
        let (state, _) = test_state(CacheOptions::default());

        for key in ["a", "b"] {
            set_handler(State(state.clone()), set_request(key, json!(key), None))
                .await
                .unwrap();
        }

        let listing = entries_handler(State(state.clone())).await;
        assert_eq!(listing.count, 2);
        assert_eq!(listing.entries[0].key, "a");

        let cleared = clear_handler(State(state.clone())).await;
        assert_eq!(cleared.removed, 2);
        assert_eq!(entries_handler(State(state)).await.count, 0);
    }

    #[tokio::test]
    async fn test_cleanup_handler() {
        let (state, clock) = test_state(CacheOptions::default());

        set_handler(State(state.clone()), set_request("short", json!(1), Some(5)))
            .await
            .unwrap();
        set_handler(State(state.clone()), set_request("long", json!(2), None))
            .await
            .unwrap();
        clock.advance(10);

        let swept = cleanup_handler(State(state)).await;
        assert_eq!(swept.removed, 1);
        assert_eq!(swept.size, 1);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (state, _) = test_state(CacheOptions::default());

        let response = stats_handler(State(state)).await;
        assert_eq!(response.stats.hits, 0);
        assert_eq!(response.capacity, 100);
    }

    #[tokio::test]
    async fn test_id_handler_is_unique() {
        let (state, _) = test_state(CacheOptions::default());

        let first = id_handler(State(state.clone())).await;
        let second = id_handler(State(state)).await;
        assert_ne!(first.id, second.id);
        assert_eq!(first.parts.worker_id, 5);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let (state, _) = test_state(CacheOptions::default());

        let result = set_handler(State(state), set_request("", json!(1), None)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
