use anyhow::Result;
use redis::Client as RedisClient;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

async fn try_get(redis: &RedisClient, key: &str) -> Result<Option<String>> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
    Ok(value)
}

async fn try_put(redis: &RedisClient, key: &str, payload: String, ttl_secs: u64) -> Result<()> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    redis::cmd("SET")
        .arg(key)
        .arg(payload)
        .arg("EX")
        .arg(ttl_secs)
        .query_async::<_, ()>(&mut conn)
        .await?;
    Ok(())
}

/// Reads and decodes a cached JSON value. Misses, Redis errors and stale
/// payloads that no longer decode all come back as `None`.
pub async fn get_json<T: DeserializeOwned>(redis: &RedisClient, key: &str) -> Option<T> {
    match try_get(redis, key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undecodable cache entry {key}: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("Cache read failed for {key}: {e}");
            None
        }
    }
}

/// Stores a JSON value with a TTL. Failures are logged and ignored.
pub async fn put_json<T: Serialize>(redis: &RedisClient, key: &str, value: &T, ttl_secs: u64) {
    let payload = match serde_json::to_string(value) {
        Ok(p) => p,
        Err(e) => {
            warn!("Not caching {key}: {e}");
            return;
        }
    };
    if let Err(e) = try_put(redis, key, payload, ttl_secs).await {
        warn!("Cache write failed for {key}: {e}");
    }
}
