use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Cache keys for the reference-data lookups worth caching.
///
/// Match requests are never cached; the store may be reseeded at any time.
#[derive(Debug, Clone)]
pub enum CacheKey<'a> {
    /// A breed resolved by id (catalog or store).
    Breed(&'a str),
    /// The review list for one breed.
    Reviews(&'a str),
}

impl CacheKey<'_> {
    pub fn render(&self) -> String {
        match self {
            CacheKey::Breed(id) => format!("paw:breed:{}", id),
            CacheKey::Reviews(breed) => format!("paw:reviews:{}", breed),
        }
    }
}

/// Two-tier cache: moka in-process (L1) in front of Redis (L2).
///
/// L1 absorbs hot lookups on a single instance; L2 is shared across
/// instances. Both tiers carry the same TTL.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, String>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a new cache manager
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Look up a value, L1 first, then L2. A miss is `Ok(None)`, not an
    /// error: callers fall through to the source of truth.
    pub async fn get<T>(&self, key: &CacheKey<'_>) -> Result<Option<T>, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let key = key.render();

        if let Some(json) = self.l1_cache.get(&key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(Some(serde_json::from_str(&json)?));
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(&key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                self.l1_cache.insert(key, json.clone()).await;
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Ok(None)
            }
        }
    }

    /// Write a value through both tiers.
    pub async fn set<T>(&self, key: &CacheKey<'_>, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let key = key.render();
        let json = serde_json::to_string(value)?;

        self.l1_cache.insert(key.clone(), json.clone()).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(&key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop a value from both tiers.
    pub async fn delete(&self, key: &CacheKey<'_>) -> Result<(), CacheError> {
        let key = key.render();
        self.l1_cache.invalidate(&key).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("DEL")
            .arg(&key)
            .query_async::<()>(&mut *conn)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys_are_namespaced() {
        assert_eq!(CacheKey::Breed("dog_golden").render(), "paw:breed:dog_golden");
        assert_eq!(
            CacheKey::Reviews("Greyhound").render(),
            "paw:reviews:Greyhound"
        );
    }
}
