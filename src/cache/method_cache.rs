use crate::domain::payment_method::PaymentMethod;
use crate::error::Result;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-store copy of the method table that sync drops after every run.
#[async_trait::async_trait]
pub trait MethodListCache: Send + Sync {
    async fn get(&self, store_id: i64) -> Result<Option<Vec<PaymentMethod>>>;

    async fn put(&self, store_id: i64, methods: &[PaymentMethod]) -> Result<()>;

    async fn invalidate(&self, store_id: i64) -> Result<()>;
}

#[derive(Clone)]
pub struct MethodCache {
    pub client: redis::Client,
    pub ttl_secs: u64,
}

impl MethodCache {
    pub fn new(redis_url: &str, ttl_secs: u64) -> Result<Self> {
        Ok(Self {
            client: redis::Client::open(redis_url)?,
            ttl_secs,
        })
    }

    pub fn key(store_id: i64) -> String {
        format!("resursbank:methods:{}", store_id)
    }
}

#[async_trait::async_trait]
impl MethodListCache for MethodCache {
    async fn get(&self, store_id: i64) -> Result<Option<Vec<PaymentMethod>>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(Self::key(store_id)).await?;
        Ok(payload.and_then(|p| serde_json::from_str(&p).ok()))
    }

    async fn put(&self, store_id: i64, methods: &[PaymentMethod]) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload = serde_json::to_string(methods)?;
        let _: () = conn.set_ex(Self::key(store_id), payload, self.ttl_secs).await?;
        Ok(())
    }

    async fn invalidate(&self, store_id: i64) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: usize = conn.del(Self::key(store_id)).await?;
        Ok(())
    }
}

/// Process-local cache with an invalidation counter, for tests and mock runs.
#[derive(Clone, Default)]
pub struct InMemoryMethodCache {
    inner: Arc<RwLock<HashMap<i64, Vec<PaymentMethod>>>>,
    invalidations: Arc<AtomicUsize>,
}

impl InMemoryMethodCache {
    pub async fn contains(&self, store_id: i64) -> bool {
        self.inner.read().await.contains_key(&store_id)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MethodListCache for InMemoryMethodCache {
    async fn get(&self, store_id: i64) -> Result<Option<Vec<PaymentMethod>>> {
        Ok(self.inner.read().await.get(&store_id).cloned())
    }

    async fn put(&self, store_id: i64, methods: &[PaymentMethod]) -> Result<()> {
        self.inner.write().await.insert(store_id, methods.to_vec());
        Ok(())
    }

    async fn invalidate(&self, store_id: i64) -> Result<()> {
        self.inner.write().await.remove(&store_id);
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_scoped_per_store() {
        assert_eq!(MethodCache::key(3), "resursbank:methods:3");
        assert_ne!(MethodCache::key(1), MethodCache::key(2));
    }

    #[tokio::test]
    async fn in_memory_cache_drops_store_on_invalidate() {
        let cache = InMemoryMethodCache::default();
        cache.put(1, &[]).await.unwrap();
        cache.put(2, &[]).await.unwrap();

        cache.invalidate(1).await.unwrap();

        assert!(!cache.contains(1).await);
        assert!(cache.contains(2).await);
        assert_eq!(cache.invalidations(), 1);
    }
}
