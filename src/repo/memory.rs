//! In-process implementations of the store traits, used by the mock
//! adapter setup and by tests.

use crate::domain::credentials::Credentials;
use crate::domain::order::Order;
use crate::domain::payment_method::PaymentMethod;
use crate::error::{GatewayError, Result};
use crate::repo::store::{CartRebuilder, CredentialsStore, MethodStore, OrderReader};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryCredentialsStore {
    inner: Arc<RwLock<BTreeMap<i64, Credentials>>>,
}

#[async_trait::async_trait]
impl CredentialsStore for InMemoryCredentialsStore {
    async fn find_for_store(&self, store_id: i64) -> Result<Option<Credentials>> {
        Ok(self.inner.read().await.get(&store_id).cloned())
    }

    async fn list_configured(&self) -> Result<Vec<(i64, Credentials)>> {
        Ok(self
            .inner
            .read()
            .await
            .iter()
            .map(|(id, creds)| (*id, creds.clone()))
            .collect())
    }

    async fn save(&self, store_id: i64, credentials: &Credentials) -> Result<()> {
        self.inner.write().await.insert(store_id, credentials.clone());
        Ok(())
    }
}

/// Method table; writes can be switched to fail while reads keep working.
#[derive(Clone, Default)]
pub struct InMemoryMethodStore {
    inner: Arc<RwLock<BTreeMap<(i64, String), PaymentMethod>>>,
    failing_writes: Arc<AtomicBool>,
}

impl InMemoryMethodStore {
    pub fn set_failing_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Storage("method table unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MethodStore for InMemoryMethodStore {
    async fn list_by_store(&self, store_id: i64) -> Result<Vec<PaymentMethod>> {
        let mut out: Vec<PaymentMethod> = self
            .inner
            .read()
            .await
            .values()
            .filter(|m| m.store_id == store_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.code.cmp(&b.code)));
        Ok(out)
    }

    async fn find_by_code(&self, store_id: i64, code: &str) -> Result<Option<PaymentMethod>> {
        Ok(self
            .inner
            .read()
            .await
            .get(&(store_id, code.to_string()))
            .cloned())
    }

    async fn upsert(&self, method: &PaymentMethod) -> Result<()> {
        self.check_writable()?;
        self.inner
            .write()
            .await
            .insert((method.store_id, method.code.clone()), method.clone());
        Ok(())
    }

    async fn set_active(&self, store_id: i64, code: &str, active: bool) -> Result<()> {
        self.check_writable()?;
        if let Some(m) = self.inner.write().await.get_mut(&(store_id, code.to_string())) {
            m.active = active;
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryOrders {
    inner: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrders {
    pub async fn insert(&self, order: Order) {
        let key = order.increment_id.clone().unwrap_or_default();
        self.inner.write().await.insert(key, order);
    }
}

#[async_trait::async_trait]
impl OrderReader for InMemoryOrders {
    async fn find_by_increment_id(&self, increment_id: &str) -> Result<Option<Order>> {
        Ok(self.inner.read().await.get(increment_id).cloned())
    }
}

/// Records rebuilt carts; can be switched to fail every rebuild.
#[derive(Clone, Default)]
pub struct InMemoryCarts {
    carts: Arc<RwLock<BTreeMap<i64, Order>>>,
    next_id: Arc<AtomicI64>,
    failing: Arc<AtomicBool>,
}

impl InMemoryCarts {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn rebuilt_count(&self) -> usize {
        self.carts.read().await.len()
    }

    pub async fn cart(&self, cart_id: i64) -> Option<Order> {
        self.carts.read().await.get(&cart_id).cloned()
    }
}

#[async_trait::async_trait]
impl CartRebuilder for InMemoryCarts {
    async fn rebuild_from_order(&self, order: &Order) -> Result<i64> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Storage("cart storage unavailable".to_string()));
        }
        let cart_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.carts.write().await.insert(cart_id, order.clone());
        Ok(cart_id)
    }
}
