use crate::cache::method_cache::MethodListCache;
use crate::domain::payment_method::PaymentMethod;
use crate::error::{GatewayError, Result};
use crate::repo::store::MethodStore;
use std::sync::Arc;

/// Read side of the method table: checkout listing, titles, admin widget.
#[derive(Clone)]
pub struct MethodCatalog {
    pub store: Arc<dyn MethodStore>,
    pub cache: Option<Arc<dyn MethodListCache>>,
}

impl MethodCatalog {
    async fn load(&self, store_id: i64) -> Result<Vec<PaymentMethod>> {
        if let Some(cache) = &self.cache {
            match cache.get(store_id).await {
                Ok(Some(methods)) => return Ok(methods),
                Ok(None) => {}
                Err(e) => tracing::warn!(store_id, "method cache read failed: {}", e),
            }
        }

        let methods = self.store.list_by_store(store_id).await?;
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(store_id, &methods).await {
                tracing::warn!(store_id, "method cache write failed: {}", e);
            }
        }
        Ok(methods)
    }

    pub async fn available_methods(&self, store_id: i64, grand_total: f64) -> Result<Vec<PaymentMethod>> {
        let mut methods: Vec<PaymentMethod> = self
            .load(store_id)
            .await?
            .into_iter()
            .filter(|m| m.active && m.accepts_total(grand_total))
            .collect();
        methods.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.code.cmp(&b.code)));
        Ok(methods)
    }

    /// Inactive methods keep their title so old orders still render.
    pub async fn title(&self, store_id: i64, code: &str) -> Result<String> {
        self.store
            .find_by_code(store_id, code)
            .await?
            .map(|m| m.title)
            .ok_or_else(|| GatewayError::not_found(format!("payment method {code} in store {store_id}")))
    }

    pub async fn admin_overview(&self, store_id: i64) -> Result<Vec<PaymentMethod>> {
        self.store.list_by_store(store_id).await
    }
}
