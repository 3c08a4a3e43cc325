//! Narrow capability traits. Each service takes only the seams it uses.

use crate::domain::credentials::Credentials;
use crate::domain::order::Order;
use crate::domain::payment_method::PaymentMethod;
use crate::error::{GatewayError, Result};

#[async_trait::async_trait]
pub trait CredentialsStore: Send + Sync {
    /// `Ok(None)` when the store has no credentials configured.
    async fn find_for_store(&self, store_id: i64) -> Result<Option<Credentials>>;

    /// Every store with credentials, ordered by store id.
    async fn list_configured(&self) -> Result<Vec<(i64, Credentials)>>;

    async fn save(&self, store_id: i64, credentials: &Credentials) -> Result<()>;
}

pub async fn resolve_credentials(store: &dyn CredentialsStore, store_id: i64) -> Result<Credentials> {
    store
        .find_for_store(store_id)
        .await?
        .ok_or_else(|| GatewayError::not_found(format!("no credentials configured for store {store_id}")))
}

#[async_trait::async_trait]
pub trait MethodStore: Send + Sync {
    async fn list_by_store(&self, store_id: i64) -> Result<Vec<PaymentMethod>>;

    async fn find_by_code(&self, store_id: i64, code: &str) -> Result<Option<PaymentMethod>>;

    /// Insert or replace the row keyed by `(store_id, code)`.
    async fn upsert(&self, method: &PaymentMethod) -> Result<()>;

    async fn set_active(&self, store_id: i64, code: &str, active: bool) -> Result<()>;
}

#[async_trait::async_trait]
pub trait OrderReader: Send + Sync {
    async fn find_by_increment_id(&self, increment_id: &str) -> Result<Option<Order>>;
}

#[async_trait::async_trait]
pub trait CartRebuilder: Send + Sync {
    /// Creates an active cart holding the order's items and returns its id.
    async fn rebuild_from_order(&self, order: &Order) -> Result<i64>;
}
