use crate::domain::request::RequestResult;
use crate::error::{GatewayError, Result};
use crate::repo::store::OrderReader;
use crate::service::dispatcher::GatewayDispatcher;
use crate::service::failure_recovery::{FailureContext, FailureRecovery, RecoveryOutcome};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizeOutcome {
    /// The order is not for Resurs Bank or has nothing to authorize.
    Skipped,
    Dispatched(RequestResult),
}

/// Calls the dispatcher and recovery handler directly for a checkout.
#[derive(Clone)]
pub struct CheckoutService {
    pub orders: Arc<dyn OrderReader>,
    pub dispatcher: GatewayDispatcher,
    pub recovery: FailureRecovery,
}

impl CheckoutService {
    pub async fn authorize(&self, increment_id: &str) -> Result<AuthorizeOutcome> {
        let order = self
            .orders
            .find_by_increment_id(increment_id)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("order {increment_id}")))?;

        if !self.dispatcher.is_enabled(&order) {
            tracing::debug!(increment_id, "order not handled by resurs bank gateway");
            return Ok(AuthorizeOutcome::Skipped);
        }

        Ok(AuthorizeOutcome::Dispatched(self.dispatcher.execute(&order).await))
    }

    pub async fn recover(&self, increment_id: &str, disable_rebuild_cart: bool) -> Result<RecoveryOutcome> {
        let order = self
            .orders
            .find_by_increment_id(increment_id)
            .await?
            .ok_or_else(|| GatewayError::not_found(format!("order {increment_id}")))?;

        Ok(self
            .recovery
            .recover(FailureContext {
                order,
                disable_rebuild_cart,
            })
            .await)
    }
}
