use crate::domain::order::Order;
use crate::domain::request::{RequestPayload, RequestResult};
use crate::error::Result;
use crate::gateways::ResursApi;
use crate::request::builder::RequestBuilder;
use crate::service::validator::GeneralValidator;
use serde_json::Value;
use std::sync::Arc;

pub const NOT_ENABLED_MESSAGE: &str = "resurs bank is not enabled for this order";

/// Trimmed increment id, `None` when blank.
fn order_reference(order: &Order) -> Option<String> {
    order
        .increment_id
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

/// Decides whether an order goes through Resurs Bank and runs the authorize
/// command. Never redirects and never returns an error to the checkout flow.
/// Orders that fail `is_enabled` are refused before any credentials lookup
/// or API call.
#[derive(Clone)]
pub struct GatewayDispatcher {
    pub client: Arc<dyn ResursApi>,
    pub builder: RequestBuilder,
}

impl GatewayDispatcher {
    pub fn is_enabled(&self, order: &Order) -> bool {
        order.grand_total > 0.0 && order.uses_resurs_method()
    }

    pub async fn execute(&self, order: &Order) -> RequestResult {
        if !self.is_enabled(order) {
            tracing::warn!(order_id = order.entity_id, "authorize refused for order not payable through resurs bank");
            return RequestResult::failed(order_reference(order), NOT_ENABLED_MESSAGE);
        }

        let payload = match self.builder.build(order).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(order_id = order.entity_id, "authorize request rejected: {}", e);
                return RequestResult::failed(order_reference(order), e.to_string());
            }
        };
        let reference = payload.reference.clone();

        let response = match self.call(&payload).await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(reference = %reference, client = self.client.name(), "authorize call failed: {}", e);
                return RequestResult::failed(Some(reference), e.to_string());
            }
        };

        let verdict = GeneralValidator::validate(&response);
        tracing::info!(
            reference = %reference,
            status = verdict.success,
            "authorize completed"
        );

        RequestResult {
            reference: Some(reference),
            status: verdict.success,
            messages: verdict.raw_messages,
        }
    }

    async fn call(&self, payload: &RequestPayload) -> Result<Value> {
        let session = self.client.connect(&payload.credentials).await?;
        self.client.authorize(&session, payload).await
    }
}
