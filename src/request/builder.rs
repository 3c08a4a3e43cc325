use crate::domain::order::Order;
use crate::domain::request::RequestPayload;
use crate::error::{GatewayError, Result};
use crate::repo::store::{resolve_credentials, CredentialsStore};
use crate::request::items::{
    DiscountConverter, FeeConverter, ItemConverter, ProductConverter, ShippingConverter,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct RequestBuilder {
    pub credentials_store: Arc<dyn CredentialsStore>,
    converters: Arc<Vec<Box<dyn ItemConverter>>>,
}

impl RequestBuilder {
    pub fn new(credentials_store: Arc<dyn CredentialsStore>) -> Self {
        let converters: Vec<Box<dyn ItemConverter>> = vec![
            Box::new(ProductConverter),
            Box::new(ShippingConverter),
            Box::new(DiscountConverter),
            Box::new(FeeConverter),
        ];
        Self {
            credentials_store,
            converters: Arc::new(converters),
        }
    }

    /// Validation happens before any store lookup so a malformed order never
    /// costs a round trip.
    pub async fn build(&self, order: &Order) -> Result<RequestPayload> {
        let reference = order
            .increment_id
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| {
                GatewayError::validation(format!(
                    "order {} has no reference to send",
                    order.entity_id
                ))
            })?
            .to_string();

        let mut line_items = Vec::new();
        for converter in self.converters.iter() {
            line_items.extend(converter.convert(order)?);
        }

        let credentials = resolve_credentials(self.credentials_store.as_ref(), order.store_id).await?;

        Ok(RequestPayload {
            credentials,
            reference,
            line_items,
        })
    }
}
