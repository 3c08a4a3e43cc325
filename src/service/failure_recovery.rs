use crate::domain::order::Order;
use crate::repo::store::CartRebuilder;
use serde::Serialize;
use std::sync::Arc;

pub const CART_PATH: &str = "checkout/cart";

pub const PAYMENT_FAILED_MESSAGE: &str =
    "The payment failed. Please confirm the cart content and try a different payment method.";
pub const CART_NOT_RESTORED_MESSAGE: &str =
    "The payment failed and we were unable to restore your cart. We apologize for the inconvenience. Please add the items to the cart again and try a different payment method.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserMessage {
    pub level: MessageLevel,
    pub text: String,
}

/// Everything recovery needs, passed in by the caller.
#[derive(Debug, Clone)]
pub struct FailureContext {
    pub order: Order,
    pub disable_rebuild_cart: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryOutcome {
    Skipped,
    Rebuilt {
        cart_id: i64,
        messages: Vec<UserMessage>,
        redirect: String,
    },
    ManualFallback {
        messages: Vec<UserMessage>,
        redirect: String,
    },
}

#[derive(Clone)]
pub struct FailureRecovery {
    pub carts: Arc<dyn CartRebuilder>,
}

impl FailureRecovery {
    pub fn is_enabled(&self, ctx: &FailureContext) -> bool {
        ctx.order.uses_resurs_method() && !ctx.disable_rebuild_cart
    }

    pub async fn recover(&self, ctx: FailureContext) -> RecoveryOutcome {
        if !self.is_enabled(&ctx) {
            return RecoveryOutcome::Skipped;
        }

        match self.carts.rebuild_from_order(&ctx.order).await {
            Ok(cart_id) => {
                tracing::info!(order_id = ctx.order.entity_id, cart_id, "cart rebuilt after failed payment");
                RecoveryOutcome::Rebuilt {
                    cart_id,
                    messages: vec![UserMessage {
                        level: MessageLevel::Warning,
                        text: PAYMENT_FAILED_MESSAGE.to_string(),
                    }],
                    redirect: CART_PATH.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(order_id = ctx.order.entity_id, "cart rebuild failed: {}", e);
                RecoveryOutcome::ManualFallback {
                    messages: vec![UserMessage {
                        level: MessageLevel::Error,
                        text: CART_NOT_RESTORED_MESSAGE.to_string(),
                    }],
                    redirect: CART_PATH.to_string(),
                }
            }
        }
    }
}
