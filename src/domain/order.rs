use crate::domain::payment_method::is_resurs_method_code;
use serde::{Deserialize, Serialize};

/// Read model of a host platform order. Only the fields the gateway needs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Order {
    pub entity_id: i64,
    pub increment_id: Option<String>,
    pub store_id: i64,
    pub grand_total: f64,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub shipping: Option<ShippingLine>,
    pub discount: Option<DiscountLine>,
    #[serde(default)]
    pub fees: Vec<FeeLine>,
}

impl Order {
    pub fn uses_resurs_method(&self) -> bool {
        self.payment_method
            .as_deref()
            .is_some_and(is_resurs_method_code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub sku: String,
    pub name: String,
    pub quantity: f64,
    pub unit_price_excl_tax: f64,
    pub tax_percent: f64,
    /// Selected options as stored by the platform; restored verbatim on cart rebuild.
    #[serde(default)]
    pub product_options: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingLine {
    pub method: String,
    pub description: String,
    pub amount_excl_tax: f64,
    pub tax_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountLine {
    pub coupon_code: Option<String>,
    pub description: String,
    pub amount: f64,
    pub tax_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeLine {
    pub code: String,
    pub label: String,
    pub amount_excl_tax: f64,
    pub tax_percent: f64,
}
