use serde::{Deserialize, Serialize};

pub const METHOD_CODE_PREFIX: &str = "resursbank_";

/// Locally persisted payment method, one row per `(store_id, code)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethod {
    pub code: String,
    pub title: String,
    pub sort_order: i32,
    pub active: bool,
    pub store_id: i64,
    pub min_order_total: f64,
    pub max_order_total: f64,
}

impl PaymentMethod {
    /// A zero upper limit means the method has no maximum.
    pub fn accepts_total(&self, grand_total: f64) -> bool {
        if grand_total < self.min_order_total {
            return false;
        }
        self.max_order_total <= 0.0 || grand_total <= self.max_order_total
    }
}

/// Payment method as returned by the Resurs Bank API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMethod {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub min_limit: f64,
    #[serde(default)]
    pub max_limit: f64,
    #[serde(default, rename = "type")]
    pub method_type: Option<String>,
}

impl RemoteMethod {
    pub fn local_code(&self) -> String {
        method_code(&self.id)
    }

    pub fn into_local(self, store_id: i64, sort_order: i32) -> PaymentMethod {
        PaymentMethod {
            code: self.local_code(),
            title: self.description,
            sort_order,
            active: true,
            store_id,
            min_order_total: self.min_limit,
            max_order_total: self.max_limit,
        }
    }
}

pub fn method_code(remote_id: &str) -> String {
    format!("{}{}", METHOD_CODE_PREFIX, remote_id.trim().to_lowercase())
}

pub fn is_resurs_method_code(code: &str) -> bool {
    code.strip_prefix(METHOD_CODE_PREFIX)
        .is_some_and(|rest| !rest.trim().is_empty())
}
