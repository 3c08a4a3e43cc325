use crate::domain::credentials::Credentials;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemType {
    Product,
    Shipment,
    Discount,
    Other,
}

impl LineItemType {
    pub fn default_article_number(&self) -> &'static str {
        match self {
            LineItemType::Product => "product",
            LineItemType::Shipment => "shipping",
            LineItemType::Discount => "discount",
            LineItemType::Other => "fee",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub article_number: String,
    pub description: String,
    pub quantity: f64,
    pub unit_amount_excluding_vat: f64,
    pub vat_rate: i32,
    #[serde(rename = "type")]
    pub item_type: LineItemType,
}

/// Outgoing authorize call. Built per call, never persisted.
#[derive(Debug, Clone)]
pub struct RequestPayload {
    pub credentials: Credentials,
    pub reference: String,
    pub line_items: Vec<LineItem>,
}

/// Verdict of the general validator over a raw API response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidationResult {
    pub success: bool,
    pub raw_messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RequestResult {
    pub reference: Option<String>,
    pub status: bool,
    pub messages: Vec<String>,
}

impl RequestResult {
    pub fn failed(reference: Option<String>, message: impl Into<String>) -> Self {
        Self {
            reference,
            status: false,
            messages: vec![message.into()],
        }
    }
}
