use crate::domain::order::Order;
use crate::domain::request::{LineItem, LineItemType};
use crate::error::{GatewayError, Result};

pub const ARTICLE_NUMBER_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 50;

/// Turns one part of an order into API line items.
pub trait ItemConverter: Send + Sync {
    fn convert(&self, order: &Order) -> Result<Vec<LineItem>>;
}

/// Keeps `[A-Za-z0-9_-]`, spaces become dashes, everything else is dropped.
pub fn sanitize_article_number(raw: &str, fallback: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(ARTICLE_NUMBER_MAX_LEN)
        .collect();

    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned
    }
}

pub fn sanitize_description(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(DESCRIPTION_MAX_LEN)
        .collect()
}

pub fn round_amount(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(GatewayError::validation(format!("amount {value} is not a finite number")));
    }
    Ok((value * 100.0).round() / 100.0)
}

pub fn round_vat_rate(value: f64) -> Result<i32> {
    if !value.is_finite() || value < 0.0 {
        return Err(GatewayError::validation(format!("invalid tax percent {value}")));
    }
    Ok(value.round() as i32)
}

pub fn check_quantity(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(GatewayError::validation(format!("invalid quantity {value}")));
    }
    Ok(value)
}

fn line_item(
    item_type: LineItemType,
    article_number: &str,
    description: &str,
    quantity: f64,
    unit_amount: f64,
    vat_rate: f64,
) -> Result<LineItem> {
    Ok(LineItem {
        article_number: sanitize_article_number(article_number, item_type.default_article_number()),
        description: sanitize_description(description),
        quantity: check_quantity(quantity)?,
        unit_amount_excluding_vat: round_amount(unit_amount)?,
        vat_rate: round_vat_rate(vat_rate)?,
        item_type,
    })
}

pub struct ProductConverter;

impl ItemConverter for ProductConverter {
    fn convert(&self, order: &Order) -> Result<Vec<LineItem>> {
        order
            .items
            .iter()
            .map(|item| {
                line_item(
                    LineItemType::Product,
                    &item.sku,
                    &item.name,
                    item.quantity,
                    item.unit_price_excl_tax,
                    item.tax_percent,
                )
            })
            .collect()
    }
}

pub struct ShippingConverter;

impl ItemConverter for ShippingConverter {
    fn convert(&self, order: &Order) -> Result<Vec<LineItem>> {
        match &order.shipping {
            Some(s) if s.amount_excl_tax != 0.0 => Ok(vec![line_item(
                LineItemType::Shipment,
                &s.method,
                &s.description,
                1.0,
                s.amount_excl_tax,
                s.tax_percent,
            )?]),
            _ => Ok(Vec::new()),
        }
    }
}

pub struct DiscountConverter;

impl ItemConverter for DiscountConverter {
    fn convert(&self, order: &Order) -> Result<Vec<LineItem>> {
        match &order.discount {
            Some(d) if d.amount != 0.0 => Ok(vec![line_item(
                LineItemType::Discount,
                d.coupon_code.as_deref().unwrap_or_default(),
                &d.description,
                1.0,
                -d.amount.abs(),
                d.tax_percent,
            )?]),
            _ => Ok(Vec::new()),
        }
    }
}

pub struct FeeConverter;

impl ItemConverter for FeeConverter {
    fn convert(&self, order: &Order) -> Result<Vec<LineItem>> {
        order
            .fees
            .iter()
            .filter(|f| f.amount_excl_tax != 0.0)
            .map(|f| {
                line_item(
                    LineItemType::Other,
                    &f.code,
                    &f.label,
                    1.0,
                    f.amount_excl_tax,
                    f.tax_percent,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_unsafe_article_characters() {
        assert_eq!(sanitize_article_number("ABC 12/3#ä", "product"), "ABC-123");
        assert_eq!(sanitize_article_number("%%%", "shipping"), "shipping");
    }

    #[test]
    fn truncates_long_values() {
        let long = "x".repeat(300);
        assert_eq!(sanitize_article_number(&long, "p").len(), ARTICLE_NUMBER_MAX_LEN);
        assert_eq!(sanitize_description(&long).chars().count(), DESCRIPTION_MAX_LEN);
    }

    #[test]
    fn rounds_amounts_and_rates() {
        assert_eq!(round_amount(10.005_1).unwrap(), 10.01);
        assert_eq!(round_vat_rate(24.6).unwrap(), 25);
        assert!(round_amount(f64::NAN).is_err());
        assert!(check_quantity(-1.0).is_err());
    }
}
