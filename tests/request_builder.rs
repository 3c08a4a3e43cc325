use resursbank_gateway::domain::credentials::{Credentials, Environment};
use resursbank_gateway::domain::order::{DiscountLine, FeeLine, Order, OrderItem, ShippingLine};
use resursbank_gateway::domain::request::LineItemType;
use resursbank_gateway::error::GatewayError;
use resursbank_gateway::repo::memory::InMemoryCredentialsStore;
use resursbank_gateway::repo::store::CredentialsStore;
use resursbank_gateway::request::builder::RequestBuilder;
use std::sync::Arc;

async fn builder_with_creds() -> RequestBuilder {
    let store = InMemoryCredentialsStore::default();
    store
        .save(
            1,
            &Credentials::new("tester", "SomeCoolPassword123234", Environment::Test).unwrap(),
        )
        .await
        .unwrap();
    RequestBuilder::new(Arc::new(store))
}

fn full_order() -> Order {
    Order {
        entity_id: 5,
        increment_id: Some("100000005".to_string()),
        store_id: 1,
        grand_total: 1234.5,
        payment_method: Some("resursbank_invoice".to_string()),
        items: vec![OrderItem {
            product_id: 1,
            sku: "Chair #1 / oak".to_string(),
            name: "Oak chair".to_string(),
            quantity: 2.0,
            unit_price_excl_tax: 399.996,
            tax_percent: 24.5,
            product_options: serde_json::Value::Null,
        }],
        shipping: Some(ShippingLine {
            method: "flatrate_flatrate".to_string(),
            description: "Flat rate".to_string(),
            amount_excl_tax: 49.0,
            tax_percent: 25.0,
        }),
        discount: Some(DiscountLine {
            coupon_code: Some("SPRING10".to_string()),
            description: "Spring sale".to_string(),
            amount: 80.0,
            tax_percent: 25.0,
        }),
        fees: vec![FeeLine {
            code: "invoice_fee".to_string(),
            label: "Invoice fee".to_string(),
            amount_excl_tax: 29.0,
            tax_percent: 25.0,
        }],
    }
}

#[tokio::test]
async fn builds_payload_with_reference_credentials_and_items() {
    let payload = builder_with_creds().await.build(&full_order()).await.unwrap();

    assert_eq!(payload.reference, "100000005");
    assert_eq!(payload.credentials.username(), "tester");

    let types: Vec<LineItemType> = payload.line_items.iter().map(|i| i.item_type).collect();
    assert_eq!(
        types,
        vec![
            LineItemType::Product,
            LineItemType::Shipment,
            LineItemType::Discount,
            LineItemType::Other
        ]
    );

    let product = &payload.line_items[0];
    assert_eq!(product.article_number, "Chair-1--oak");
    assert_eq!(product.unit_amount_excluding_vat, 400.0);
    assert_eq!(product.vat_rate, 25);
    assert_eq!(product.quantity, 2.0);

    let discount = &payload.line_items[2];
    assert_eq!(discount.article_number, "SPRING10");
    assert_eq!(discount.unit_amount_excluding_vat, -80.0);
}

#[tokio::test]
async fn skips_free_shipping_and_empty_discount() {
    let mut order = full_order();
    order.shipping.as_mut().unwrap().amount_excl_tax = 0.0;
    order.discount = None;
    order.fees.clear();

    let payload = builder_with_creds().await.build(&order).await.unwrap();
    assert_eq!(payload.line_items.len(), 1);
}

#[tokio::test]
async fn rejects_missing_or_blank_reference() {
    let builder = builder_with_creds().await;

    let mut order = full_order();
    order.increment_id = None;
    assert!(matches!(builder.build(&order).await, Err(GatewayError::Validation(_))));

    order.increment_id = Some(String::new());
    assert!(matches!(builder.build(&order).await, Err(GatewayError::Validation(_))));
}

#[tokio::test]
async fn rejects_negative_quantity() {
    let mut order = full_order();
    order.items[0].quantity = -1.0;

    let err = builder_with_creds().await.build(&order).await.unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));
}

#[tokio::test]
async fn missing_credentials_is_not_found() {
    let builder = RequestBuilder::new(Arc::new(InMemoryCredentialsStore::default()));
    let err = builder.build(&full_order()).await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
}
