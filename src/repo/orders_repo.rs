use crate::domain::order::{DiscountLine, FeeLine, Order, OrderItem, ShippingLine};
use crate::error::Result;
use crate::repo::store::OrderReader;
use sqlx::{PgPool, Row};

/// Read-only view over the host platform's order tables.
#[derive(Clone)]
pub struct OrdersRepo {
    pub pool: PgPool,
}

impl OrdersRepo {
    async fn items_for(&self, order_id: i64) -> Result<Vec<OrderItem>> {
        let rows = sqlx::query(
            r#"
            SELECT product_id, sku, name, qty_ordered, price_excl_tax, tax_percent, product_options
            FROM sales_order_items
            WHERE order_id = $1 AND parent_item_id IS NULL
            ORDER BY item_id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| OrderItem {
                product_id: r.get("product_id"),
                sku: r.get("sku"),
                name: r.get("name"),
                quantity: r.get("qty_ordered"),
                unit_price_excl_tax: r.get("price_excl_tax"),
                tax_percent: r.get("tax_percent"),
                product_options: r
                    .get::<Option<serde_json::Value>, _>("product_options")
                    .unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl OrderReader for OrdersRepo {
    async fn find_by_increment_id(&self, increment_id: &str) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT entity_id, increment_id, store_id, grand_total, payment_method,
                   shipping_method, shipping_description, shipping_amount, shipping_tax_percent,
                   coupon_code, discount_description, discount_amount, discount_tax_percent,
                   fees
            FROM sales_orders
            WHERE increment_id = $1
            "#,
        )
        .bind(increment_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let entity_id: i64 = r.get("entity_id");
        let shipping = r
            .get::<Option<String>, _>("shipping_method")
            .map(|method| ShippingLine {
                method,
                description: r
                    .get::<Option<String>, _>("shipping_description")
                    .unwrap_or_default(),
                amount_excl_tax: r.get::<Option<f64>, _>("shipping_amount").unwrap_or(0.0),
                tax_percent: r.get::<Option<f64>, _>("shipping_tax_percent").unwrap_or(0.0),
            });
        let discount = r
            .get::<Option<f64>, _>("discount_amount")
            .filter(|amount| *amount != 0.0)
            .map(|amount| DiscountLine {
                coupon_code: r.get("coupon_code"),
                description: r
                    .get::<Option<String>, _>("discount_description")
                    .unwrap_or_default(),
                amount,
                tax_percent: r.get::<Option<f64>, _>("discount_tax_percent").unwrap_or(0.0),
            });
        let fees: Vec<FeeLine> = match r.get::<Option<serde_json::Value>, _>("fees") {
            Some(v) => serde_json::from_value(v)?,
            None => Vec::new(),
        };

        Ok(Some(Order {
            entity_id,
            increment_id: r.get("increment_id"),
            store_id: r.get("store_id"),
            grand_total: r.get("grand_total"),
            payment_method: r.get("payment_method"),
            items: self.items_for(entity_id).await?,
            shipping,
            discount,
            fees,
        }))
    }
}
