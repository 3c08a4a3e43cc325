use crate::domain::order::Order;
use crate::error::{GatewayError, Result};
use crate::repo::store::CartRebuilder;
use sqlx::{PgPool, Postgres, Row, Transaction};

#[derive(Clone)]
pub struct CartsRepo {
    pub pool: PgPool,
}

impl CartsRepo {
    async fn insert_cart_tx(tx: &mut Transaction<'_, Postgres>, order: &Order) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO carts (store_id, is_active, reserved_order_id, created_at, updated_at)
            VALUES ($1, true, NULL, now(), now())
            RETURNING cart_id
            "#,
        )
        .bind(order.store_id)
        .fetch_one(tx.as_mut())
        .await?;

        Ok(row.get("cart_id"))
    }
}

#[async_trait::async_trait]
impl CartRebuilder for CartsRepo {
    async fn rebuild_from_order(&self, order: &Order) -> Result<i64> {
        if order.items.is_empty() {
            return Err(GatewayError::validation(format!(
                "order {} has no items to restore",
                order.entity_id
            )));
        }

        let mut tx = self.pool.begin().await?;
        let cart_id = Self::insert_cart_tx(&mut tx, order).await?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO cart_items (cart_id, product_id, sku, qty, product_options)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(cart_id)
            .bind(item.product_id)
            .bind(&item.sku)
            .bind(item.quantity)
            .bind(&item.product_options)
            .execute(tx.as_mut())
            .await?;
        }

        tx.commit().await?;
        Ok(cart_id)
    }
}
