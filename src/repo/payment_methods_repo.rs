use crate::domain::payment_method::PaymentMethod;
use crate::error::Result;
use crate::repo::store::MethodStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PaymentMethodsRepo {
    pub pool: PgPool,
}

const COLUMNS: &str =
    "store_id, code, title, sort_order, active, min_order_total, max_order_total";

fn from_row(r: PgRow) -> PaymentMethod {
    PaymentMethod {
        code: r.get("code"),
        title: r.get("title"),
        sort_order: r.get("sort_order"),
        active: r.get("active"),
        store_id: r.get("store_id"),
        min_order_total: r.get("min_order_total"),
        max_order_total: r.get("max_order_total"),
    }
}

#[async_trait::async_trait]
impl MethodStore for PaymentMethodsRepo {
    async fn list_by_store(&self, store_id: i64) -> Result<Vec<PaymentMethod>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM resursbank_payment_methods WHERE store_id = $1 ORDER BY sort_order ASC, code ASC"
        ))
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn find_by_code(&self, store_id: i64, code: &str) -> Result<Option<PaymentMethod>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM resursbank_payment_methods WHERE store_id = $1 AND code = $2"
        ))
        .bind(store_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(from_row))
    }

    async fn upsert(&self, method: &PaymentMethod) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resursbank_payment_methods
                (store_id, code, title, sort_order, active, min_order_total, max_order_total, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, now())
            ON CONFLICT (store_id, code) DO UPDATE SET
                title = EXCLUDED.title,
                sort_order = EXCLUDED.sort_order,
                active = EXCLUDED.active,
                min_order_total = EXCLUDED.min_order_total,
                max_order_total = EXCLUDED.max_order_total,
                updated_at = now()
            "#,
        )
        .bind(method.store_id)
        .bind(&method.code)
        .bind(&method.title)
        .bind(method.sort_order)
        .bind(method.active)
        .bind(method.min_order_total)
        .bind(method.max_order_total)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_active(&self, store_id: i64, code: &str, active: bool) -> Result<()> {
        sqlx::query(
            "UPDATE resursbank_payment_methods SET active = $3, updated_at = now() WHERE store_id = $1 AND code = $2",
        )
        .bind(store_id)
        .bind(code)
        .bind(active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
