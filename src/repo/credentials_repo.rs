use crate::domain::credentials::{Credentials, Environment};
use crate::error::Result;
use crate::repo::store::CredentialsStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct CredentialsRepo {
    pub pool: PgPool,
}

fn from_row(row: &PgRow) -> Result<(i64, Credentials)> {
    let environment: String = row.get("environment");
    let country: Option<String> = row.get("country");
    let creds = Credentials::new(
        row.get::<String, _>("username"),
        row.get::<String, _>("password"),
        environment.parse::<Environment>()?,
    )?;
    let creds = match country.as_deref() {
        Some(c) if !c.is_empty() => creds.with_country(c)?,
        _ => creds,
    };
    Ok((row.get("store_id"), creds))
}

#[async_trait::async_trait]
impl CredentialsStore for CredentialsRepo {
    async fn find_for_store(&self, store_id: i64) -> Result<Option<Credentials>> {
        let row = sqlx::query(
            "SELECT store_id, username, password, environment, country FROM resursbank_credentials WHERE store_id = $1",
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| from_row(&r).map(|(_, creds)| creds)).transpose()
    }

    async fn list_configured(&self) -> Result<Vec<(i64, Credentials)>> {
        let rows = sqlx::query(
            "SELECT store_id, username, password, environment, country FROM resursbank_credentials ORDER BY store_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            match from_row(&row) {
                Ok(entry) => out.push(entry),
                Err(e) => {
                    let store_id: i64 = row.get("store_id");
                    tracing::warn!(store_id, "skipping invalid stored credentials: {}", e);
                }
            }
        }
        Ok(out)
    }

    async fn save(&self, store_id: i64, credentials: &Credentials) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resursbank_credentials (store_id, username, password, environment, country, updated_at)
            VALUES ($1, $2, $3, $4, $5, now())
            ON CONFLICT (store_id) DO UPDATE SET
                username = EXCLUDED.username,
                password = EXCLUDED.password,
                environment = EXCLUDED.environment,
                country = EXCLUDED.country,
                updated_at = now()
            "#,
        )
        .bind(store_id)
        .bind(credentials.username())
        .bind(credentials.password())
        .bind(credentials.environment().as_str())
        .bind(credentials.country())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
