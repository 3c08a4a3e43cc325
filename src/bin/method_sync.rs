use anyhow::Result;
use resursbank_gateway::cache::method_cache::{MethodCache, MethodListCache};
use resursbank_gateway::config::AppConfig;
use resursbank_gateway::gateways::client_from_config;
use resursbank_gateway::repo::credentials_repo::CredentialsRepo;
use resursbank_gateway::repo::payment_methods_repo::PaymentMethodsRepo;
use resursbank_gateway::service::method_sync::MethodSync;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&cfg.database_url)
        .await?;

    let credentials = CredentialsRepo { pool: pool.clone() };
    let cache: Option<Arc<dyn MethodListCache>> = match MethodCache::new(&cfg.redis_url, cfg.method_cache_ttl_secs) {
        Ok(c) => Some(Arc::new(c) as Arc<dyn MethodListCache>),
        Err(e) => {
            tracing::warn!("method cache disabled: {}", e);
            None
        }
    };
    let sync = MethodSync {
        client: client_from_config(&cfg),
        store: Arc::new(PaymentMethodsRepo { pool }),
        cache,
    };

    loop {
        match sync.sync_all(&credentials).await {
            Ok(outcomes) => {
                let failed = outcomes.iter().filter(|o| !o.is_success()).count();
                tracing::info!(stores = outcomes.len(), failed, "sync run finished");
            }
            Err(e) if cfg.sync_interval_secs.is_some() => {
                tracing::error!("could not load credentials: {}", e);
            }
            Err(e) => return Err(e.into()),
        }

        let Some(interval) = cfg.sync_interval_secs else {
            break;
        };
        tokio::time::sleep(std::time::Duration::from_secs(interval)).await;
    }

    Ok(())
}
