use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use resursbank_gateway::cache::method_cache::{MethodCache, MethodListCache};
use resursbank_gateway::config::AppConfig;
use resursbank_gateway::gateways::client_from_config;
use resursbank_gateway::http::handlers::{checkout, credentials, ops, payment_methods};
use resursbank_gateway::http::middleware::admin_auth::require_internal_api_key;
use resursbank_gateway::repo::carts_repo::CartsRepo;
use resursbank_gateway::repo::credentials_repo::CredentialsRepo;
use resursbank_gateway::repo::orders_repo::OrdersRepo;
use resursbank_gateway::repo::payment_methods_repo::PaymentMethodsRepo;
use resursbank_gateway::repo::store::{CredentialsStore, MethodStore};
use resursbank_gateway::request::builder::RequestBuilder;
use resursbank_gateway::service::checkout_service::CheckoutService;
use resursbank_gateway::service::dispatcher::GatewayDispatcher;
use resursbank_gateway::service::failure_recovery::FailureRecovery;
use resursbank_gateway::service::method_catalog::MethodCatalog;
use resursbank_gateway::service::method_sync::MethodSync;
use resursbank_gateway::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let redis_client = redis::Client::open(cfg.redis_url.clone())?;
    let method_cache: Arc<dyn MethodListCache> =
        Arc::new(MethodCache::new(&cfg.redis_url, cfg.method_cache_ttl_secs)?);

    let credentials_store: Arc<dyn CredentialsStore> = Arc::new(CredentialsRepo { pool: pool.clone() });
    let method_store: Arc<dyn MethodStore> = Arc::new(PaymentMethodsRepo { pool: pool.clone() });
    let client = client_from_config(&cfg);

    let dispatcher = GatewayDispatcher {
        client: client.clone(),
        builder: RequestBuilder::new(credentials_store.clone()),
    };
    let checkout_service = CheckoutService {
        orders: Arc::new(OrdersRepo { pool: pool.clone() }),
        dispatcher,
        recovery: FailureRecovery {
            carts: Arc::new(CartsRepo { pool: pool.clone() }),
        },
    };
    let method_sync = MethodSync {
        client: client.clone(),
        store: method_store.clone(),
        cache: Some(method_cache.clone()),
    };
    let method_catalog = MethodCatalog {
        store: method_store,
        cache: Some(method_cache),
    };

    let state = AppState {
        pool,
        redis_client,
        client_name: client.name(),
        checkout_service,
        method_catalog,
        method_sync,
        credentials_store,
    };

    let admin_routes = Router::new()
        .route(
            "/admin/stores/:store_id/credentials",
            put(credentials::upsert_credentials),
        )
        .route(
            "/admin/stores/:store_id/payment-methods",
            get(payment_methods::admin_overview),
        )
        .route("/admin/payment-methods/sync", post(payment_methods::trigger_sync))
        .layer(from_fn_with_state(
            cfg.internal_api_key.clone(),
            require_internal_api_key,
        ));

    let app = Router::new()
        .route("/health", get(ops::health))
        .route("/ops/readiness", get(ops::readiness))
        .route("/ops/liveness", get(ops::liveness))
        .route(
            "/stores/:store_id/payment-methods",
            get(payment_methods::list_available),
        )
        .route(
            "/stores/:store_id/payment-methods/:code/title",
            get(payment_methods::get_title),
        )
        .route(
            "/checkout/orders/:increment_id/authorize",
            post(checkout::authorize),
        )
        .route(
            "/checkout/orders/:increment_id/failure",
            post(checkout::payment_failed),
        )
        .merge(admin_routes)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
