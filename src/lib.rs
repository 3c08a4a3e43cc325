pub mod cache {
    pub mod method_cache;
}
pub mod config;
pub mod domain {
    pub mod credentials;
    pub mod order;
    pub mod payment_method;
    pub mod request;
}
pub mod error;
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod checkout;
        pub mod credentials;
        pub mod ops;
        pub mod payment_methods;
    }
    pub mod middleware {
        pub mod admin_auth;
    }
}
pub mod repo {
    pub mod carts_repo;
    pub mod credentials_repo;
    pub mod memory;
    pub mod orders_repo;
    pub mod payment_methods_repo;
    pub mod store;
}
pub mod request {
    pub mod builder;
    pub mod items;
}
pub mod service {
    pub mod checkout_service;
    pub mod dispatcher;
    pub mod failure_recovery;
    pub mod method_catalog;
    pub mod method_sync;
    pub mod validator;
}

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub redis_client: redis::Client,
    pub client_name: &'static str,
    pub checkout_service: service::checkout_service::CheckoutService,
    pub method_catalog: service::method_catalog::MethodCatalog,
    pub method_sync: service::method_sync::MethodSync,
    pub credentials_store: Arc<dyn repo::store::CredentialsStore>,
}
