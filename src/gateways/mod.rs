use crate::config::AppConfig;
use crate::domain::credentials::{Credentials, Environment};
use crate::domain::payment_method::RemoteMethod;
use crate::domain::request::RequestPayload;
use crate::error::Result;
use std::sync::Arc;

pub mod mock;
pub mod resurs;

/// Connection handle produced by [`ResursApi::connect`].
#[derive(Debug, Clone)]
pub struct ApiSession {
    pub credentials: Credentials,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct EnvironmentUrls {
    pub test: String,
    pub production: String,
}

impl EnvironmentUrls {
    pub fn for_environment(&self, environment: Environment) -> &str {
        match environment {
            Environment::Test => &self.test,
            Environment::Production => &self.production,
        }
    }
}

#[async_trait::async_trait]
pub trait ResursApi: Send + Sync {
    fn name(&self) -> &'static str;

    async fn connect(&self, credentials: &Credentials) -> Result<ApiSession>;

    async fn fetch_methods(&self, session: &ApiSession) -> Result<Vec<RemoteMethod>>;

    /// Returns the raw JSON body; judging success is the validator's job.
    async fn authorize(
        &self,
        session: &ApiSession,
        payload: &RequestPayload,
    ) -> Result<serde_json::Value>;
}

pub fn client_from_config(cfg: &AppConfig) -> Arc<dyn ResursApi> {
    if cfg.uses_mock_adapter() {
        tracing::warn!("using mock resurs bank client");
        return Arc::new(mock::MockResursClient::new("ALWAYS_APPROVE"));
    }

    Arc::new(resurs::ResursHttpClient {
        urls: EnvironmentUrls {
            test: cfg.resurs_test_url.clone(),
            production: cfg.resurs_production_url.clone(),
        },
        timeout_ms: cfg.gateway_timeout_ms,
        client: reqwest::Client::new(),
    })
}
