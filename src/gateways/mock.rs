use crate::domain::credentials::Credentials;
use crate::domain::payment_method::RemoteMethod;
use crate::domain::request::RequestPayload;
use crate::error::{GatewayError, Result};
use crate::gateways::{ApiSession, ResursApi};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Scripted stand-in for the Resurs Bank API. Methods are keyed by username so
/// several stores can be served by one instance.
#[derive(Clone, Default)]
pub struct MockResursClient {
    pub behavior: String,
    methods: Arc<RwLock<HashMap<String, Vec<RemoteMethod>>>>,
    failing_users: Arc<RwLock<HashSet<String>>>,
    connect_calls: Arc<AtomicUsize>,
    authorize_calls: Arc<AtomicUsize>,
}

impl MockResursClient {
    pub fn new(behavior: &str) -> Self {
        Self {
            behavior: behavior.to_string(),
            ..Self::default()
        }
    }

    pub async fn set_methods(&self, username: &str, methods: Vec<RemoteMethod>) {
        self.methods.write().await.insert(username.to_string(), methods);
    }

    pub async fn fail_for(&self, username: &str) {
        self.failing_users.write().await.insert(username.to_string());
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn authorize_calls(&self) -> usize {
        self.authorize_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ResursApi for MockResursClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn connect(&self, credentials: &Credentials) -> Result<ApiSession> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_users.read().await.contains(credentials.username()) {
            return Err(GatewayError::Api(format!(
                "mock connection refused for {}",
                credentials.username()
            )));
        }

        Ok(ApiSession {
            credentials: credentials.clone(),
            base_url: "mock://resurs".to_string(),
        })
    }

    async fn fetch_methods(&self, session: &ApiSession) -> Result<Vec<RemoteMethod>> {
        Ok(self
            .methods
            .read()
            .await
            .get(session.credentials.username())
            .cloned()
            .unwrap_or_default())
    }

    async fn authorize(
        &self,
        _session: &ApiSession,
        payload: &RequestPayload,
    ) -> Result<serde_json::Value> {
        self.authorize_calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior.as_str() {
            "ALWAYS_DENY" => Ok(json!({
                "reference": payload.reference,
                "status": false,
                "message": "mock denied",
            })),
            "MISSING_STATUS" => Ok(json!({ "reference": payload.reference })),
            "ALWAYS_ERROR" => Err(GatewayError::Api("mock transport failure".to_string())),
            _ => Ok(json!({
                "reference": payload.reference,
                "status": true,
                "paymentId": format!("mock_pay_{}", uuid::Uuid::new_v4()),
            })),
        }
    }
}
