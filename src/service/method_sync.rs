use crate::cache::method_cache::MethodListCache;
use crate::domain::credentials::Credentials;
use crate::domain::payment_method::{PaymentMethod, RemoteMethod};
use crate::error::Result;
use crate::gateways::ResursApi;
use crate::repo::store::{CredentialsStore, MethodStore};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SyncReport {
    pub store_id: i64,
    pub created: usize,
    pub updated: usize,
    pub deactivated: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub store_id: i64,
    pub report: Option<SyncReport>,
    pub error: Option<String>,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Reconciles the methods offered by the API with the local table.
#[derive(Clone)]
pub struct MethodSync {
    pub client: Arc<dyn ResursApi>,
    pub store: Arc<dyn MethodStore>,
    pub cache: Option<Arc<dyn MethodListCache>>,
}

impl MethodSync {
    pub async fn sync(&self, store_id: i64, credentials: &Credentials) -> Result<SyncReport> {
        let session = self.client.connect(credentials).await?;
        let remote = self.client.fetch_methods(&session).await?;

        let reconciled = self.reconcile(store_id, remote).await;

        // rows may have changed even when reconcile failed part-way
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate(store_id).await {
                tracing::warn!(store_id, "method cache invalidation failed: {}", e);
            }
        }

        let report = reconciled?;
        tracing::info!(
            store_id,
            created = report.created,
            updated = report.updated,
            deactivated = report.deactivated,
            "payment methods synced"
        );
        Ok(report)
    }

    async fn reconcile(&self, store_id: i64, remote: Vec<RemoteMethod>) -> Result<SyncReport> {
        let existing: HashMap<String, PaymentMethod> = self
            .store
            .list_by_store(store_id)
            .await?
            .into_iter()
            .map(|m| (m.code.clone(), m))
            .collect();

        let mut report = SyncReport {
            store_id,
            ..SyncReport::default()
        };
        let mut seen = HashSet::new();

        for (position, method) in remote.into_iter().enumerate() {
            if method.id.trim().is_empty() {
                tracing::warn!(store_id, "skipping payment method without id");
                continue;
            }
            let local = method.into_local(store_id, position as i32);
            if !seen.insert(local.code.clone()) {
                continue;
            }

            match existing.get(&local.code) {
                Some(current) if *current == local => {}
                Some(_) => {
                    self.store.upsert(&local).await?;
                    report.updated += 1;
                }
                None => {
                    self.store.upsert(&local).await?;
                    report.created += 1;
                }
            }
        }

        for (code, current) in &existing {
            if current.active && !seen.contains(code) {
                self.store.set_active(store_id, code, false).await?;
                report.deactivated += 1;
            }
        }

        Ok(report)
    }

    /// Runs every configured store. One store failing never stops the others.
    pub async fn sync_all(&self, credentials: &dyn CredentialsStore) -> Result<Vec<SyncOutcome>> {
        let configured = credentials.list_configured().await?;
        let mut outcomes = Vec::with_capacity(configured.len());

        for (store_id, creds) in configured {
            let outcome = match self.sync(store_id, &creds).await {
                Ok(report) => SyncOutcome {
                    store_id,
                    report: Some(report),
                    error: None,
                    finished_at: chrono::Utc::now(),
                },
                Err(e) => {
                    tracing::error!(store_id, "payment method sync failed: {}", e);
                    SyncOutcome {
                        store_id,
                        report: None,
                        error: Some(format!("Failed to sync payment methods for store {store_id}: {e}")),
                        finished_at: chrono::Utc::now(),
                    }
                }
            };
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
