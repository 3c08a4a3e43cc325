use resursbank_gateway::cache::method_cache::{InMemoryMethodCache, MethodListCache};
use resursbank_gateway::domain::credentials::{Credentials, Environment};
use resursbank_gateway::domain::payment_method::RemoteMethod;
use resursbank_gateway::gateways::mock::MockResursClient;
use resursbank_gateway::repo::memory::{InMemoryCredentialsStore, InMemoryMethodStore};
use resursbank_gateway::repo::store::{CredentialsStore, MethodStore};
use resursbank_gateway::service::method_catalog::MethodCatalog;
use resursbank_gateway::service::method_sync::{MethodSync, SyncReport};
use std::sync::Arc;

fn remote(id: &str, description: &str) -> RemoteMethod {
    RemoteMethod {
        id: id.to_string(),
        description: description.to_string(),
        min_limit: 0.0,
        max_limit: 0.0,
        method_type: Some("INVOICE".to_string()),
    }
}

fn limited(id: &str, description: &str, min: f64, max: f64) -> RemoteMethod {
    RemoteMethod {
        min_limit: min,
        max_limit: max,
        ..remote(id, description)
    }
}

fn creds(username: &str) -> Credentials {
    Credentials::new(username, "secret", Environment::Test).unwrap()
}

fn sync_with(client: &MockResursClient, store: &InMemoryMethodStore) -> MethodSync {
    MethodSync {
        client: Arc::new(client.clone()),
        store: Arc::new(store.clone()),
        cache: None,
    }
}

#[tokio::test]
async fn removed_methods_are_deactivated_not_deleted() {
    let client = MockResursClient::new("ALWAYS_APPROVE");
    let store = InMemoryMethodStore::default();
    let sync = sync_with(&client, &store);

    client
        .set_methods("tester", vec![remote("A", "Invoice"), remote("B", "Card")])
        .await;
    let first = sync.sync(1, &creds("tester")).await.unwrap();
    assert_eq!(
        first,
        SyncReport {
            store_id: 1,
            created: 2,
            updated: 0,
            deactivated: 0
        }
    );

    client
        .set_methods("tester", vec![remote("A", "Invoice"), remote("C", "Part payment")])
        .await;
    let second = sync.sync(1, &creds("tester")).await.unwrap();
    assert_eq!(second.created, 1);
    assert_eq!(second.deactivated, 1);

    let a = store.find_by_code(1, "resursbank_a").await.unwrap().unwrap();
    let b = store.find_by_code(1, "resursbank_b").await.unwrap().unwrap();
    let c = store.find_by_code(1, "resursbank_c").await.unwrap().unwrap();
    assert!(a.active);
    assert!(!b.active);
    assert!(c.active);
    assert_eq!(store.list_by_store(1).await.unwrap().len(), 3);
}

#[tokio::test]
async fn returning_method_is_reactivated_and_updated() {
    let client = MockResursClient::new("ALWAYS_APPROVE");
    let store = InMemoryMethodStore::default();
    let sync = sync_with(&client, &store);

    client.set_methods("tester", vec![remote("A", "Invoice")]).await;
    sync.sync(1, &creds("tester")).await.unwrap();
    client.set_methods("tester", vec![]).await;
    sync.sync(1, &creds("tester")).await.unwrap();
    client
        .set_methods("tester", vec![remote("B", "Card"), remote("A", "Invoice (new)")])
        .await;
    let report = sync.sync(1, &creds("tester")).await.unwrap();

    assert_eq!(report.updated, 1);
    let a = store.find_by_code(1, "resursbank_a").await.unwrap().unwrap();
    assert!(a.active);
    assert_eq!(a.title, "Invoice (new)");
    assert_eq!(a.sort_order, 1);
}

#[tokio::test]
async fn duplicate_and_blank_remote_ids_are_ignored() {
    let client = MockResursClient::new("ALWAYS_APPROVE");
    let store = InMemoryMethodStore::default();
    let sync = sync_with(&client, &store);

    client
        .set_methods(
            "tester",
            vec![remote("A", "first"), remote(" ", "blank"), remote("a", "second")],
        )
        .await;
    let report = sync.sync(1, &creds("tester")).await.unwrap();

    assert_eq!(report.created, 1);
    let a = store.find_by_code(1, "resursbank_a").await.unwrap().unwrap();
    assert_eq!(a.title, "first");
}

#[tokio::test]
async fn one_failing_store_does_not_block_others() {
    let client = MockResursClient::new("ALWAYS_APPROVE");
    let store = InMemoryMethodStore::default();
    let sync = sync_with(&client, &store);
    let credentials = InMemoryCredentialsStore::default();

    credentials.save(1, &creds("broken")).await.unwrap();
    credentials.save(2, &creds("healthy")).await.unwrap();
    client.fail_for("broken").await;
    client.set_methods("healthy", vec![remote("A", "Invoice")]).await;

    let outcomes = sync.sync_all(&credentials).await.unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].is_success());
    assert!(outcomes[0]
        .error
        .as_deref()
        .unwrap()
        .contains("Failed to sync payment methods for store 1"));
    assert!(outcomes[1].is_success());
    assert!(store.find_by_code(2, "resursbank_a").await.unwrap().is_some());
    assert!(store.list_by_store(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn stores_are_reconciled_independently() {
    let client = MockResursClient::new("ALWAYS_APPROVE");
    let store = InMemoryMethodStore::default();
    let sync = sync_with(&client, &store);

    client.set_methods("se", vec![remote("A", "Faktura")]).await;
    client.set_methods("no", vec![remote("B", "Delbetaling")]).await;
    sync.sync(1, &creds("se")).await.unwrap();
    sync.sync(2, &creds("no")).await.unwrap();

    assert!(store.find_by_code(1, "resursbank_a").await.unwrap().unwrap().active);
    assert!(store.find_by_code(2, "resursbank_b").await.unwrap().unwrap().active);
}

#[tokio::test]
async fn catalog_lists_active_methods_within_limits() {
    let client = MockResursClient::new("ALWAYS_APPROVE");
    let store = InMemoryMethodStore::default();
    let sync = sync_with(&client, &store);

    client
        .set_methods(
            "tester",
            vec![
                remote("OLD", "Old"),
                remote("INV", "Invoice"),
                limited("PART", "Part payment", 500.0, 50_000.0),
            ],
        )
        .await;
    sync.sync(1, &creds("tester")).await.unwrap();
    client
        .set_methods(
            "tester",
            vec![
                remote("INV", "Invoice"),
                limited("PART", "Part payment", 500.0, 50_000.0),
            ],
        )
        .await;
    sync.sync(1, &creds("tester")).await.unwrap();

    let catalog = MethodCatalog {
        store: Arc::new(store.clone()),
        cache: None,
    };

    let small: Vec<String> = catalog
        .available_methods(1, 100.0)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.code)
        .collect();
    assert_eq!(small, vec!["resursbank_inv"]);

    let large: Vec<String> = catalog
        .available_methods(1, 1000.0)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.code)
        .collect();
    assert_eq!(large, vec!["resursbank_inv", "resursbank_part"]);

    assert_eq!(catalog.title(1, "resursbank_old").await.unwrap(), "Old");
    assert!(catalog.title(1, "resursbank_missing").await.is_err());
    assert_eq!(catalog.admin_overview(1).await.unwrap().len(), 3);
}

fn cached_sync(client: &MockResursClient, store: &InMemoryMethodStore, cache: &InMemoryMethodCache) -> MethodSync {
    MethodSync {
        client: Arc::new(client.clone()),
        store: Arc::new(store.clone()),
        cache: Some(Arc::new(cache.clone())),
    }
}

#[tokio::test]
async fn checkout_listing_is_refreshed_after_sync() {
    let client = MockResursClient::new("ALWAYS_APPROVE");
    let store = InMemoryMethodStore::default();
    let cache = InMemoryMethodCache::default();
    let sync = cached_sync(&client, &store, &cache);
    let catalog = MethodCatalog {
        store: Arc::new(store.clone()),
        cache: Some(Arc::new(cache.clone())),
    };

    client
        .set_methods("tester", vec![remote("A", "Invoice"), remote("B", "Card")])
        .await;
    sync.sync(1, &creds("tester")).await.unwrap();
    assert_eq!(catalog.available_methods(1, 100.0).await.unwrap().len(), 2);
    assert!(cache.contains(1).await);

    client.set_methods("tester", vec![remote("A", "Invoice")]).await;
    sync.sync(1, &creds("tester")).await.unwrap();

    let codes: Vec<String> = catalog
        .available_methods(1, 100.0)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.code)
        .collect();
    assert_eq!(codes, vec!["resursbank_a"]);
    assert_eq!(cache.invalidations(), 2);
}

#[tokio::test]
async fn cache_is_dropped_when_sync_fails_part_way() {
    let client = MockResursClient::new("ALWAYS_APPROVE");
    let store = InMemoryMethodStore::default();
    let cache = InMemoryMethodCache::default();
    let sync = cached_sync(&client, &store, &cache);

    client
        .set_methods("tester", vec![remote("A", "Invoice"), remote("B", "Card")])
        .await;
    sync.sync(1, &creds("tester")).await.unwrap();
    let before = store.list_by_store(1).await.unwrap();
    cache.put(1, &before).await.unwrap();

    client.set_methods("tester", vec![remote("A", "Invoice")]).await;
    store.set_failing_writes(true);
    let result = sync.sync(1, &creds("tester")).await;

    assert!(result.is_err());
    assert!(!cache.contains(1).await);
    assert_eq!(cache.invalidations(), 2);
}

#[tokio::test]
async fn cache_is_kept_when_api_is_unreachable() {
    let client = MockResursClient::new("ALWAYS_APPROVE");
    let store = InMemoryMethodStore::default();
    let cache = InMemoryMethodCache::default();
    let sync = cached_sync(&client, &store, &cache);

    cache.put(1, &[]).await.unwrap();
    client.fail_for("tester").await;

    assert!(sync.sync(1, &creds("tester")).await.is_err());
    assert!(cache.contains(1).await);
    assert_eq!(cache.invalidations(), 0);
}
