//! Integration tests for facade dispatch over in-process backends

mod common;

use common::{dashmap_cache, test_data, test_name, web_scope};
use scoped_cache::{BackendKind, CacheStrategy, RequestScope, ScopedCache};
use std::time::Duration;

/// Set then get returns the stored value
#[tokio::test]
async fn test_set_then_get_round_trip() {
    let cache = dashmap_cache().await;
    let name = test_name("round_trip");
    let user = test_data::User::new(1);

    assert!(cache.set(&name, &user).await);

    let cached: Option<test_data::User> = cache.get(&name).await;
    assert_eq!(cached, Some(user));
}

/// Delete removes the value; subsequent gets are misses
#[tokio::test]
async fn test_delete_then_get_is_absent() {
    let cache = dashmap_cache().await;
    let name = test_name("delete");
    let user = test_data::User::new(2);

    assert!(cache.set(&name, &user).await);
    assert!(cache.delete(&name).await);

    let cached: Option<test_data::User> = cache.get(&name).await;
    assert_eq!(cached, None);
    assert!(!cache.exists(&name).await);
}

/// Deleting an absent key still reports the removal as processed
#[tokio::test]
async fn test_delete_absent_key() {
    let cache = dashmap_cache().await;
    assert!(cache.delete(&test_name("never_set")).await);
}

/// exists reflects presence without fetching
#[tokio::test]
async fn test_exists() {
    let cache = dashmap_cache().await;
    let name = test_name("exists");

    assert!(!cache.exists(&name).await);
    assert!(cache.set(&name, "value").await);
    assert!(cache.exists(&name).await);
}

/// A short explicit TTL expires the entry
#[tokio::test]
async fn test_ttl_expiry() {
    let cache = dashmap_cache().await;
    let name = test_name("ttl");

    assert!(
        cache
            .set_with_ttl(&name, "ephemeral", Duration::from_millis(20))
            .await
    );
    tokio::time::sleep(Duration::from_millis(50)).await;

    let cached: Option<String> = cache.get(&name).await;
    assert_eq!(cached, None);
}

/// Strategy presets map to their documented durations
#[tokio::test]
async fn test_strategy_durations() {
    assert_eq!(CacheStrategy::RealTime.to_duration(), Duration::from_secs(10));
    assert_eq!(CacheStrategy::ShortTerm.to_duration(), Duration::from_secs(300));
    assert_eq!(CacheStrategy::Default.to_duration(), Duration::from_secs(300));
    assert_eq!(CacheStrategy::MediumTerm.to_duration(), Duration::from_secs(3600));
    assert_eq!(CacheStrategy::LongTerm.to_duration(), Duration::from_secs(10800));
    assert_eq!(
        CacheStrategy::Custom(Duration::from_secs(42)).to_duration(),
        Duration::from_secs(42)
    );

    let cache = dashmap_cache().await;
    let name = test_name("strategy");
    assert!(
        cache
            .set_with_strategy(&name, "v", CacheStrategy::ShortTerm)
            .await
    );
    assert!(cache.exists(&name).await);
}

/// clear_all flushes everything the backend holds
#[tokio::test]
async fn test_clear_all() {
    let cache = dashmap_cache().await;
    let a = test_name("clear_a");
    let b = test_name("clear_b");

    assert!(cache.set(&a, "1").await);
    assert!(cache.set(&b, "2").await);

    assert!(cache.clear_all().await);

    assert!(!cache.exists(&a).await);
    assert!(!cache.exists(&b).await);
}

/// Without a backend, every operation returns its unavailable default
#[tokio::test]
async fn test_unavailable_facade_defaults() {
    let cache = ScopedCache::unavailable();

    assert!(!cache.is_available());
    assert_eq!(cache.backend_name(), None);
    assert!(!cache.exists("anything").await);
    assert_eq!(cache.get::<String>("anything").await, None);
    assert!(!cache.set("anything", "value").await);
    assert!(!cache.delete("anything").await);
    assert!(!cache.clear_all().await);
    assert!(!cache.health_check().await);
}

/// A builder with no backend also yields the unavailable facade
#[tokio::test]
async fn test_builder_without_backend() {
    let cache = ScopedCache::builder().build().await.unwrap();

    assert!(!cache.is_available());
    assert!(!cache.set("k", "v").await);
    assert_eq!(cache.get::<String>("k").await, None);
}

/// The scoped facade sends namespaced keys to the backend
#[tokio::test]
async fn test_backend_sees_namespaced_keys() {
    use scoped_cache::traits::CacheBackend;
    use std::sync::Arc;

    common::init_tracing();
    let backend = Arc::new(scoped_cache::DashMapCache::new());
    let cache = ScopedCache::builder()
        .with_backend(backend.clone())
        .scope(web_scope())
        .build()
        .await
        .unwrap();

    assert!(cache.set("settings", "v").await);

    // Derived key for host example.com, script /app/public/index.php
    assert!(backend.contains("example_com_app_public_settings").await);
    assert!(!backend.contains("settings").await);
}

/// Two scopes sharing one backend never collide on the same logical name
#[tokio::test]
async fn test_scopes_isolate_applications() {
    use std::sync::Arc;

    common::init_tracing();
    let backend: Arc<scoped_cache::DashMapCache> = Arc::new(scoped_cache::DashMapCache::new());

    let app_a = ScopedCache::builder()
        .with_backend(backend.clone())
        .scope(RequestScope::new(Some("a.example.com"), Some("/app/index.php")))
        .build()
        .await
        .unwrap();
    let app_b = ScopedCache::builder()
        .with_backend(backend.clone())
        .scope(RequestScope::new(Some("b.example.com"), Some("/app/index.php")))
        .build()
        .await
        .unwrap();

    assert!(app_a.set("settings", "for-a").await);
    assert!(app_b.set("settings", "for-b").await);

    assert_eq!(app_a.get::<String>("settings").await.as_deref(), Some("for-a"));
    assert_eq!(app_b.get::<String>("settings").await.as_deref(), Some("for-b"));
}

/// Stats track hits, misses, sets, and removals
#[tokio::test]
async fn test_stats_counters() {
    let cache = dashmap_cache().await;
    let name = test_name("stats");

    let _: Option<String> = cache.get(&name).await; // miss
    assert!(cache.set(&name, "v").await);
    let _: Option<String> = cache.get(&name).await; // hit
    assert!(cache.delete(&name).await);

    let stats = cache.stats();
    assert_eq!(stats.requests, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.sets, 1);
    assert_eq!(stats.removals, 1);
    assert!((stats.hit_rate - 50.0).abs() < f64::EPSILON);
}

/// Stored bytes that fail to decode as the requested type read as a miss
#[tokio::test]
async fn test_type_mismatch_reads_as_miss() {
    let cache = dashmap_cache().await;
    let name = test_name("mismatch");

    assert!(cache.set(&name, "not a user").await);

    let cached: Option<test_data::User> = cache.get(&name).await;
    assert_eq!(cached, None);
}

/// Moka backend works through the facade end to end
#[cfg(feature = "moka")]
#[tokio::test]
async fn test_moka_backend_round_trip() {
    common::init_tracing();
    let cache = ScopedCache::builder()
        .backend(BackendKind::Moka)
        .build()
        .await
        .unwrap();

    assert_eq!(cache.backend_name(), Some("Moka"));
    assert!(cache.health_check().await);

    let name = test_name("moka");
    let user = test_data::User::new(7);
    assert!(cache.set(&name, &user).await);
    assert_eq!(cache.get::<test_data::User>(&name).await, Some(user));
    assert!(cache.delete(&name).await);
    assert_eq!(cache.get::<test_data::User>(&name).await, None);
}
