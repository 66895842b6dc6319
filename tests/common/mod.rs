//! Common utilities for integration tests

// Each test binary compiles its own copy; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::Once;
use std::sync::atomic::{AtomicU64, Ordering};

use scoped_cache::{RequestScope, ScopedCache};

static INIT_TRACING: Once = Once::new();
static KEY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Install the test tracing subscriber once per process
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Create a unique logical name so tests never collide on shared stores
pub fn test_name(name: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis();
    let seq = KEY_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test_{name}_{timestamp}_{seq}")
}

/// A web-request scope matching a typical shared-host deployment
pub fn web_scope() -> RequestScope {
    RequestScope::new(Some("example.com"), Some("/app/public/index.php"))
}

/// Facade over an in-process DashMap backend, detached scope
pub async fn dashmap_cache() -> ScopedCache {
    init_tracing();
    ScopedCache::builder()
        .backend(scoped_cache::BackendKind::DashMap)
        .build()
        .await
        .expect("DashMap backend construction cannot fail")
}

/// Test value types
pub mod test_data {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct User {
        pub id: u64,
        pub name: String,
        pub email: String,
    }

    impl User {
        pub fn new(id: u64) -> Self {
            Self {
                id,
                name: format!("User {id}"),
                email: format!("user{id}@example.com"),
            }
        }
    }
}
