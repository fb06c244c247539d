//! Backend Parity Tests
//!
//! Runs the same operation sequence against both backends and compares the
//! observable values and ordering. Entry ids are backend specific and are not
//! compared.

use std::sync::Arc;
use std::time::Duration;

use stream_cache::{Cache, CacheError, LocalCache, RedisCache};

// == Helper Functions ==

#[derive(Debug, PartialEq)]
struct Observed {
    value: String,
    missing: bool,
    last_two: Vec<String>,
    last_after_trim: Vec<String>,
}

async fn run_sequence(cache: Arc<dyn Cache>, prefix: &str) -> Observed {
    let key = format!("{prefix}:key");
    let stream = format!("{prefix}:stream");
    let trimmed = format!("{prefix}:trimmed");

    cache.set(&key, "v1", Duration::from_secs(60)).await.unwrap();
    let value = cache.get(&key).await.unwrap();

    cache.del(&[key.as_str()]).await.unwrap();
    let missing = matches!(cache.get(&key).await, Err(CacheError::NotFound(_)));

    for value in ["a", "b", "c"] {
        cache.xadd(&stream, value, 100).await.unwrap();
    }
    let last_two = values(cache.xget_last_n(&stream, 2).await.unwrap());

    for i in 0..5 {
        cache.xadd(&trimmed, &i.to_string(), 2).await.unwrap();
    }
    // remote trimming is approximate, so only the newest maxlen are compared
    let last_after_trim = values(cache.xget_last_n(&trimmed, 2).await.unwrap());

    cache
        .del(&[stream.as_str(), trimmed.as_str()])
        .await
        .unwrap();

    Observed {
        value,
        missing,
        last_two,
        last_after_trim,
    }
}

fn values(entries: Vec<stream_cache::StreamEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.value).collect()
}

fn expected() -> Observed {
    Observed {
        value: "v1".to_string(),
        missing: true,
        last_two: vec!["b".to_string(), "c".to_string()],
        last_after_trim: vec!["3".to_string(), "4".to_string()],
    }
}

// == Tests ==

#[tokio::test]
async fn test_local_backend_sequence() {
    let cache: Arc<dyn Cache> = Arc::new(LocalCache::default());

    let observed = run_sequence(cache, "parity").await;
    assert_eq!(observed, expected());
}

#[tokio::test]
#[ignore = "requires a running redis server"]
async fn test_backends_agree() {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    let prefix = format!(
        "parity-{}",
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );

    let remote: Arc<dyn Cache> = Arc::new(
        RedisCache::connect(&url, Duration::from_millis(100))
            .await
            .unwrap(),
    );
    let local: Arc<dyn Cache> = Arc::new(LocalCache::default());

    let remote_observed = run_sequence(remote, &prefix).await;
    let local_observed = run_sequence(local, &prefix).await;

    assert_eq!(remote_observed, local_observed);
    assert_eq!(local_observed, expected());
}
