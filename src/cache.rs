use crate::results::AnalysisResponse;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Storage for finished analyses, keyed by canonical URL
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Stored response for `key`, if present and not expired
    async fn get(&self, key: &str) -> Option<AnalysisResponse>;

    /// Store `value` under `key` for `ttl` from now
    async fn set(&self, key: &str, value: AnalysisResponse, ttl: Duration);
}

struct Entry {
    expires_at: Instant,
    value: AnalysisResponse,
}

/// Process-local cache with per-entry time-to-live and no size bound
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<AnalysisResponse> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let expired = match entries.get(key) {
            Some(entry) if now < entry.expires_at => {
                ::log::debug!("Cache hit for {}", key);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            ::log::debug!("Cache entry expired for {}", key);
            entries.remove(key);
        } else {
            ::log::debug!("Cache miss for {}", key);
        }
        None
    }

    async fn set(&self, key: &str, value: AnalysisResponse, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let before = entries.len();
        entries.retain(|_, entry| now < entry.expires_at);
        let swept = before - entries.len();
        if swept > 0 {
            ::log::debug!("Dropped {} expired cache entries", swept);
        }

        entries.insert(
            key.to_string(),
            Entry {
                expires_at: now + ttl,
                value,
            },
        );
    }
}
