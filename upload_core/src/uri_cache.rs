use std::collections::HashMap;
use std::sync::Mutex;

use domain::model::UriCacheEntry;
use tokio::time::{self, Instant};

use crate::constants::{MAX_CACHE_SIZE, URI_POLL_INTERVAL};

/// Bounded rendezvous point between asynchronous `ArbitraryToDevice`
/// URI-response messages and the `UploadWorker`s waiting on them.
///
/// This is not durable state: a URI left unclaimed only matters insofar as
/// it occupies a slot, which is exactly what the bound guards against.
#[derive(Default)]
pub struct UriCache {
    entries: Mutex<HashMap<String, UriCacheEntry>>,
}

impl UriCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `file_name`. If inserting a new
    /// key would push the cache past [`MAX_CACHE_SIZE`], the oldest entry
    /// (smallest `created_at`) is evicted first.
    pub fn put(&self, file_name: String, uri: String) {
        let mut entries = self.entries.lock().unwrap();
        let created_at = Instant::now();

        if let Some(entry) = entries.get_mut(&file_name) {
            entry.uri = uri;
            entry.created_at = created_at;
            return;
        }

        if entries.len() >= MAX_CACHE_SIZE {
            if let Some(oldest) = entries
                .values()
                .min_by_key(|entry| entry.created_at)
                .map(|entry| entry.file_name.clone())
            {
                entries.remove(&oldest);
                tracing::trace!(file_name = %oldest, "evicted oldest uri-cache entry");
            }
        }

        entries.insert(
            file_name.clone(),
            UriCacheEntry {
                file_name,
                uri,
                created_at,
            },
        );
    }

    /// Atomic lookup-and-remove. A second call for the same `file_name`
    /// after a successful first returns `None`.
    pub fn take(&self, file_name: &str) -> Option<String> {
        self.entries.lock().unwrap().remove(file_name).map(|entry| entry.uri)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Poll for `file_name`'s URI every [`URI_POLL_INTERVAL`] up to
    /// `timeout`. The first check happens only after the first sleep, so
    /// the minimum latency is one poll interval.
    pub async fn wait_for(&self, file_name: &str, timeout: std::time::Duration) -> Option<String> {
        let deadline = Instant::now() + timeout;
        loop {
            time::sleep(URI_POLL_INTERVAL).await;
            if let Some(uri) = self.take(file_name) {
                return Some(uri);
            }
            if Instant::now() >= deadline {
                return None;
            }
        }
    }
}
