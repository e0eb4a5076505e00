use std::time::Duration;

/// Bound on [`crate::uri_cache::UriCache`]'s size; see its module docs.
pub const MAX_CACHE_SIZE: usize = 10;

/// How long [`crate::upload_worker::UploadWorker`] sleeps between
/// `UploadQueue` drains when it finds the queue empty.
pub const UPLOAD_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How long [`crate::uri_cache::UriCache::wait_for`] sleeps between polls.
pub const URI_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Total budget `wait_for` gives a single file before giving up.
pub const URI_WAIT_TIMEOUT: Duration = Duration::from_secs(120);

/// How long [`crate::delete_worker::DeleteWorker`] sleeps between checks of
/// its retention queue.
pub const DELETE_POLL_INTERVAL: Duration = Duration::from_secs(30);
