use tokio::time::Instant;

/// A single rendezvous entry: a URI delivered asynchronously by the
/// companion module, waiting to be claimed by the uploader that requested it.
#[derive(Debug, Clone)]
pub struct UriCacheEntry {
    pub file_name: String,
    pub uri: String,
    pub created_at: Instant,
}
