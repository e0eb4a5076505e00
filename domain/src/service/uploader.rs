use std::path::Path;

/// The core's only seam onto the file-upload transport. A concrete
/// implementation PUTs `local_path`'s bytes to `uri`; the core never knows
/// it's HTTP.
#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Returns `Ok(true)` on a successful upload, `Ok(false)` on a
    /// well-formed failure (non-2xx). An `Err` (e.g. local IO failure
    /// reading the file) is treated by the caller exactly like `Ok(false)`
    /// — per this system's error-handling rule, an upload failure of any
    /// kind only ever marks a file `uploaded = false`, it never aborts the
    /// request.
    async fn upload(&self, local_path: &Path, uri: &str) -> anyhow::Result<bool>;
}
