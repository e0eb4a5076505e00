use std::sync::Arc;

use domain::model::ProcessRequest;

use crate::delete_queue::DeleteQueue;
use crate::file_ops;

/// The only thing `UploadWorker` is allowed to know about `DeleteWorker`:
/// how to hand it a finalized request. Holding this instead of a reference
/// to `DeleteWorker` itself breaks the cyclic ownership the original source
/// has between its upload and delete processors, and makes a fake delete
/// sink trivial to write for worker tests.
#[derive(Clone)]
pub struct DeleteHandle {
    queue: Arc<DeleteQueue>,
}

impl DeleteHandle {
    pub fn new(queue: Arc<DeleteQueue>) -> Self {
        Self { queue }
    }

    /// Admit a finalized request for cleanup. If its retention deadline has
    /// already passed (or there never was one), its files are removed right
    /// now; otherwise the request is queued for `DeleteWorker` to pick up
    /// once the deadline arrives.
    pub async fn submit(&self, request: ProcessRequest) {
        if request.retention_has_expired() {
            file_ops::delete_files(&request).await;
        } else {
            self.queue.push_back(request);
        }
    }
}
