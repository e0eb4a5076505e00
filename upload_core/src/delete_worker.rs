use std::sync::Arc;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::constants::DELETE_POLL_INTERVAL;
use crate::delete_queue::DeleteQueue;
use crate::file_ops;

/// Drains [`DeleteQueue`] one item per tick, removing local files once a
/// request's retention deadline has passed. A request whose deadline
/// hasn't arrived yet is pushed back to the tail — for a single-item queue
/// this is a valid busy-wait at one check per [`DELETE_POLL_INTERVAL`].
pub struct DeleteWorker {
    queue: Arc<DeleteQueue>,
    cancellation: CancellationToken,
}

impl DeleteWorker {
    pub fn new(queue: Arc<DeleteQueue>, cancellation: CancellationToken) -> Self {
        Self { queue, cancellation }
    }

    pub async fn run(self) {
        loop {
            if self.cancellation.is_cancelled() {
                tracing::info!("delete worker stopping");
                return;
            }

            if let Some(request) = self.queue.pop_front() {
                if request.retention_has_expired() {
                    file_ops::delete_files(&request).await;
                } else {
                    self.queue.push_back(request);
                }
            }

            time::sleep(DELETE_POLL_INTERVAL).await;
        }
    }
}
