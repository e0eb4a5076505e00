use std::sync::Arc;

use chrono::Utc;
use domain::model::{message_type, topic, ProcessRequest};
use domain::service::{BrokerPublisher, Uploader};
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::constants::{UPLOAD_POLL_INTERVAL, URI_WAIT_TIMEOUT};
use crate::delete_handle::DeleteHandle;
use crate::notification;
use crate::upload_queue::UploadQueue;
use crate::uri_cache::UriCache;

/// Drains [`UploadQueue`], driving each request through URI rendezvous and
/// upload, then retrying or finalizing it. Per-request file attempts are
/// always strictly sequential; running more than one `UploadWorker` is only
/// safe because each dequeue hands exclusive ownership of one request to
/// exactly one worker.
pub struct UploadWorker {
    upload_queue: Arc<UploadQueue>,
    uri_cache: Arc<UriCache>,
    delete_handle: DeleteHandle,
    broker: Arc<dyn BrokerPublisher>,
    uploader: Arc<dyn Uploader>,
    cancellation: CancellationToken,
}

impl UploadWorker {
    pub fn new(
        upload_queue: Arc<UploadQueue>,
        uri_cache: Arc<UriCache>,
        delete_handle: DeleteHandle,
        broker: Arc<dyn BrokerPublisher>,
        uploader: Arc<dyn Uploader>,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            upload_queue,
            uri_cache,
            delete_handle,
            broker,
            uploader,
            cancellation,
        }
    }

    pub async fn run(self) {
        loop {
            if self.cancellation.is_cancelled() {
                tracing::info!("upload worker stopping");
                return;
            }

            match self.upload_queue.pop() {
                Some(request) => self.process(request).await,
                None => time::sleep(UPLOAD_POLL_INTERVAL).await,
            }
        }
    }

    async fn process(&self, mut request: ProcessRequest) {
        request.aggregate_result = true;
        let file_list = request.file_list.clone();

        for file_name in &file_list {
            let already_uploaded = request
                .per_file_results
                .iter()
                .find(|result| &result.file_name == file_name)
                .map(|result| result.uploaded)
                .unwrap_or(false);

            if request.has_expired() || already_uploaded {
                // Skip silently: expiry or a prior success, neither of
                // which should move `aggregate_result`.
                continue;
            }

            let uploaded = self.attempt_file(&request, file_name).await;
            if uploaded {
                request.last_upload_time = Some(Utc::now());
            }
            request.result_for_mut(file_name).uploaded = uploaded;
            request.aggregate_result = request.aggregate_result && uploaded;
        }

        self.validate_upload_state(request).await;
    }

    /// Request a URI, wait for it, then invoke the uploader. Returns
    /// whether the file ended up uploaded — never propagates an error,
    /// since no failure here may escape the request's scope.
    async fn attempt_file(&self, request: &ProcessRequest, file_name: &str) -> bool {
        let blob_path = request.blob_path(file_name);

        if let Err(error) = self
            .broker
            .publish(
                topic::REQUEST_BLOB_URI,
                message_type::ARBITRARY_TO_CLOUD,
                &blob_path,
                &request.correlation_id,
            )
            .await
        {
            tracing::warn!(
                correlation_id = %request.correlation_id,
                %error,
                "failed to publish blob uri request"
            );
        }

        let Some(uri) = self.uri_cache.wait_for(file_name, URI_WAIT_TIMEOUT).await else {
            tracing::warn!(
                correlation_id = %request.correlation_id,
                file_name,
                "timed out waiting for blob uri"
            );
            return false;
        };

        let local_path = request.local_path(file_name);
        match self.uploader.upload(&local_path, &uri).await {
            Ok(uploaded) => uploaded,
            Err(error) => {
                tracing::warn!(
                    correlation_id = %request.correlation_id,
                    file_name,
                    %error,
                    "upload failed"
                );
                false
            }
        }
    }

    /// Finalize on full success, expiry, or exhausted retries; otherwise
    /// decrement `retries_remaining` and retry, preserving priority.
    async fn validate_upload_state(&self, mut request: ProcessRequest) {
        let expired = request.has_expired();
        if request.aggregate_result || expired || request.retries_remaining == 0 {
            tracing::trace!(
                correlation_id = %request.correlation_id,
                expired,
                retries_remaining = request.retries_remaining,
                "finalizing upload request"
            );
            notification::publish(self.broker.as_ref(), &request).await;
            self.delete_handle.submit(request).await;
        } else {
            request.retries_remaining -= 1;
            tracing::trace!(
                correlation_id = %request.correlation_id,
                retries_remaining = request.retries_remaining,
                "retrying upload request"
            );
            self.upload_queue.push(request);
        }
    }
}
