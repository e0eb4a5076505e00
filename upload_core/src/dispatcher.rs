use std::path::PathBuf;
use std::sync::Arc;

use domain::model::{message_type, BlobUriResponse, MessageEnvelope, ProcessRequest, UploadRequest};

use crate::error::DispatchError;
use crate::upload_queue::UploadQueue;
use crate::uri_cache::UriCache;

/// Decodes an inbound broker envelope and routes it to the `UploadQueue` or
/// the `UriCache`. Never blocks on worker progress: both routes are plain
/// enqueues.
pub struct Dispatcher {
    upload_queue: Arc<UploadQueue>,
    uri_cache: Arc<UriCache>,
    container_path: PathBuf,
}

impl Dispatcher {
    pub fn new(upload_queue: Arc<UploadQueue>, uri_cache: Arc<UriCache>, container_path: PathBuf) -> Self {
        Self {
            upload_queue,
            uri_cache,
            container_path,
        }
    }

    /// Decode failures are logged by the caller of this function at the
    /// `Err` site; an unrecognized `message_type` is logged right here and
    /// returns `Ok(())`, since it isn't a decode failure.
    pub fn on_message(&self, envelope: MessageEnvelope, correlation_id: &str) -> Result<(), DispatchError> {
        match envelope.message_type.as_str() {
            message_type::FILE_UPLOAD_REQUEST => {
                let upload_request: UploadRequest =
                    serde_json::from_str(&envelope.payload).map_err(|source| DispatchError {
                        message_type: envelope.message_type.clone(),
                        source,
                    })?;
                let process_request =
                    ProcessRequest::new(upload_request, self.container_path.clone(), correlation_id.to_owned());
                tracing::debug!(
                    correlation_id,
                    upload_id = %process_request.upload_id,
                    "enqueued upload request"
                );
                self.upload_queue.push(process_request);
                Ok(())
            }
            message_type::ARBITRARY_TO_DEVICE => {
                let response: BlobUriResponse =
                    serde_json::from_str(&envelope.payload).map_err(|source| DispatchError {
                        message_type: envelope.message_type.clone(),
                        source,
                    })?;
                tracing::debug!(
                    correlation_id,
                    file_name = %response.requested_file_name,
                    "received blob uri"
                );
                self.uri_cache.put(response.requested_file_name, response.blob_sas_uri);
                Ok(())
            }
            other => {
                tracing::warn!(correlation_id, message_type = other, "unrecognized message type");
                Ok(())
            }
        }
    }
}
