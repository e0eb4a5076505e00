use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::{Duration, Instant};

use super::upload_request::UploadRequest;

/// Every `ProcessRequest` starts with this many attempts left.
pub const INITIAL_RETRIES: u8 = 3;

/// Per-file upload outcome, carried in `file_list` order all the way into
/// the completion notification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerFileResult {
    pub file_name: String,
    pub uploaded: bool,
}

/// The in-core, mutable unit of work. Wraps an [`UploadRequest`] with
/// everything a worker needs to drive it to completion without consulting
/// any shared state beyond the three queues.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub upload_id: String,
    pub file_list: Vec<String>,
    pub priority: i32,
    pub metadata: String,
    pub container_path: PathBuf,
    pub correlation_id: String,
    pub per_file_results: Vec<PerFileResult>,
    pub aggregate_result: bool,
    pub retries_remaining: u8,
    pub last_upload_time: Option<DateTime<Utc>>,
    pub time_to_live_expiry: Instant,
    pub file_retention_expiry: Option<Instant>,
}

impl ProcessRequest {
    /// Snapshot an [`UploadRequest`] into a `ProcessRequest`, anchoring its
    /// relative deadlines to `now`.
    pub fn new(request: UploadRequest, container_path: PathBuf, correlation_id: String) -> Self {
        let now = Instant::now();
        let per_file_results = request
            .file_list
            .iter()
            .map(|file_name| PerFileResult {
                file_name: file_name.clone(),
                uploaded: false,
            })
            .collect();

        Self {
            upload_id: request.upload_id,
            file_list: request.file_list,
            priority: request.priority,
            metadata: request.metadata,
            container_path,
            correlation_id,
            per_file_results,
            aggregate_result: false,
            retries_remaining: INITIAL_RETRIES,
            last_upload_time: None,
            time_to_live_expiry: now + Duration::from_secs(request.time_to_live_seconds),
            file_retention_expiry: request
                .file_retention_seconds
                .map(|secs| now + Duration::from_secs(secs)),
        }
    }

    pub fn has_expired(&self) -> bool {
        Instant::now() >= self.time_to_live_expiry
    }

    /// True when there is no retention deadline, or it has already passed —
    /// i.e. files may be deleted right now.
    pub fn retention_has_expired(&self) -> bool {
        match self.file_retention_expiry {
            None => true,
            Some(deadline) => Instant::now() >= deadline,
        }
    }

    /// `{upload_id}/{file_name}`, the destination blob path.
    pub fn blob_path(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.upload_id)
    }

    /// `{container_path}/{file_name}`, the source file on disk.
    pub fn local_path(&self, file_name: &str) -> PathBuf {
        self.container_path.join(file_name)
    }

    pub fn container_path(&self) -> &Path {
        &self.container_path
    }

    /// Panics if `file_name` isn't in `file_list` — `per_file_results` is
    /// always seeded from `file_list` at construction, so callers iterating
    /// `file_list` can rely on this.
    pub fn result_for_mut(&mut self, file_name: &str) -> &mut PerFileResult {
        self.per_file_results
            .iter_mut()
            .find(|result| result.file_name == file_name)
            .expect("per_file_results is seeded from file_list at construction")
    }
}
