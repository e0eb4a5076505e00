use serde::Serialize;

use super::process_request::{PerFileResult, ProcessRequest};

/// Published on [`super::topic::FILE_UPLOAD_NOTIFICATION`] once a request
/// finalizes, successfully or not.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadNotification {
    pub upload_id: String,
    pub metadata: String,
    pub upload_result: bool,
    pub upload_file_list: Vec<PerFileResult>,
    pub last_upload_time: String,
}

impl FileUploadNotification {
    pub fn from_request(request: &ProcessRequest) -> Self {
        Self {
            upload_id: request.upload_id.clone(),
            metadata: request.metadata.clone(),
            upload_result: request.aggregate_result,
            upload_file_list: request.per_file_results.clone(),
            last_upload_time: request
                .last_upload_time
                .map(|time| time.to_rfc2822())
                .unwrap_or_default(),
        }
    }
}
