use serde::Deserialize;

/// An inbound, immutable upload request as decoded off the broker.
///
/// Deadlines travel on the wire as durations, not absolute instants — a
/// monotonic deadline only means something once anchored to this process's
/// clock, which happens when [`crate::model::ProcessRequest`] is built from
/// this record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub upload_id: String,
    pub file_list: Vec<String>,
    pub priority: i32,
    pub time_to_live_seconds: u64,
    #[serde(default)]
    pub file_retention_seconds: Option<u64>,
    #[serde(default)]
    pub metadata: String,
}
