use serde::{Deserialize, Serialize};

/// The broker wire envelope shared by every inbound and outbound message.
///
/// `payload` is itself an encoded record whose shape depends on `message_type`;
/// decoding it further is the caller's job, not this type's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message_type: String,
    pub payload: String,
}

/// `message_type` discriminator values. Exact strings are part of the wire contract.
pub mod message_type {
    pub const FILE_UPLOAD_REQUEST: &str = "FileUploadRequest";
    pub const ARBITRARY_TO_DEVICE: &str = "ArbitraryToDevice";
    pub const ARBITRARY_TO_CLOUD: &str = "ArbitraryToCloud";
}

/// Broker topic names. Exact strings are part of the wire contract.
pub mod topic {
    pub const REQUEST_FILE_UPLOAD: &str = "RequestFileUpload";
    pub const FILE_UPLOAD_BLOB_URI: &str = "FileUploadBlobUri";
    pub const REQUEST_BLOB_URI: &str = "RequestBlobUri";
    pub const FILE_UPLOAD_NOTIFICATION: &str = "FileUploadNotification";
}

/// Body of an `ArbitraryToDevice` envelope: the companion module's answer to
/// a blob-URI request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobUriResponse {
    pub requested_file_name: String,
    pub blob_sas_uri: String,
}
