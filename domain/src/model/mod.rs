pub mod envelope;
pub mod notification;
pub mod process_request;
pub mod upload_request;
pub mod uri_cache_entry;

#[rustfmt::skip]
pub use self::{
    envelope::{message_type, topic, BlobUriResponse, MessageEnvelope},
    notification::FileUploadNotification,
    process_request::{PerFileResult, ProcessRequest},
    upload_request::UploadRequest,
    uri_cache_entry::UriCacheEntry,
};
