pub mod constants;
pub mod delete_handle;
pub mod delete_queue;
pub mod delete_worker;
pub mod dispatcher;
pub mod error;
pub mod file_ops;
pub mod notification;
pub mod upload_queue;
pub mod upload_worker;
pub mod uri_cache;

#[rustfmt::skip]
pub use self::{
    delete_handle::DeleteHandle,
    delete_queue::DeleteQueue,
    delete_worker::DeleteWorker,
    dispatcher::Dispatcher,
    error::DispatchError,
    upload_queue::UploadQueue,
    upload_worker::UploadWorker,
    uri_cache::UriCache,
};
