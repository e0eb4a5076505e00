mod broker;
mod config;
mod uploader;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use domain::model::topic;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use upload_core::{DeleteHandle, DeleteQueue, DeleteWorker, Dispatcher, UploadQueue, UploadWorker, UriCache};

use self::broker::KafkaBroker;
use self::config::AgentConfig;
use self::uploader::HttpUploader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let agent_config = AgentConfig::load().with_context(|| "failed to build config")?;

    let broker = Arc::new(
        KafkaBroker::new(
            &agent_config.kafka.bootstrap_servers,
            &agent_config.kafka.group_id,
            &[topic::REQUEST_FILE_UPLOAD, topic::FILE_UPLOAD_BLOB_URI],
        )
        .with_context(|| "failed to connect to broker")?,
    );

    let upload_queue = Arc::new(UploadQueue::new());
    let uri_cache = Arc::new(UriCache::new());
    let delete_queue = Arc::new(DeleteQueue::new());
    let container_path = PathBuf::from(&agent_config.data_container_path);

    let dispatcher = Dispatcher::new(upload_queue.clone(), uri_cache.clone(), container_path);
    let cancellation = CancellationToken::new();

    let upload_worker = UploadWorker::new(
        upload_queue,
        uri_cache,
        DeleteHandle::new(delete_queue.clone()),
        broker.clone(),
        Arc::new(HttpUploader::new()),
        cancellation.clone(),
    );
    let delete_worker = DeleteWorker::new(delete_queue, cancellation.clone());

    let upload_handle = tokio::spawn(upload_worker.run());
    let delete_handle = tokio::spawn(delete_worker.run());
    let consumer_handle = {
        let broker = broker.clone();
        let cancellation = cancellation.clone();
        tokio::spawn(async move { broker.run(&dispatcher, cancellation).await })
    };

    tracing::info!("upload agent started");
    tokio::signal::ctrl_c().await.context("failed to listen for ctrl-c")?;
    tracing::info!("shutting down (ctrl-c received)");
    cancellation.cancel();

    let _ = tokio::join!(upload_handle, delete_handle, consumer_handle);

    Ok(())
}
