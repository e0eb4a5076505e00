use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Mutex;

use domain::model::ProcessRequest;

/// Wraps a `ProcessRequest` with a monotonic sequence number so the heap
/// has a deterministic (if unspecified-by-contract) tie-break: requests of
/// equal priority come out in the order they were pushed.
struct QueueEntry {
    priority: i32,
    sequence: u64,
    request: ProcessRequest,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}
impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    /// `BinaryHeap` is a max-heap; lower `priority` must win, and for equal
    /// priority the earlier `sequence` must win, so both comparisons are
    /// reversed here.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority-ordered queue of requests awaiting upload attempts. Lower
/// `priority` value dequeues first.
#[derive(Default)]
pub struct UploadQueue {
    heap: Mutex<BinaryHeap<QueueEntry>>,
    next_sequence: AtomicU64,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, request: ProcessRequest) {
        let sequence = self.next_sequence.fetch_add(1, AtomicOrdering::Relaxed);
        let entry = QueueEntry {
            priority: request.priority,
            sequence,
            request,
        };
        self.heap.lock().unwrap().push(entry);
    }

    pub fn pop(&self) -> Option<ProcessRequest> {
        self.heap.lock().unwrap().pop().map(|entry| entry.request)
    }

    pub fn len(&self) -> usize {
        self.heap.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use domain::model::UploadRequest;

    use super::*;

    fn request(upload_id: &str, priority: i32) -> ProcessRequest {
        ProcessRequest::new(
            UploadRequest {
                upload_id: upload_id.to_owned(),
                file_list: vec!["a.bin".to_owned()],
                priority,
                time_to_live_seconds: 600,
                file_retention_seconds: None,
                metadata: String::new(),
            },
            PathBuf::from("/data"),
            "corr-1".to_owned(),
        )
    }

    #[test]
    fn dequeues_lowest_priority_first() {
        let queue = UploadQueue::new();
        queue.push(request("a", 10));
        queue.push(request("b", 1));
        queue.push(request("c", 5));

        assert_eq!(queue.pop().unwrap().upload_id, "b");
        assert_eq!(queue.pop().unwrap().upload_id, "c");
        assert_eq!(queue.pop().unwrap().upload_id, "a");
        assert!(queue.pop().is_none());
    }

    #[test]
    fn equal_priority_is_fifo() {
        let queue = UploadQueue::new();
        queue.push(request("first", 5));
        queue.push(request("second", 5));

        assert_eq!(queue.pop().unwrap().upload_id, "first");
        assert_eq!(queue.pop().unwrap().upload_id, "second");
    }
}
