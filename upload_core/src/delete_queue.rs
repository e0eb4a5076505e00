use std::collections::VecDeque;
use std::sync::Mutex;

use domain::model::ProcessRequest;

/// FIFO queue of finalized requests whose local files can't be removed yet
/// because `file_retention_expiry` hasn't passed.
#[derive(Default)]
pub struct DeleteQueue {
    items: Mutex<VecDeque<ProcessRequest>>,
}

impl DeleteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&self, request: ProcessRequest) {
        self.items.lock().unwrap().push_back(request);
    }

    pub fn pop_front(&self) -> Option<ProcessRequest> {
        self.items.lock().unwrap().pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
