use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::utils::sync::lock;

use super::task::{AnalysisRequest, AnalysisTask};

/// FIFO backlog of analysis tasks waiting for the worker's next poll.
///
/// The backlog is only ever emptied wholesale by [`TaskQueue::drain_all`],
/// which swaps it out under the lock. A task therefore lands in exactly one
/// drain: the first one to take the lock after the task was pushed.
#[derive(Clone, Default)]
pub struct TaskQueue {
    backlog: Arc<Mutex<Vec<AnalysisTask>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request to the backlog and return the queued task.
    pub fn enqueue(&self, request: AnalysisRequest) -> AnalysisTask {
        let task = AnalysisTask::new(Uuid::new_v4().to_string(), request, Utc::now());
        lock(&self.backlog).push(task.clone());
        task
    }

    /// Take every queued task in enqueue order, leaving the backlog empty.
    pub fn drain_all(&self) -> Vec<AnalysisTask> {
        std::mem::take(&mut *lock(&self.backlog))
    }

    pub fn len(&self) -> usize {
        lock(&self.backlog).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
