use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use chrono::Utc;
use serde_json::{Map, Value};

use crate::utils::sync::{read, write};

use super::task::{AnalysisOutcome, AnalysisStatus};

/// Task id → latest outcome reported by the worker.
///
/// Submissions overwrite unconditionally (last write wins) and are accepted
/// for any id, dispatched or not. Entries live as long as the process.
#[derive(Clone, Default)]
pub struct ResultCorrelator {
    outcomes: Arc<RwLock<HashMap<String, AnalysisOutcome>>>,
}

impl ResultCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an outcome, returning the one it replaced, if any.
    pub fn submit(
        &self,
        task_id: &str,
        worker_status: impl Into<String>,
        data: Map<String, Value>,
    ) -> Option<AnalysisOutcome> {
        let outcome = AnalysisOutcome {
            task_id: task_id.to_string(),
            worker_status: worker_status.into(),
            data,
            received_at: Utc::now(),
        };
        write(&self.outcomes).insert(task_id.to_string(), outcome)
    }

    pub fn lookup(&self, task_id: &str) -> AnalysisStatus {
        match read(&self.outcomes).get(task_id) {
            Some(outcome) => AnalysisStatus::Completed {
                data: outcome.data.clone(),
            },
            None => AnalysisStatus::Processing,
        }
    }

    pub fn outcome(&self, task_id: &str) -> Option<AnalysisOutcome> {
        read(&self.outcomes).get(task_id).cloned()
    }

    pub fn len(&self) -> usize {
        read(&self.outcomes).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn unknown_id_is_processing() {
        let correlator = ResultCorrelator::new();
        assert_eq!(correlator.lookup("y"), AnalysisStatus::Processing);
        assert!(correlator.is_empty());
    }

    #[test]
    fn submit_then_lookup_is_completed() {
        let correlator = ResultCorrelator::new();
        let previous = correlator.submit("x", "completed", payload(json!({"v": 1})));
        assert!(previous.is_none());

        assert_eq!(
            correlator.lookup("x"),
            AnalysisStatus::Completed {
                data: payload(json!({"v": 1}))
            }
        );
        assert_eq!(correlator.lookup("y"), AnalysisStatus::Processing);
    }

    #[test]
    fn later_submit_wins() {
        let correlator = ResultCorrelator::new();
        correlator.submit("x", "completed", payload(json!({"v": 1})));
        let replaced = correlator.submit("x", "completed", payload(json!({"v": 2})));

        assert_eq!(replaced.map(|o| o.data), Some(payload(json!({"v": 1}))));
        assert_eq!(
            correlator.lookup("x"),
            AnalysisStatus::Completed {
                data: payload(json!({"v": 2}))
            }
        );
        assert_eq!(correlator.len(), 1);
    }

    #[test]
    fn worker_status_is_kept_with_outcome() {
        let correlator = ResultCorrelator::new();
        correlator.submit("x", "failed", payload(json!({"error": "model missing"})));
        let outcome = correlator.outcome("x").unwrap();
        assert_eq!(outcome.worker_status, "failed");
        assert_eq!(outcome.task_id, "x");
    }

    #[test]
    fn concurrent_submits_for_distinct_ids_all_land() {
        let correlator = ResultCorrelator::new();
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let correlator = correlator.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        let id = format!("task-{worker}-{i}");
                        correlator.submit(&id, "completed", payload(json!({"i": i})));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(correlator.len(), 800);
        assert_eq!(
            correlator.lookup("task-3-42"),
            AnalysisStatus::Completed {
                data: payload(json!({"i": 42}))
            }
        );
    }

    #[test]
    fn lookups_racing_submits_never_see_torn_payloads() {
        let correlator = ResultCorrelator::new();
        let writer = {
            let correlator = correlator.clone();
            thread::spawn(move || {
                for n in 0..1_000u64 {
                    correlator.submit("shared", "completed", payload(json!({"a": n, "b": n})));
                }
            })
        };

        let mut last_seen = 0;
        for _ in 0..5_000 {
            if let AnalysisStatus::Completed { data } = correlator.lookup("shared") {
                let a = data["a"].as_u64().unwrap();
                assert_eq!(Some(a), data["b"].as_u64());
                assert!(a >= last_seen, "observed an older write after a newer one");
                last_seen = a;
            }
        }
        writer.join().unwrap();

        assert_eq!(
            correlator.lookup("shared"),
            AnalysisStatus::Completed {
                data: payload(json!({"a": 999, "b": 999}))
            }
        );
    }
}
