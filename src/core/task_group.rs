// src/core/task_group.rs
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::debug;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::core::errors::{BenchError, Result};

/// A task that did not complete successfully
#[derive(Debug, Clone)]
pub struct TaskFailure<T> {
    /// Position of the item in the submitted list
    pub index: usize,
    /// The item the task was working on
    pub item: T,
    /// Error message, or the panic payload when the task panicked
    pub message: String,
}

/// Outcome of draining a task group
#[derive(Debug, Clone)]
pub struct PoolReport<T> {
    /// Number of tasks handed to the pool
    pub dispatched: usize,
    /// Failed tasks, in completion order
    pub failures: Vec<TaskFailure<T>>,
}

impl<T> PoolReport<T> {
    fn empty() -> Self {
        PoolReport {
            dispatched: 0,
            failures: Vec::new(),
        }
    }

    /// Number of tasks that finished without error
    pub fn succeeded(&self) -> usize {
        self.dispatched - self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Bounded fan-out of independent blocking jobs
///
/// At most `workers` jobs run at once. Each job's error (or panic) is sent
/// back over a channel and returned in the [`PoolReport`]; the group itself
/// never stops early because a job failed.
pub struct TaskGroup {
    runtime: Runtime,
    workers: usize,
}

impl TaskGroup {
    /// Create a task group running at most `workers` jobs concurrently
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(BenchError::InvalidConfig("worker count must be greater than zero".to_string()));
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(workers)
            .thread_name("query-bench-worker")
            .enable_all()
            .build()?;

        Ok(TaskGroup { runtime, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `job` once per item and wait until every job has finished
    pub fn run<T, F>(&self, items: Vec<T>, job: F) -> Result<PoolReport<T>>
    where
        T: Send + 'static,
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        if items.is_empty() {
            return Ok(PoolReport::empty());
        }

        let job = Arc::new(job);
        let workers = self.workers;

        self.runtime.block_on(async move {
            let semaphore = Arc::new(Semaphore::new(workers));
            let (tx, mut rx) = mpsc::unbounded_channel::<TaskFailure<T>>();
            let mut tasks = JoinSet::new();
            let dispatched = items.len();

            for (index, item) in items.into_iter().enumerate() {
                let permit = Arc::clone(&semaphore)
                    .acquire_owned()
                    .await
                    .map_err(|e| BenchError::Runtime(format!("Worker pool closed: {}", e)))?;
                let tx = tx.clone();
                let job = Arc::clone(&job);

                tasks.spawn_blocking(move || {
                    let _permit = permit;
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| (*job)(&item)));
                    let message = match outcome {
                        Ok(Ok(())) => return,
                        Ok(Err(e)) => e.to_string(),
                        Err(payload) => panic_message(payload.as_ref()),
                    };
                    // The receiver lives until every task has been joined.
                    let _ = tx.send(TaskFailure { index, item, message });
                });
            }
            drop(tx);

            while let Some(joined) = tasks.join_next().await {
                joined.map_err(|e| BenchError::Runtime(format!("Worker task failed to join: {}", e)))?;
            }

            let mut failures = Vec::new();
            while let Some(failure) = rx.recv().await {
                failures.push(failure);
            }

            debug!("Task group drained: {} dispatched, {} failed", dispatched, failures.len());

            Ok::<_, BenchError>(PoolReport { dispatched, failures })
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("task panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("task panicked: {}", s)
    } else {
        "task panicked".to_string()
    }
}
