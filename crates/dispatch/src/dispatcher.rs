//! Thread lifecycle for a set of workers sharing one buffer.

use core::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use ring_queue::RingBuffer;
use tracing::{error, info};

use crate::actions::{action_for, Action};
use crate::worker::{Report, Worker, WorkerStats};
use crate::{Command, DispatchConfig, DispatchError, Result};

/// Starts worker threads
///
/// Holds no routing state; each worker decides for itself what to claim.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Start one named OS thread per worker
    ///
    /// If any thread fails to start, the ones already running are told to
    /// stop and the spawn error is returned.
    pub fn spawn<T, A>(workers: Vec<Worker<T, A>>) -> Result<DispatchHandle>
    where
        T: PartialEq + fmt::Debug + Send + 'static,
        A: Action + 'static,
    {
        let (shutdown_tx, shutdown_rx) = channel::bounded::<()>(0);
        let (report_tx, report_rx) = channel::unbounded();
        let mut threads = Vec::with_capacity(workers.len());

        for worker in workers {
            let name = format!("worker-{}", worker.name());
            let shutdown = shutdown_rx.clone();
            let reports = report_tx.clone();

            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || worker.run(&shutdown, &reports))
                .map_err(|source| DispatchError::Spawn {
                    name: name.clone(),
                    source,
                })?;
            threads.push((name, handle));
        }

        info!(workers = threads.len(), "dispatcher started");
        Ok(DispatchHandle {
            shutdown: shutdown_tx,
            reports: report_rx,
            threads,
        })
    }
}

/// Running workers
pub struct DispatchHandle {
    shutdown: Sender<()>,
    reports: Receiver<Report>,
    threads: Vec<(String, JoinHandle<WorkerStats>)>,
}

impl DispatchHandle {
    /// Reports from every worker, in arrival order
    #[must_use]
    pub const fn reports(&self) -> &Receiver<Report> {
        &self.reports
    }

    /// Number of worker threads
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.threads.len()
    }

    /// Stop all workers and collect their counters
    ///
    /// Workers notice within one poll interval. Reports still buffered in the
    /// channel are discarded.
    pub fn shutdown(self) -> Result<Vec<(String, WorkerStats)>> {
        let Self {
            shutdown,
            reports: _,
            threads,
        } = self;
        drop(shutdown);

        let mut stats = Vec::with_capacity(threads.len());
        let mut panicked = None;
        for (name, handle) in threads {
            match handle.join() {
                Ok(worker_stats) => stats.push((name, worker_stats)),
                Err(_) => {
                    error!(worker = %name, "worker panicked");
                    if panicked.is_none() {
                        panicked = Some(name);
                    }
                }
            }
        }

        if let Some(name) = panicked {
            return Err(DispatchError::WorkerPanicked { name });
        }
        info!(workers = stats.len(), "dispatcher stopped");
        Ok(stats)
    }
}

impl fmt::Debug for DispatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchHandle")
            .field("workers", &self.threads.len())
            .field("pending_reports", &self.reports.len())
            .finish_non_exhaustive()
    }
}

/// One worker per command, each with the action configured for it
#[must_use]
pub fn standard_workers(
    queue: &Arc<RingBuffer<Command>>,
    config: &DispatchConfig,
) -> Vec<Worker<Command, Box<dyn Action>>> {
    Command::ALL
        .into_iter()
        .map(|command| {
            Worker::new(
                command,
                action_for(command, config),
                Arc::clone(queue),
                config.poll_interval(),
            )
        })
        .collect()
}
