//! The poll / claim / push-back loop for a single tag.
//!
//! A worker owns no routing state. On each poll it pops one item; a matching
//! tag runs the action and the item is discarded, anything else goes straight
//! back into the buffer for another worker to find.

use core::fmt;
use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use ring_queue::RingBuffer;
use tracing::{debug, info, warn};

use crate::actions::{Action, ActionError};

/// Result of one claimed item
#[derive(Debug)]
pub struct Report {
    /// Name of the worker that ran the action
    pub worker: String,
    /// Action output or failure
    pub outcome: Result<String, ActionError>,
}

impl Report {
    /// Whether the action succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(output) => write!(f, "[{}] {output}", self.worker),
            Err(error) => write!(f, "[{}] Error: {error}", self.worker),
        }
    }
}

/// What a single poll did
#[derive(Debug)]
pub enum PollOutcome {
    /// Buffer was empty
    Idle,
    /// Item belonged to another tag and was pushed back
    Returned,
    /// Item matched; the action ran and the item was discarded
    Handled(Report),
}

/// Per-worker counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// Claimed items whose action succeeded
    pub handled: u64,
    /// Claimed items whose action failed
    pub failed: u64,
    /// Items pushed back for other tags
    pub returned: u64,
    /// Polls that found the buffer empty
    pub idle_polls: u64,
}

impl WorkerStats {
    /// Items this worker claimed, successful or not
    #[must_use]
    pub const fn claimed(&self) -> u64 {
        self.handled + self.failed
    }
}

/// Consumer bound to one tag and one action
pub struct Worker<T, A> {
    name: String,
    tag: T,
    action: A,
    queue: Arc<RingBuffer<T>>,
    poll_interval: Duration,
    stats: WorkerStats,
}

impl<T, A> Worker<T, A>
where
    T: PartialEq + fmt::Debug + Send,
    A: Action,
{
    /// Create a worker that claims items equal to `tag`
    #[must_use]
    pub fn new(tag: T, action: A, queue: Arc<RingBuffer<T>>, poll_interval: Duration) -> Self {
        Self {
            name: action.name().to_owned(),
            tag,
            action,
            queue,
            poll_interval,
            stats: WorkerStats::default(),
        }
    }

    /// Worker name, taken from its action
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag this worker claims
    #[must_use]
    pub const fn tag(&self) -> &T {
        &self.tag
    }

    /// Counters so far
    #[must_use]
    pub const fn stats(&self) -> WorkerStats {
        self.stats
    }

    /// Pop at most one item and act on it
    pub fn poll_once(&mut self) -> PollOutcome {
        let Some(item) = self.queue.pop() else {
            self.stats.idle_polls += 1;
            return PollOutcome::Idle;
        };

        if item != self.tag {
            debug!(worker = %self.name, ?item, "not ours, pushing back");
            self.queue.push(item);
            self.stats.returned += 1;
            return PollOutcome::Returned;
        }

        debug!(worker = %self.name, ?item, "claimed");
        let outcome = self.action.execute();
        match &outcome {
            Ok(output) => {
                self.stats.handled += 1;
                debug!(worker = %self.name, %output, "action completed");
            }
            Err(error) => {
                self.stats.failed += 1;
                warn!(worker = %self.name, %error, "action failed");
            }
        }

        PollOutcome::Handled(Report {
            worker: self.name.clone(),
            outcome,
        })
    }

    /// Poll until `shutdown` fires or disconnects, sending each report
    ///
    /// Waits `poll_interval` between polls. A closed report channel does not
    /// stop the loop.
    pub fn run(mut self, shutdown: &Receiver<()>, reports: &Sender<Report>) -> WorkerStats {
        info!(worker = %self.name, tag = ?self.tag, "worker started");

        loop {
            if let PollOutcome::Handled(report) = self.poll_once() {
                if reports.send(report).is_err() {
                    debug!(worker = %self.name, "report receiver closed");
                }
            }

            match shutdown.recv_timeout(self.poll_interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        info!(
            worker = %self.name,
            handled = self.stats.handled,
            failed = self.stats.failed,
            returned = self.stats.returned,
            "worker stopped"
        );
        self.stats
    }
}

impl<T: fmt::Debug, A> fmt::Debug for Worker<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("poll_interval", &self.poll_interval)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
