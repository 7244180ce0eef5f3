//! # Dispatch - Tag-Routed Polling Workers
//!
//! Cooperative, best-effort dispatch on top of a shared [`RingBuffer`].
//! One producer (the menu console) pushes tagged commands; one worker per tag
//! polls the buffer, runs its action when the tag matches and pushes the item
//! back otherwise.
//!
//! ## Architecture
//!
//! - `command` - the tags carried through the queue
//! - `actions/` - external side effects (RTC clock, interface address)
//! - `worker` - the poll / claim / push-back loop for a single tag
//! - `dispatcher` - thread lifecycle for a set of workers
//! - `console` - menu rendering and input parsing for the producer
//! - `config` - runtime configuration loaded from JSON
//! - `telemetry` - tracing subscriber setup
//!
//! Dispatch is lossy: a full buffer overwrites its oldest command, and no
//! worker keeps a routing table or blocks waiting for data.
//!
//! [`RingBuffer`]: ring_queue::RingBuffer

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unreachable,
    clippy::mem_forget,
    clippy::undocumented_unsafe_blocks,
    clippy::clone_on_ref_ptr,
    clippy::let_underscore_untyped
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::redundant_pub_crate,
    reason = "Production-ready configuration balancing strictness with practicality"
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod actions;
pub mod command;
pub mod config;
pub mod console;
pub mod dispatcher;
pub mod telemetry;
pub mod worker;

pub use actions::{Action, ActionError, Ipv4AddressAction, RtcDateAction, RtcTimeAction};
pub use command::Command;
pub use config::{ConfigError, DispatchConfig};
pub use console::{parse_choice, render_menu, Console, ConsoleSummary, MenuChoice};
pub use dispatcher::{standard_workers, DispatchHandle, Dispatcher};
pub use worker::{PollOutcome, Report, Worker, WorkerStats};

use thiserror::Error;

/// Result type for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Dispatch errors
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DispatchError {
    /// A number that names no command
    #[error("Unknown tag: {tag}")]
    UnknownTag {
        /// The rejected value
        tag: u32,
    },

    /// Worker thread could not be started
    #[error("Failed to spawn worker {name}: {source}")]
    Spawn {
        /// Thread name
        name: String,
        /// OS error
        #[source]
        source: std::io::Error,
    },

    /// Worker thread panicked before shutdown
    #[error("Worker {name} panicked")]
    WorkerPanicked {
        /// Thread name
        name: String,
    },

    /// Shared queue could not be built
    #[error("Queue error: {0}")]
    Queue(#[from] ring_queue::RingBufferError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
