//! # Ring Queue - Bounded Overwrite-On-Full Mailbox
//!
//! A fixed-capacity circular queue shared between one producer and several
//! polling consumers.
//!
//! ## Guarantees
//!
//! - `push` never blocks and never fails; a full buffer drops its oldest element
//! - `pop` never blocks; an empty buffer yields `None`
//! - Every mutating call holds the single internal lock for its full duration
//! - Capacity is fixed at construction and never resized
//!
//! ## Usage
//!
//! ```rust
//! use ring_queue::RingBuffer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let queue = RingBuffer::new(2)?;
//! queue.push(1_u32);
//! queue.push(2);
//! queue.push(3); // overwrites 1
//!
//! assert_eq!(queue.pop(), Some(2));
//! assert_eq!(queue.dropped(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::mem_forget,
    clippy::undocumented_unsafe_blocks,
    clippy::clone_on_ref_ptr
)]
#![warn(clippy::all, clippy::pedantic, missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_inline_in_public_items,
    reason = "Public API favours descriptive names over brevity"
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod ring_buffer;

pub use ring_buffer::{RingBuffer, RingSnapshot};

use thiserror::Error;

/// Result type for ring queue operations
pub type Result<T> = core::result::Result<T, RingBufferError>;

/// Ring buffer errors
///
/// Empty pops and overwrites are normal outcomes and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RingBufferError {
    /// Capacity must be strictly positive
    #[error("Invalid capacity: {requested} (must be greater than zero)")]
    InvalidCapacity {
        /// Capacity the caller asked for
        requested: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = RingBufferError::InvalidCapacity { requested: 0 };
        let display = format!("{error}");
        assert!(display.contains("Invalid capacity: 0"));
    }
}
