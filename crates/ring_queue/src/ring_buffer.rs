//! Mutex-guarded ring buffer with overwrite-on-full semantics.
//!
//! The buffer tracks a `head` (next write), a `tail` (next read) and a `full`
//! flag. `head == tail` is reachable both when empty and when full; the flag
//! tells the two apart so every slot is usable.

use core::fmt;
use core::num::NonZeroUsize;
use core::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::RingBufferError;

/// Index state and storage, only ever touched under the lock
struct RingState<T> {
    /// Fixed-length slot storage
    slots: Box<[Option<T>]>,
    /// Next write position
    head: usize,
    /// Next read position
    tail: usize,
    /// Distinguishes full from empty when `head == tail`
    full: bool,
}

impl<T> RingState<T> {
    fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots: slots.into_boxed_slice(),
            head: 0,
            tail: 0,
            full: false,
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        !self.full && self.head == self.tail
    }

    #[inline]
    fn len(&self) -> usize {
        if self.full {
            return self.capacity();
        }
        // head may sit behind tail after wrapping
        (self.head + self.capacity() - self.tail) % self.capacity()
    }

    #[inline]
    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }
}

/// Consistent view of the index triple taken under the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct RingSnapshot {
    /// Next write position
    pub head: usize,
    /// Next read position
    pub tail: usize,
    /// Full flag
    pub full: bool,
    /// Occupied slots
    pub len: usize,
    /// Fixed capacity
    pub capacity: usize,
}

impl RingSnapshot {
    /// Check the structural invariants of the buffer
    ///
    /// Indices are in range, `full` implies `head == tail`, and `len` matches
    /// what the triple implies.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.capacity == 0 || self.head >= self.capacity || self.tail >= self.capacity {
            return false;
        }
        if self.full && self.head != self.tail {
            return false;
        }
        let expected = if self.full {
            self.capacity
        } else {
            (self.head + self.capacity - self.tail) % self.capacity
        };
        self.len == expected
    }

    /// Empty iff not full and `head == tail`
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.full && self.head == self.tail
    }
}

/// Bounded FIFO queue safe for concurrent use from many threads
///
/// Share it between threads with an `Arc`. All operations take `&self`.
pub struct RingBuffer<T> {
    /// Guarded storage and indices
    state: Mutex<RingState<T>>,
    /// Immutable after construction
    capacity: usize,
    /// Elements discarded by overwrite-on-full
    dropped: AtomicU64,
}

impl<T> RingBuffer<T> {
    /// Create a new ring buffer holding exactly `capacity` elements
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::InvalidCapacity` if `capacity` is zero
    #[inline]
    pub fn new(capacity: usize) -> crate::Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or(RingBufferError::InvalidCapacity { requested: capacity })?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create a new ring buffer from a capacity that cannot be zero
    #[must_use]
    #[inline]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        let capacity = capacity.get();
        Self {
            state: Mutex::new(RingState::with_capacity(capacity)),
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    /// Store `item`, discarding the oldest element first if the buffer is full
    ///
    /// Never blocks waiting for space and never fails.
    #[inline]
    pub fn push(&self, item: T) {
        let mut state = self.state.lock();
        let head = state.head;

        if state.full {
            let tail = state.tail;
            state.tail = state.advance(tail);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            trace!(capacity = self.capacity, "ring buffer full, overwriting oldest element");
        }

        // Replacing the slot drops any overwritten or cleared value
        state.slots[head] = Some(item);
        state.head = state.advance(head);
        state.full = state.head == state.tail;
    }

    /// Remove and return the oldest element, or `None` when empty
    #[must_use]
    #[inline]
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock();
        if state.is_empty() {
            return None;
        }

        let tail = state.tail;
        let item = state.slots[tail].take();
        state.full = false;
        state.tail = state.advance(tail);
        item
    }

    /// Reset to the empty state
    ///
    /// Elements become unreachable through `pop`; their slots are released
    /// when later pushes overwrite them or the buffer is dropped.
    #[inline]
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.tail = state.head;
        state.full = false;
    }

    /// Whether every slot is occupied
    #[must_use]
    #[inline]
    pub fn is_full(&self) -> bool {
        self.state.lock().full
    }

    /// Whether no slot is occupied
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }

    /// Number of occupied slots, in `[0, capacity]`
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    /// Fixed capacity chosen at construction
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total elements discarded by overwrite-on-full since construction
    #[must_use]
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Take a lock-consistent view of the index state
    #[must_use]
    #[inline]
    pub fn snapshot(&self) -> RingSnapshot {
        let state = self.state.lock();
        RingSnapshot {
            head: state.head,
            tail: state.tail,
            full: state.full,
            len: state.len(),
            capacity: self.capacity,
        }
    }
}

impl<T> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("dropped", &self.dropped())
            .finish_non_exhaustive()
    }
}
