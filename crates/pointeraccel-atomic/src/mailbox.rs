//! Bounded lock-free mailbox into the sample path.
//!
//! Producers on other threads `post` values; the sample path `drain`s them
//! with non-blocking pops at the top of each call. Nothing is ever waited
//! on in either direction.
//!
//! # Overflow Behavior
//!
//! When the mailbox is full, `post` hands the value back to the producer
//! instead of blocking or overwriting.

use crossbeam::queue::ArrayQueue;

/// Default capacity for a [`Mailbox`].
pub const DEFAULT_MAILBOX_CAPACITY: usize = 16;

/// Bounded multi-producer, single-consumer hand-off queue.
///
/// # Example
///
/// ```rust
/// use pointeraccel_atomic::Mailbox;
///
/// let mailbox = Mailbox::with_capacity(2);
/// assert!(mailbox.post(1).is_ok());
/// assert!(mailbox.post(2).is_ok());
/// assert_eq!(mailbox.post(3), Err(3));
///
/// let mut seen = Vec::new();
/// mailbox.drain(|v| seen.push(v));
/// assert_eq!(seen, vec![1, 2]);
/// ```
#[derive(Debug)]
pub struct Mailbox<T> {
    queue: ArrayQueue<T>,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    /// Create a mailbox with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAILBOX_CAPACITY)
    }

    /// Create a mailbox holding up to `capacity` values (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: ArrayQueue::new(capacity.max(1)),
        }
    }

    /// Post a value without blocking.
    ///
    /// # Errors
    ///
    /// Returns `Err(value)` if the mailbox is full.
    #[inline]
    pub fn post(&self, value: T) -> Result<(), T> {
        self.queue.push(value)
    }

    /// Pop every value currently queued, oldest first.
    ///
    /// # RT Safety
    ///
    /// Performs at most `capacity` pops, so work is bounded even while
    /// producers keep posting. Returns the number of values delivered.
    #[inline]
    pub fn drain(&self, mut deliver: impl FnMut(T)) -> usize {
        let mut delivered = 0;
        for _ in 0..self.queue.capacity() {
            match self.queue.pop() {
                Some(value) => {
                    deliver(value);
                    delivered += 1;
                }
                None => break,
            }
        }
        delivered
    }

    /// Number of queued values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Maximum number of queued values.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}
