//! Circular buffer for trailing-window calculations.
//!
//! The [`RingBuffer`] type keeps the most recent `capacity` observations. The
//! standardization engine uses it as its calibration window; the ZigZag state
//! machine and the rolling utilities do not need one.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::num::TaFloat;

/// A fixed-capacity circular buffer.
///
/// When the buffer is full, adding a new value removes the oldest.
///
/// # Example
///
/// ```rust
/// use ti_core::RingBuffer;
///
/// let mut buffer: RingBuffer<f64> = RingBuffer::new(3).unwrap();
///
/// buffer.push(1.0);
/// buffer.push(2.0);
/// buffer.push(3.0);
/// assert!(buffer.is_full());
///
/// assert_eq!(buffer.push(4.0), Some(1.0));
/// assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: TaFloat"))]
pub struct RingBuffer<T: TaFloat> {
    buffer: Vec<T>,
    /// Next write position; the oldest element once full.
    head: usize,
    len: usize,
    capacity: usize,
}

impl<T: TaFloat> RingBuffer<T> {
    /// Create a new ring buffer with the specified capacity.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidWindow`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(IndicatorError::InvalidWindow(capacity));
        }
        Ok(Self {
            buffer: vec![T::ZERO; capacity],
            head: 0,
            len: 0,
            capacity,
        })
    }

    /// Push a value, returning the evicted one if the buffer was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        let old = if self.is_full() {
            Some(self.buffer[self.head])
        } else {
            self.len += 1;
            None
        };

        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        old
    }

    /// Returns `true` if the buffer is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Returns the number of elements in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns an iterator over the values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (older, newer) = if self.is_full() {
            (&self.buffer[self.head..], &self.buffer[..self.head])
        } else {
            (&self.buffer[..self.len], &self.buffer[..0])
        };
        older.iter().chain(newer.iter())
    }

    /// Copy the values, oldest first, into `out` (cleared first).
    pub fn copy_into(&self, out: &mut Vec<T>) {
        out.clear();
        out.extend(self.iter().copied());
    }
}
