//! Fixed-size sliding window with an incrementally maintained sum.
//!
//! # Overview
//!
//! [`SlidingWindow`] is the state behind the moving-average transformer: a
//! fixed-capacity sequence of the most recently seen values plus a running
//! total equal to their sum. Sliding in a new value evicts the oldest once
//! the window is full, so each input costs O(1) instead of re-summing the
//! whole window per item.
//!
//! # Example
//!
//! ```rust
//! use rollmean::window::SlidingWindow;
//!
//! let mut window = SlidingWindow::new(5)?;
//! for value in [1, 2, 3, 4, 5] {
//!   window.slide(value);
//! }
//! assert!(window.is_full());
//! assert_eq!(window.average(), 3.0);
//! assert_eq!(window.slide(6), 4.0); // 1 evicted, 6 admitted
//! # Ok::<(), rollmean::window::WindowError>(())
//! ```

use std::collections::VecDeque;
use thiserror::Error;

/// Window size used when none is configured.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Error type for window configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
  /// The requested window size is not a positive integer.
  #[error("window size must be a positive integer, got {0}")]
  InvalidSize(usize),
}

/// Result type for window operations.
pub type WindowResult<T> = Result<T, WindowError>;

/// A fixed-capacity window over the most recently seen values.
///
/// Invariants: once full, the length stays exactly `size`, and
/// `running_total` equals the sum of the current contents at every
/// observable point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindow {
  size: usize,
  values: VecDeque<i64>,
  running_total: i64,
}

impl SlidingWindow {
  /// Creates an empty window with the given capacity.
  ///
  /// Fails with [`WindowError::InvalidSize`] when `size` is zero.
  pub fn new(size: usize) -> WindowResult<Self> {
    if size == 0 {
      return Err(WindowError::InvalidSize(size));
    }
    Ok(Self {
      size,
      values: VecDeque::with_capacity(size),
      running_total: 0,
    })
  }

  /// Returns the configured capacity.
  pub fn size(&self) -> usize {
    self.size
  }

  /// Returns the number of values currently held.
  pub fn len(&self) -> usize {
    self.values.len()
  }

  /// Returns true if no values have been admitted yet.
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Returns true once the window holds `size` values.
  pub fn is_full(&self) -> bool {
    self.values.len() == self.size
  }

  /// Returns the maintained sum of the current contents.
  pub fn running_total(&self) -> i64 {
    self.running_total
  }

  /// Admits `value`, evicting the oldest element first when full, and
  /// returns the average over the updated window.
  pub fn slide(&mut self, value: i64) -> f64 {
    if self.values.len() == self.size {
      if let Some(oldest) = self.values.pop_front() {
        self.running_total -= oldest;
      }
    }
    self.values.push_back(value);
    self.running_total += value;
    debug_assert_eq!(self.running_total, self.values.iter().sum::<i64>());
    self.average()
  }

  /// Returns `running_total / size`.
  ///
  /// The divisor is always the configured capacity, even while the window is
  /// still filling. A stream that ends before the window fills therefore
  /// averages over the nominal size, not over the count actually collected.
  pub fn average(&self) -> f64 {
    self.running_total as f64 / self.size as f64
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn rejects_zero_size() {
    assert_eq!(SlidingWindow::new(0), Err(WindowError::InvalidSize(0)));
  }

  #[test]
  fn fills_then_evicts_oldest() {
    let mut window = SlidingWindow::new(5).unwrap();
    for value in 1..=5 {
      window.slide(value);
    }
    assert!(window.is_full());
    assert_eq!(window.running_total(), 15);
    assert_eq!(window.average(), 3.0);

    assert_eq!(window.slide(6), 4.0); // drop 1, sum 20
    assert_eq!(window.slide(7), 5.0); // drop 2, sum 25
    assert_eq!(window.len(), 5);
  }

  #[test]
  fn partial_window_divides_by_nominal_size() {
    let mut window = SlidingWindow::new(5).unwrap();
    window.slide(10);
    assert!(!window.is_full());
    assert_eq!(window.average(), 2.0);
  }

  #[test]
  fn window_of_one_tracks_last_value() {
    let mut window = SlidingWindow::new(1).unwrap();
    assert_eq!(window.slide(3), 3.0);
    assert_eq!(window.slide(-9), -9.0);
    assert_eq!(window.running_total(), -9);
  }

  proptest! {
    #[test]
    fn running_total_matches_recomputed_sum(
      values in proptest::collection::vec(-1_000_000i64..1_000_000, 0..64),
      size in 1usize..8,
    ) {
      let mut window = SlidingWindow::new(size).unwrap();
      for &value in &values {
        window.slide(value);
      }
      let tail: i64 = values.iter().rev().take(size).sum();
      prop_assert_eq!(window.running_total(), tail);
      prop_assert!(window.len() <= size);
    }

    #[test]
    fn slide_average_equals_naive_recomputation(
      values in proptest::collection::vec(-1_000i64..1_000, 1..32),
      size in 1usize..8,
    ) {
      let mut window = SlidingWindow::new(size).unwrap();
      for (i, &value) in values.iter().enumerate() {
        let average = window.slide(value);
        let start = (i + 1).saturating_sub(size);
        let sum: i64 = values[start..=i].iter().sum();
        prop_assert_eq!(average, sum as f64 / size as f64);
      }
    }
  }
}
