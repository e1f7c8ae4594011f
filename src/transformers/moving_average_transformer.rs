//! Sliding-window average transformer.
//!
//! [`MovingAverageTransformer`] is the core of the filter. It consumes `i64`
//! values and emits one `f64` average per input value once the window has
//! filled: the first `size` inputs initialize the window, the first average
//! is emitted when the window fills, and every later input evicts the oldest
//! value and emits the updated average. Maintaining the running total makes
//! each input O(1) rather than O(size).
//!
//! If the input ends before the window ever fills, a single average is still
//! emitted, dividing the partial sum by the configured window size rather
//! than the number of values collected. An empty input emits nothing.

use crate::error::{ComponentInfo, ErrorStrategy, StreamError};
use crate::input::Input;
use crate::output::Output;
use crate::transformer::{Transformer, TransformerConfig};
use crate::window::{SlidingWindow, WindowResult};
use futures::{Stream, StreamExt};
use std::pin::Pin;

/// A transformer that emits the sliding-window average of its input.
#[derive(Debug)]
pub struct MovingAverageTransformer {
  window: SlidingWindow,
  /// Configuration for the transformer, including error handling strategy.
  pub config: TransformerConfig,
}

impl MovingAverageTransformer {
  /// Creates a new `MovingAverageTransformer` with the given window size.
  ///
  /// Fails with [`crate::window::WindowError::InvalidSize`] when `size` is
  /// zero.
  pub fn new(size: usize) -> WindowResult<Self> {
    Ok(Self {
      window: SlidingWindow::new(size)?,
      config: TransformerConfig::default(),
    })
  }

  /// Returns the configured window size.
  pub fn window_size(&self) -> usize {
    self.window.size()
  }

  /// Sets the error handling strategy for this transformer.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
    self.config.error_strategy = strategy;
    self
  }

  /// Sets the name for this transformer.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl Input for MovingAverageTransformer {
  type Input = i64;
  type InputStream = Pin<Box<dyn Stream<Item = Result<i64, StreamError>> + Send>>;
}

impl Output for MovingAverageTransformer {
  type Output = f64;
  type OutputStream = Pin<Box<dyn Stream<Item = Result<f64, StreamError>> + Send>>;
}

impl Transformer for MovingAverageTransformer {
  fn transform(&mut self, mut input: Self::InputStream) -> Self::OutputStream {
    let mut window = self.window.clone();

    Box::pin(async_stream::stream! {
      while let Some(result) = input.next().await {
        match result {
          Ok(value) => {
            let average = window.slide(value);
            if window.is_full() {
              yield Ok(average);
            }
          }
          Err(error) => {
            // No further averages after a fatal upstream failure.
            yield Err(error);
            return;
          }
        }
      }

      // Input exhausted before the window filled: one average over the
      // nominal window size (see SlidingWindow::average).
      if !window.is_full() && !window.is_empty() {
        yield Ok(window.average());
      }
    })
  }

  fn set_config_impl(&mut self, config: TransformerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name()
        .unwrap_or_else(|| "moving_average_transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::{ErrorContext, StringError};
  use crate::window::WindowError;
  use futures::stream;

  fn input_stream(values: &[i64]) -> <MovingAverageTransformer as Input>::InputStream {
    let values: Vec<Result<i64, StreamError>> = values.iter().map(|&v| Ok(v)).collect();
    Box::pin(stream::iter(values))
  }

  async fn averages(values: &[i64], size: usize) -> Vec<f64> {
    let mut transformer = MovingAverageTransformer::new(size).unwrap();
    let output = transformer.transform(input_stream(values));
    output.map(|r| r.unwrap()).collect().await
  }

  #[test]
  fn rejects_zero_window() {
    let result = MovingAverageTransformer::new(0);
    assert!(matches!(result, Err(WindowError::InvalidSize(0))));
  }

  #[tokio::test]
  async fn emits_one_average_per_input_once_full() {
    assert_eq!(averages(&[1, 2, 3, 4, 5, 6, 7], 5).await, vec![3.0, 4.0, 5.0]);
  }

  #[tokio::test]
  async fn short_input_divides_by_nominal_size() {
    assert_eq!(averages(&[10], 5).await, vec![2.0]);
  }

  #[tokio::test]
  async fn empty_input_emits_nothing() {
    assert_eq!(averages(&[], 5).await, Vec::<f64>::new());
  }

  #[tokio::test]
  async fn window_of_one_echoes_values() {
    assert_eq!(averages(&[4, -2, 9], 1).await, vec![4.0, -2.0, 9.0]);
  }

  #[tokio::test]
  async fn upstream_error_stops_emission() {
    let mut transformer = MovingAverageTransformer::new(2).unwrap();
    let upstream = StreamError::new(
      Box::new(StringError("boom".to_string())),
      ErrorContext::default(),
      ComponentInfo::default(),
    );
    let input: <MovingAverageTransformer as Input>::InputStream =
      Box::pin(stream::iter(vec![Ok(1), Ok(2), Err(upstream), Ok(3)]));
    let output = transformer.transform(input);
    let result: Vec<Result<f64, StreamError>> = output.collect().await;

    // One full-window average, then the error, nothing after.
    assert_eq!(result.len(), 2);
    assert_eq!(*result[0].as_ref().unwrap(), 1.5);
    assert!(result[1].is_err());
  }
}
