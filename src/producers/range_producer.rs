//! Numeric range producer, generic over `num_traits::Num`.

use crate::error::{ComponentInfo, ErrorStrategy, StreamError};
use crate::output::Output;
use crate::producer::{Producer, ProducerConfig};
use futures::{Stream, stream};
use num_traits::Num;
use std::pin::Pin;

/// A producer that yields `start..end` in increments of `step`.
///
/// An empty range or a non-positive step produces an empty stream.
#[derive(Debug)]
pub struct RangeProducer<T>
where
  T: Num + Copy + std::fmt::Debug + PartialOrd + Send + Sync + 'static,
{
  start: T,
  end: T,
  step: T,
  /// Configuration for the producer, including error handling strategy.
  pub config: ProducerConfig,
}

impl<T> RangeProducer<T>
where
  T: Num + Copy + std::fmt::Debug + PartialOrd + Send + Sync + 'static,
{
  /// Creates a new `RangeProducer` over `start..end` with the given step.
  pub fn new(start: T, end: T, step: T) -> Self {
    Self {
      start,
      end,
      step,
      config: ProducerConfig::default(),
    }
  }

  /// Sets the error handling strategy for this producer.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
    self.config.error_strategy = strategy;
    self
  }

  /// Sets the name for this producer.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl<T> Output for RangeProducer<T>
where
  T: Num + Copy + std::fmt::Debug + PartialOrd + Send + Sync + 'static,
{
  type Output = T;
  type OutputStream = Pin<Box<dyn Stream<Item = Result<T, StreamError>> + Send>>;
}

impl<T> Producer for RangeProducer<T>
where
  T: Num + Copy + std::fmt::Debug + PartialOrd + Send + Sync + 'static,
{
  fn produce(&mut self) -> Self::OutputStream {
    if self.start >= self.end || self.step <= T::zero() {
      return Box::pin(stream::empty());
    }

    let end = self.end;
    let step = self.step;

    let stream = stream::unfold(self.start, move |current| async move {
      if current >= end {
        None
      } else {
        Some((Ok(current), current + step))
      }
    });

    Box::pin(stream)
  }

  fn set_config_impl(&mut self, config: ProducerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name()
        .unwrap_or_else(|| "range_producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::StreamExt;

  #[tokio::test]
  async fn yields_integer_range() {
    let mut producer = RangeProducer::new(0i64, 5, 1);
    let result: Vec<i64> = producer.produce().map(|r| r.unwrap()).collect().await;
    assert_eq!(result, vec![0, 1, 2, 3, 4]);
  }

  #[tokio::test]
  async fn custom_step_skips_values() {
    let mut producer = RangeProducer::new(0i64, 10, 2);
    let result: Vec<i64> = producer.produce().map(|r| r.unwrap()).collect().await;
    assert_eq!(result, vec![0, 2, 4, 6, 8]);
  }

  #[tokio::test]
  async fn inverted_range_is_empty() {
    let mut producer = RangeProducer::new(5i64, 0, 1);
    let result: Vec<i64> = producer.produce().map(|r| r.unwrap()).collect().await;
    assert!(result.is_empty());
  }

  #[tokio::test]
  async fn non_positive_step_is_empty() {
    let mut producer = RangeProducer::new(0i64, 5, 0);
    let result: Vec<i64> = producer.produce().map(|r| r.unwrap()).collect().await;
    assert!(result.is_empty());
  }
}
