//! In-memory collecting consumer, mainly used by tests and examples.

use crate::consumer::{Consumer, ConsumerConfig};
use crate::error::{ComponentInfo, ErrorStrategy, StreamError};
use crate::input::Input;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;

/// A consumer that collects every item into a vector.
///
/// When the stream carries a fatal error, everything collected before the
/// failure stays accessible via [`VecConsumer::collected`].
#[derive(Debug)]
pub struct VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  collected: Vec<T>,
  /// Configuration for the consumer, including error handling strategy.
  pub config: ConsumerConfig,
}

impl<T> VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Creates a new, empty `VecConsumer`.
  pub fn new() -> Self {
    Self {
      collected: Vec::new(),
      config: ConsumerConfig::default(),
    }
  }

  /// Returns the items collected so far.
  pub fn collected(&self) -> &[T] {
    &self.collected
  }

  /// Consumes this consumer and returns the collected items.
  pub fn into_inner(self) -> Vec<T> {
    self.collected
  }

  /// Sets the error handling strategy for this consumer.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
    self.config.error_strategy = strategy;
    self
  }

  /// Sets the name for this consumer.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl<T> Default for VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Input for VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Input = T;
  type InputStream = Pin<Box<dyn Stream<Item = Result<T, StreamError>> + Send>>;
}

#[async_trait]
impl<T> Consumer for VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  async fn consume(&mut self, mut stream: Self::InputStream) -> Result<(), StreamError> {
    while let Some(result) = stream.next().await {
      match result {
        Ok(item) => self.collected.push(item),
        Err(error) => {
          if matches!(self.config.error_strategy, ErrorStrategy::Skip) {
            tracing::warn!(
              component = %self.component_info().name,
              error = %error,
              "skipping stream error"
            );
            continue;
          }
          return Err(error);
        }
      }
    }
    Ok(())
  }

  fn set_config_impl(&mut self, config: ConsumerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ConsumerConfig {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ConsumerConfig {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name()
        .unwrap_or_else(|| "vec_consumer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::{ErrorContext, StringError};
  use futures::stream;

  #[tokio::test]
  async fn collects_all_items() {
    let mut consumer = VecConsumer::<i64>::new();
    let input: <VecConsumer<i64> as Input>::InputStream =
      Box::pin(stream::iter(vec![Ok(1), Ok(2), Ok(3)]));
    consumer.consume(input).await.unwrap();
    assert_eq!(consumer.collected(), &[1, 2, 3]);
  }

  #[tokio::test]
  async fn keeps_prefix_collected_before_failure() {
    let mut consumer = VecConsumer::<i64>::new();
    let error = StreamError::new(
      Box::new(StringError("boom".to_string())),
      ErrorContext::default(),
      ComponentInfo::default(),
    );
    let input: <VecConsumer<i64> as Input>::InputStream =
      Box::pin(stream::iter(vec![Ok(1), Ok(2), Err(error), Ok(3)]));

    let result = consumer.consume(input).await;
    assert!(result.is_err());
    assert_eq!(consumer.collected(), &[1, 2]);
  }

  #[tokio::test]
  async fn skip_strategy_collects_past_errors() {
    let mut consumer =
      VecConsumer::<i64>::new().with_error_strategy(ErrorStrategy::Skip);
    let error = StreamError::new(
      Box::new(StringError("boom".to_string())),
      ErrorContext::default(),
      ComponentInfo::default(),
    );
    let input: <VecConsumer<i64> as Input>::InputStream =
      Box::pin(stream::iter(vec![Ok(1), Err(error), Ok(3)]));

    consumer.consume(input).await.unwrap();
    assert_eq!(consumer.collected(), &[1, 3]);
  }
}
