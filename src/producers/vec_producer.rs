//! In-memory vector producer, mainly used by tests and examples.

use crate::error::{ComponentInfo, ErrorStrategy, StreamError};
use crate::output::Output;
use crate::producer::{Producer, ProducerConfig};
use futures::{Stream, stream};
use std::pin::Pin;

/// A producer that yields the items of a vector in order.
#[derive(Debug)]
pub struct VecProducer<T> {
  items: Vec<T>,
  /// Configuration for the producer, including error handling strategy.
  pub config: ProducerConfig,
}

impl<T> VecProducer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Creates a new `VecProducer` over the given items.
  pub fn new(items: Vec<T>) -> Self {
    Self {
      items,
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

impl<T> Output for VecProducer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Output = T;
  type OutputStream = Pin<Box<dyn Stream<Item = Result<T, StreamError>> + Send>>;
}

impl<T> Producer for VecProducer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  fn produce(&mut self) -> Self::OutputStream {
    Box::pin(stream::iter(self.items.clone().into_iter().map(Ok)))
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
        .unwrap_or_else(|| "vec_producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::StreamExt;

  #[tokio::test]
  async fn yields_items_in_order() {
    let items = vec!["1".to_string(), "2".to_string()];
    let mut producer = VecProducer::new(items.clone());
    let stream = producer.produce();
    let result: Vec<String> = stream.map(|r| r.unwrap()).collect().await;
    assert_eq!(result, items);
  }

  #[tokio::test]
  async fn empty_vector_yields_nothing() {
    let mut producer = VecProducer::<i64>::new(vec![]);
    let stream = producer.produce();
    let result: Vec<i64> = stream.map(|r| r.unwrap()).collect().await;
    assert!(result.is_empty());
  }

  #[tokio::test]
  async fn produce_can_be_called_again() {
    let mut producer = VecProducer::new(vec![7i64]);
    let first: Vec<i64> = producer.produce().map(|r| r.unwrap()).collect().await;
    let second: Vec<i64> = producer.produce().map(|r| r.unwrap()).collect().await;
    assert_eq!(first, second);
  }
}
