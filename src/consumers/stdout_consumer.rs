//! Standard output consumer.
//!
//! [`StdoutConsumer`] writes each item to stdout via its `Display` form, one
//! per line, flushing when the stream ends. It is the output stage of the
//! `rollmean` binary; averages are formatted with Rust's default `f64`
//! conversion. A fatal upstream error stops consumption and is returned to
//! the pipeline.

use crate::consumer::{Consumer, ConsumerConfig};
use crate::error::{ComponentInfo, ErrorStrategy, StreamError};
use crate::input::Input;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tokio::io::AsyncWriteExt;

/// A consumer that writes items to standard output, one per line.
#[derive(Debug)]
pub struct StdoutConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + std::fmt::Display + 'static,
{
  /// Configuration for the consumer, including error handling strategy.
  pub config: ConsumerConfig,
  _marker: std::marker::PhantomData<T>,
}

impl<T> StdoutConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + std::fmt::Display + 'static,
{
  /// Creates a new `StdoutConsumer` with default configuration.
  pub fn new() -> Self {
    Self {
      config: ConsumerConfig::default(),
      _marker: std::marker::PhantomData,
    }
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

impl<T> Default for StdoutConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + std::fmt::Display + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Input for StdoutConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + std::fmt::Display + 'static,
{
  type Input = T;
  type InputStream = Pin<Box<dyn Stream<Item = Result<T, StreamError>> + Send>>;
}

#[async_trait]
impl<T> Consumer for StdoutConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + std::fmt::Display + 'static,
{
  async fn consume(&mut self, mut stream: Self::InputStream) -> Result<(), StreamError> {
    let mut stdout = tokio::io::stdout();
    let info = self.component_info();
    let mut failure = None;

    while let Some(result) = stream.next().await {
      match result {
        Ok(value) => {
          let output = format!("{}\n", value);
          if let Err(e) = stdout.write_all(output.as_bytes()).await {
            if matches!(self.config.error_strategy, ErrorStrategy::Skip) {
              tracing::warn!(
                component = %info.name,
                error = %e,
                "failed to write to stdout, continuing"
              );
              continue;
            }
            failure = Some(StreamError::new(
              Box::new(e),
              self.create_error_context(Some(value.to_string())),
              info.clone(),
            ));
            break;
          }
        }
        Err(error) => {
          failure = Some(error);
          break;
        }
      }
    }

    // Flush so every written average is visible before returning.
    if let Err(e) = stdout.flush().await {
      tracing::warn!(
        component = %info.name,
        error = %e,
        "failed to flush stdout"
      );
    }

    match failure {
      None => Ok(()),
      Some(error) => Err(error),
    }
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
        .unwrap_or_else(|| "stdout_consumer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}
