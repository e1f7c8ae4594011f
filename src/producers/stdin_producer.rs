//! Standard input producer.
//!
//! [`StdinProducer`] reads stdin line by line and emits each line as a
//! `String`, stopping at EOF. It is the default input stage of the `rollmean`
//! binary. Read failures end the stream: fatal under the default `Stop`
//! strategy, logged and swallowed under `Skip`.

use crate::error::{ComponentInfo, ErrorContext, ErrorStrategy, StreamError};
use crate::output::Output;
use crate::producer::{Producer, ProducerConfig};
use futures::Stream;
use std::pin::Pin;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A producer that reads lines from standard input.
#[derive(Debug)]
pub struct StdinProducer {
  /// Configuration for the producer, including error handling strategy.
  pub config: ProducerConfig,
}

impl StdinProducer {
  /// Creates a new `StdinProducer` with default configuration.
  pub fn new() -> Self {
    Self {
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

impl Default for StdinProducer {
  fn default() -> Self {
    Self::new()
  }
}

impl Output for StdinProducer {
  type Output = String;
  type OutputStream = Pin<Box<dyn Stream<Item = Result<String, StreamError>> + Send>>;
}

impl Producer for StdinProducer {
  fn produce(&mut self) -> Self::OutputStream {
    let strategy = self.config.error_strategy();
    let info = self.component_info();

    Box::pin(async_stream::stream! {
      let stdin_handle = tokio::io::stdin();
      let reader = BufReader::new(stdin_handle);
      let mut lines = reader.lines();

      loop {
        match lines.next_line().await {
          Ok(Some(line)) => yield Ok(line),
          Ok(None) => break, // EOF
          Err(e) => {
            if matches!(strategy, ErrorStrategy::Skip) {
              tracing::warn!(
                component = %info.name,
                error = %e,
                "failed to read line from stdin, stopping"
              );
              break;
            }
            let error = StreamError::new(
              Box::new(e),
              ErrorContext {
                timestamp: chrono::Utc::now(),
                item: None,
                component_name: info.name.clone(),
                component_type: info.type_name.clone(),
              },
              info.clone(),
            );
            yield Err(error);
            break;
          }
        }
      }
    })
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
        .unwrap_or_else(|| "stdin_producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}
