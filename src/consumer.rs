//! Consumer trait for components that terminate data streams.
//!
//! Consumers drain the stream at the end of a pipeline. [`Consumer::consume`]
//! returns `Err` with the first fatal [`StreamError`] it drains, which is how
//! a parse failure upstream becomes a non-zero exit for the binary. Concrete
//! consumers live in [`crate::consumers`].

use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError};
use crate::input::Input;
use async_trait::async_trait;

/// Configuration for a consumer component.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
  /// The error handling strategy to use when processing items.
  pub error_strategy: ErrorStrategy,
  /// Optional name for identifying this consumer in logs and errors.
  pub name: Option<String>,
}

impl Default for ConsumerConfig {
  fn default() -> Self {
    Self {
      error_strategy: ErrorStrategy::Stop,
      name: None,
    }
  }
}

impl ConsumerConfig {
  /// Sets the error handling strategy for this configuration.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
    self.error_strategy = strategy;
    self
  }

  /// Sets the name for this configuration.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current error handling strategy.
  pub fn error_strategy(&self) -> ErrorStrategy {
    self.error_strategy.clone()
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}

/// Trait for components that consume data streams.
#[async_trait]
pub trait Consumer: Input
where
  Self::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Drains the stream to completion.
  ///
  /// Returns the first fatal error drained from the stream, or `Ok(())` once
  /// the stream ends.
  async fn consume(&mut self, stream: Self::InputStream) -> Result<(), StreamError>;

  /// Replaces this consumer's configuration.
  fn set_config(&mut self, config: ConsumerConfig) {
    self.set_config_impl(config);
  }

  /// Returns this consumer's configuration.
  fn config(&self) -> &ConsumerConfig {
    self.get_config_impl()
  }

  /// Returns a mutable reference to this consumer's configuration.
  fn config_mut(&mut self) -> &mut ConsumerConfig {
    self.get_config_mut_impl()
  }

  /// Maps an error to the action dictated by the configured strategy.
  fn handle_error(&self, error: &StreamError) -> ErrorAction {
    match self.config().error_strategy() {
      ErrorStrategy::Stop => ErrorAction::Stop,
      ErrorStrategy::Skip => ErrorAction::Skip,
      ErrorStrategy::Retry(n) if error.retries < n => ErrorAction::Retry,
      ErrorStrategy::Custom(ref handler) => handler(error),
      _ => ErrorAction::Stop,
    }
  }

  /// Builds an error context for the given in-flight item.
  fn create_error_context(&self, item: Option<String>) -> ErrorContext {
    ErrorContext {
      timestamp: chrono::Utc::now(),
      item,
      component_name: self.component_info().name,
      component_type: self.component_info().type_name,
    }
  }

  /// Returns identifying information for this consumer.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name()
        .unwrap_or_else(|| "consumer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration. Implementation detail of [`Consumer::set_config`].
  fn set_config_impl(&mut self, config: ConsumerConfig);

  /// Reads the configuration. Implementation detail of [`Consumer::config`].
  fn get_config_impl(&self) -> &ConsumerConfig;

  /// Reads the configuration mutably. Implementation detail of [`Consumer::config_mut`].
  fn get_config_mut_impl(&mut self) -> &mut ConsumerConfig;
}
