//! Producer trait for components that originate data streams.
//!
//! Producers are the starting point of a pipeline: they own no input and
//! emit a stream of `Result<T, StreamError>` items. Concrete producers live
//! in [`crate::producers`].

use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError};
use crate::output::Output;

/// Configuration for a producer component.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
  /// The error handling strategy to use when producing items.
  pub error_strategy: ErrorStrategy,
  /// Optional name for identifying this producer in logs and errors.
  pub name: Option<String>,
}

impl Default for ProducerConfig {
  fn default() -> Self {
    Self {
      error_strategy: ErrorStrategy::Stop,
      name: None,
    }
  }
}

impl ProducerConfig {
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

/// Trait for components that produce data streams.
pub trait Producer: Output
where
  Self::Output: std::fmt::Debug + Clone + Send + Sync,
{
  /// Produces the stream of items consumed by the rest of the pipeline.
  fn produce(&mut self) -> Self::OutputStream;

  /// Replaces this producer's configuration.
  fn set_config(&mut self, config: ProducerConfig) {
    self.set_config_impl(config);
  }

  /// Returns this producer's configuration.
  fn config(&self) -> &ProducerConfig {
    self.get_config_impl()
  }

  /// Returns a mutable reference to this producer's configuration.
  fn config_mut(&mut self) -> &mut ProducerConfig {
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

  /// Returns identifying information for this producer.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name()
        .unwrap_or_else(|| "producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration. Implementation detail of [`Producer::set_config`].
  fn set_config_impl(&mut self, config: ProducerConfig);

  /// Reads the configuration. Implementation detail of [`Producer::config`].
  fn get_config_impl(&self) -> &ProducerConfig;

  /// Reads the configuration mutably. Implementation detail of [`Producer::config_mut`].
  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig;
}
