//! Transformer trait for components that rewrite data streams.
//!
//! Transformers sit between a producer and a consumer, turning an input
//! stream into an output stream. They may be stateless (per-item mapping,
//! like parsing) or stateful (windowed aggregation). Concrete transformers
//! live in [`crate::transformers`].

use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError};
use crate::input::Input;
use crate::output::Output;

/// Configuration for a transformer component.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformerConfig {
  /// The error handling strategy to use when errors occur.
  pub error_strategy: ErrorStrategy,
  /// Optional name for identifying this transformer in logs and errors.
  pub name: Option<String>,
}

impl Default for TransformerConfig {
  fn default() -> Self {
    Self {
      error_strategy: ErrorStrategy::Stop,
      name: None,
    }
  }
}

impl TransformerConfig {
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

/// Trait for components that transform data streams.
pub trait Transformer: Input + Output
where
  Self::Input: std::fmt::Debug + Clone + Send + Sync,
{
  /// Transforms a stream of input items into a stream of output items.
  ///
  /// The returned stream owns whatever state it needs; an upstream error
  /// item is forwarded downstream and ends the stream.
  fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream;

  /// Replaces this transformer's configuration.
  fn set_config(&mut self, config: TransformerConfig) {
    self.set_config_impl(config);
  }

  /// Returns this transformer's configuration.
  fn config(&self) -> &TransformerConfig {
    self.get_config_impl()
  }

  /// Returns a mutable reference to this transformer's configuration.
  fn config_mut(&mut self) -> &mut TransformerConfig {
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

  /// Returns identifying information for this transformer.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name()
        .unwrap_or_else(|| "transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration. Implementation detail of [`Transformer::set_config`].
  fn set_config_impl(&mut self, config: TransformerConfig);

  /// Reads the configuration. Implementation detail of [`Transformer::config`].
  fn get_config_impl(&self) -> &TransformerConfig;

  /// Reads the configuration mutably. Implementation detail of [`Transformer::config_mut`].
  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig;
}
