//! Integer-parsing transformer.
//!
//! [`ParseIntTransformer`] turns a stream of text lines into a stream of
//! `i64` values, trimming surrounding whitespace before parsing. A line that
//! does not parse is a [`ParseLineError`]: fatal under the default `Stop`
//! strategy, dropped with a warning under `Skip`.

use crate::error::{ComponentInfo, ErrorContext, ErrorStrategy, StreamError};
use crate::input::Input;
use crate::output::Output;
use crate::transformer::{Transformer, TransformerConfig};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use thiserror::Error;

/// A line that could not be interpreted as an integer.
#[derive(Debug, Error)]
#[error("cannot parse `{line}` as an integer")]
pub struct ParseLineError {
  /// The offending input line, as received.
  pub line: String,
  /// The underlying integer parse failure.
  #[source]
  pub source: std::num::ParseIntError,
}

/// A transformer that parses each text line into an `i64`.
#[derive(Debug)]
pub struct ParseIntTransformer {
  /// Configuration for the transformer, including error handling strategy.
  pub config: TransformerConfig,
}

impl ParseIntTransformer {
  /// Creates a new `ParseIntTransformer` with default configuration.
  pub fn new() -> Self {
    Self {
      config: TransformerConfig::default(),
    }
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

impl Default for ParseIntTransformer {
  fn default() -> Self {
    Self::new()
  }
}

impl Input for ParseIntTransformer {
  type Input = String;
  type InputStream = Pin<Box<dyn Stream<Item = Result<String, StreamError>> + Send>>;
}

impl Output for ParseIntTransformer {
  type Output = i64;
  type OutputStream = Pin<Box<dyn Stream<Item = Result<i64, StreamError>> + Send>>;
}

impl Transformer for ParseIntTransformer {
  fn transform(&mut self, mut input: Self::InputStream) -> Self::OutputStream {
    let strategy = self.config.error_strategy();
    let info = self.component_info();

    Box::pin(async_stream::stream! {
      while let Some(result) = input.next().await {
        match result {
          Ok(line) => match line.trim().parse::<i64>() {
            Ok(value) => yield Ok(value),
            Err(e) => {
              if matches!(strategy, ErrorStrategy::Skip) {
                tracing::warn!(
                  component = %info.name,
                  line = %line,
                  "skipping unparsable line"
                );
                continue;
              }
              let error = StreamError::new(
                Box::new(ParseLineError {
                  line: line.clone(),
                  source: e,
                }),
                ErrorContext {
                  timestamp: chrono::Utc::now(),
                  item: Some(line),
                  component_name: info.name.clone(),
                  component_type: info.type_name.clone(),
                },
                info.clone(),
              );
              yield Err(error);
              return;
            }
          },
          Err(error) => {
            yield Err(error);
            return;
          }
        }
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
        .unwrap_or_else(|| "parse_int_transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}
