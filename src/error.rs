//! Error handling for pipeline components.
//!
//! Every stream in this crate carries `Result<T, StreamError>` items. A
//! component that hits a failure builds a [`StreamError`] with the original
//! source error, a timestamped [`ErrorContext`] describing what was being
//! processed, and its own [`ComponentInfo`], then consults its configured
//! [`ErrorStrategy`] to decide whether the failure is fatal.
//!
//! The default strategy is [`ErrorStrategy::Stop`]: the error is yielded
//! downstream, reaches the consumer, and surfaces from
//! [`Pipeline::run`](crate::pipeline::Pipeline::run) as a [`PipelineError`].
//! [`ErrorStrategy::Skip`] drops the offending item (with a `tracing` warning)
//! and keeps the stream alive.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Action to take when an error occurs in a pipeline component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
  /// Stop processing immediately.
  Stop,
  /// Skip the item that caused the error and continue processing.
  Skip,
  /// Retry the operation that caused the error.
  Retry,
}

// Type alias for the custom error handler function
type CustomErrorHandler = Arc<dyn Fn(&StreamError) -> ErrorAction + Send + Sync>;

/// Strategy for handling errors in pipeline components.
///
/// Strategies are set per component via its config. `Stop` is the default and
/// makes the first failure fatal to the whole pipeline.
#[derive(Clone)]
pub enum ErrorStrategy {
  /// Stop processing immediately when an error occurs.
  Stop,
  /// Skip items that cause errors and continue processing.
  Skip,
  /// Retry failed operations up to the given number of times before stopping.
  Retry(usize),
  /// Custom error handling logic.
  Custom(CustomErrorHandler),
}

impl fmt::Debug for ErrorStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorStrategy::Stop => write!(f, "ErrorStrategy::Stop"),
      ErrorStrategy::Skip => write!(f, "ErrorStrategy::Skip"),
      ErrorStrategy::Retry(n) => write!(f, "ErrorStrategy::Retry({})", n),
      ErrorStrategy::Custom(_) => write!(f, "ErrorStrategy::Custom"),
    }
  }
}

impl PartialEq for ErrorStrategy {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (ErrorStrategy::Stop, ErrorStrategy::Stop) => true,
      (ErrorStrategy::Skip, ErrorStrategy::Skip) => true,
      (ErrorStrategy::Retry(n1), ErrorStrategy::Retry(n2)) => n1 == n2,
      (ErrorStrategy::Custom(_), ErrorStrategy::Custom(_)) => true,
      _ => false,
    }
  }
}

impl ErrorStrategy {
  /// Creates a custom error handling strategy from a handler function.
  pub fn new_custom<F>(f: F) -> Self
  where
    F: Fn(&StreamError) -> ErrorAction + Send + Sync + 'static,
  {
    Self::Custom(Arc::new(f))
  }
}

/// Error that occurred during stream processing.
///
/// Carries the original source error together with the context in which it
/// happened and the component that reported it.
#[derive(Debug)]
pub struct StreamError {
  /// The original error that occurred.
  pub source: Box<dyn Error + Send + Sync>,
  /// Context about when and where the error occurred.
  pub context: ErrorContext,
  /// Information about the component that encountered the error.
  pub component: ComponentInfo,
  /// Number of times this error has been retried.
  pub retries: usize,
}

impl StreamError {
  /// Creates a new `StreamError` with `retries` set to 0.
  pub fn new(
    source: Box<dyn Error + Send + Sync>,
    context: ErrorContext,
    component: ComponentInfo,
  ) -> Self {
    Self {
      source,
      context,
      component,
      retries: 0,
    }
  }
}

impl Clone for StreamError {
  fn clone(&self) -> Self {
    // The source is type-erased; cloning keeps its rendered message.
    Self {
      source: Box::new(StringError(self.source.to_string())),
      context: self.context.clone(),
      component: self.component.clone(),
      retries: self.retries,
    }
  }
}

impl fmt::Display for StreamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Error in {} ({}): {}",
      self.component.name, self.component.type_name, self.source
    )
  }
}

impl Error for StreamError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(self.source.as_ref())
  }
}

/// A simple error type that wraps a string message.
#[derive(Debug)]
pub struct StringError(
  /// The rendered error message.
  pub String,
);

impl fmt::Display for StringError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Error for StringError {}

/// Context information about when and where an error occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
  /// The timestamp when the error occurred.
  pub timestamp: chrono::DateTime<chrono::Utc>,
  /// The item being processed when the error occurred, rendered as text.
  pub item: Option<String>,
  /// The name of the component that encountered the error.
  pub component_name: String,
  /// The type of the component that encountered the error.
  pub component_type: String,
}

impl Default for ErrorContext {
  fn default() -> Self {
    Self {
      timestamp: chrono::Utc::now(),
      item: None,
      component_name: "default".to_string(),
      component_type: "default".to_string(),
    }
  }
}

/// Information about a pipeline component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInfo {
  /// The name of the component.
  pub name: String,
  /// The type name of the component.
  pub type_name: String,
}

impl Default for ComponentInfo {
  fn default() -> Self {
    Self {
      name: "default".to_string(),
      type_name: "default".to_string(),
    }
  }
}

impl ComponentInfo {
  /// Creates a new `ComponentInfo` with the given name and type name.
  pub fn new(name: String, type_name: String) -> Self {
    Self { name, type_name }
  }
}

/// An error that occurred during pipeline execution.
///
/// Wraps the [`StreamError`] of the component that failed.
#[derive(Debug)]
pub struct PipelineError {
  inner: StreamError,
}

impl PipelineError {
  /// Creates a new `PipelineError` from an error, context, and component information.
  pub fn new<E>(error: E, context: ErrorContext, component: ComponentInfo) -> Self
  where
    E: Error + Send + Sync + 'static,
  {
    Self {
      inner: StreamError::new(Box::new(error), context, component),
    }
  }

  /// Creates a new `PipelineError` from an existing `StreamError`.
  pub fn from_stream_error(error: StreamError) -> Self {
    Self { inner: error }
  }

  /// Returns a reference to the error context.
  pub fn context(&self) -> &ErrorContext {
    &self.inner.context
  }

  /// Returns a reference to the component information.
  pub fn component(&self) -> &ComponentInfo {
    &self.inner.component
  }
}

impl fmt::Display for PipelineError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Pipeline error in {}: {}",
      self.inner.component.name, self.inner.source
    )
  }
}

impl Error for PipelineError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(&*self.inner.source)
  }
}
