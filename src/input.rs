//! Input trait for components that consume input streams.
//!
//! Implemented by transformers and consumers that receive data from upstream
//! components. `Input::Input` is the payload type; the stream itself yields
//! `Result<Input, StreamError>` so upstream failures travel in-band.

use crate::error::StreamError;
use futures::Stream;

/// Trait for components that can receive an input stream.
pub trait Input
where
  Self::Input: Send + 'static,
{
  /// The payload type consumed from the input stream.
  type Input;
  /// The input stream type, yielding `Result<Self::Input, StreamError>` items.
  type InputStream: Stream<Item = Result<Self::Input, StreamError>> + Send + 'static;
}
