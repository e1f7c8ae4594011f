//! Output trait for components that produce output streams.
//!
//! Implemented by producers and transformers that generate data for
//! downstream components. `Output::Output` is the payload type; the stream
//! itself yields `Result<Output, StreamError>` so failures travel in-band.

use crate::error::StreamError;
use futures::Stream;

/// Trait for components that can produce an output stream.
pub trait Output
where
  Self::Output: Send + 'static,
{
  /// The payload type produced on the output stream.
  type Output;
  /// The output stream type, yielding `Result<Self::Output, StreamError>` items.
  type OutputStream: Stream<Item = Result<Self::Output, StreamError>> + Send + 'static;
}
