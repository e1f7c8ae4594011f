//! # rollmean
//!
//! Sliding-window average filtering for numeric line streams.
//!
//! `rollmean` consumes a stream of integer text lines and produces one
//! running average per input line once a fixed-size window has filled. The
//! window keeps an incrementally maintained running total, so each input
//! costs O(1) instead of re-summing the window per line.
//!
//! Processing is expressed as a pipeline of small components:
//!
//! - **Producers** originate a stream (stdin, a file, a vector, a range)
//! - **Transformers** rewrite it (parse lines to integers, compute the
//!   sliding average)
//! - **Consumers** terminate it (write to stdout, collect into a vector)
//!
//! ## Quick Start
//!
//! ```rust
//! use rollmean::consumers::VecConsumer;
//! use rollmean::pipeline::PipelineBuilder;
//! use rollmean::producers::VecProducer;
//! use rollmean::transformers::{MovingAverageTransformer, ParseIntTransformer};
//!
//! # tokio_test::block_on(async {
//! let lines: Vec<String> = ["1", "2", "3", "4", "5", "6", "7"]
//!   .iter()
//!   .map(|s| s.to_string())
//!   .collect();
//!
//! let pipeline = PipelineBuilder::new()
//!   .producer(VecProducer::new(lines))
//!   .transformer(ParseIntTransformer::new())
//!   .transformer(MovingAverageTransformer::new(5).unwrap())
//!   .consumer(VecConsumer::<f64>::new());
//!
//! let consumer = pipeline.run().await.unwrap();
//! assert_eq!(consumer.collected(), &[3.0, 4.0, 5.0]);
//! # });
//! ```
//!
//! The `rollmean` binary wires `stdin (or --input FILE) → parse → average →
//! stdout` with a configurable window size (default 5).

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Consumer trait and configuration.
pub mod consumer;
/// Built-in consumers for common destinations.
pub mod consumers;
/// Error handling types shared by all components.
pub mod error;
/// Input trait for stream-consuming components.
pub mod input;
/// Output trait for stream-producing components.
pub mod output;
/// Pipeline assembly and execution.
pub mod pipeline;
/// Producer trait and configuration.
pub mod producer;
/// Built-in producers for common sources.
pub mod producers;
/// Transformer trait and configuration.
pub mod transformer;
/// Built-in transformers.
pub mod transformers;
/// The sliding window and its running total.
pub mod window;

pub use consumer::{Consumer, ConsumerConfig};
pub use error::{ErrorAction, ErrorStrategy, PipelineError, StreamError};
pub use input::Input;
pub use output::Output;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use producer::{Producer, ProducerConfig};
pub use transformer::{Transformer, TransformerConfig};
pub use window::{DEFAULT_WINDOW_SIZE, SlidingWindow};
