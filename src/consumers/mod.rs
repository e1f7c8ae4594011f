//! Consumers that terminate streams.

/// Consumer that writes items to standard output.
pub mod stdout_consumer;
/// Consumer that collects items into a vector.
pub mod vec_consumer;

pub use stdout_consumer::StdoutConsumer;
pub use vec_consumer::VecConsumer;
