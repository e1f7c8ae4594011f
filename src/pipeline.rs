//! Pipeline assembly and execution.
//!
//! [`PipelineBuilder`] wires a producer, one or more transformers, and a
//! consumer into a [`Pipeline`]. The builder is a typestate machine, so a
//! pipeline cannot be run until all three stages are present. Stages are
//! connected eagerly: each `transformer` call consumes the upstream stream
//! and replaces it with the transformed one.
//!
//! [`Pipeline::run`] drives the consumer to completion on the current task
//! and returns the consumer (so collected results can be inspected) or the
//! [`PipelineError`] of the first fatal failure.

use crate::consumer::Consumer;
use crate::error::PipelineError;
use crate::producer::Producer;
use crate::transformer::Transformer;
use std::marker::PhantomData;

/// Builder state: no stages added yet.
pub struct Empty;
/// Builder state: a producer has been added.
pub struct HasProducer<P>(PhantomData<P>);
/// Builder state: a producer and at least one transformer have been added.
pub struct HasTransformer<P, T>(PhantomData<(P, T)>);

/// Typestate builder for assembling a pipeline.
pub struct PipelineBuilder<State> {
  producer_stream: Option<Box<dyn std::any::Any + Send + 'static>>,
  transformer_stream: Option<Box<dyn std::any::Any + Send + 'static>>,
  _state: State,
}

/// A fully assembled pipeline, ready to run.
pub struct Pipeline<P, T, C>
where
  P: Producer,
  T: Transformer,
  C: Consumer,
  P::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
  T::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
  T::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
  C::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  transformer_stream: Option<T::OutputStream>,
  consumer: Option<C>,
  _producer: PhantomData<P>,
}

impl PipelineBuilder<Empty> {
  /// Creates a builder with no stages.
  pub fn new() -> Self {
    PipelineBuilder {
      producer_stream: None,
      transformer_stream: None,
      _state: Empty,
    }
  }

  /// Adds the producer stage and captures its output stream.
  pub fn producer<P>(mut self, mut producer: P) -> PipelineBuilder<HasProducer<P>>
  where
    P: Producer + 'static,
    P::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
    P::OutputStream: 'static,
  {
    let stream = producer.produce();
    self.producer_stream = Some(Box::new(stream));

    PipelineBuilder {
      producer_stream: self.producer_stream,
      transformer_stream: None,
      _state: HasProducer(PhantomData),
    }
  }
}

impl Default for PipelineBuilder<Empty> {
  fn default() -> Self {
    Self::new()
  }
}

impl<P> PipelineBuilder<HasProducer<P>>
where
  P: Producer + 'static,
  P::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
  P::OutputStream: 'static,
{
  /// Adds the first transformer stage, connecting it to the producer.
  pub fn transformer<T>(mut self, mut transformer: T) -> PipelineBuilder<HasTransformer<P, T>>
  where
    T: Transformer + 'static,
    T::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
    T::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
    T::InputStream: From<P::OutputStream>,
    T::OutputStream: 'static,
  {
    // The typestate guarantees the producer stream is present and of the
    // boxed type stored by `producer`.
    let producer_stream = self
      .producer_stream
      .take()
      .unwrap()
      .downcast::<P::OutputStream>()
      .unwrap();

    let transformer_stream = transformer.transform((*producer_stream).into());
    self.transformer_stream = Some(Box::new(transformer_stream));

    PipelineBuilder {
      producer_stream: None,
      transformer_stream: self.transformer_stream,
      _state: HasTransformer(PhantomData),
    }
  }
}

impl<P, T> PipelineBuilder<HasTransformer<P, T>>
where
  P: Producer + 'static,
  T: Transformer + 'static,
  P::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
  T::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
  T::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
  T::OutputStream: 'static,
{
  /// Adds a further transformer stage, connecting it to the previous one.
  pub fn transformer<U>(mut self, mut transformer: U) -> PipelineBuilder<HasTransformer<P, U>>
  where
    U: Transformer + 'static,
    U::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
    U::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
    U::InputStream: From<T::OutputStream>,
    U::OutputStream: 'static,
  {
    let transformer_stream = self
      .transformer_stream
      .take()
      .unwrap()
      .downcast::<T::OutputStream>()
      .unwrap();

    let new_stream = transformer.transform((*transformer_stream).into());
    self.transformer_stream = Some(Box::new(new_stream));

    PipelineBuilder {
      producer_stream: None,
      transformer_stream: self.transformer_stream,
      _state: HasTransformer(PhantomData),
    }
  }

  /// Adds the consumer stage, completing the pipeline.
  pub fn consumer<C>(mut self, consumer: C) -> Pipeline<P, T, C>
  where
    C: Consumer + 'static,
    C::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
    C::InputStream: From<T::OutputStream>,
  {
    let transformer_stream = self
      .transformer_stream
      .take()
      .unwrap()
      .downcast::<T::OutputStream>()
      .unwrap();

    Pipeline {
      transformer_stream: Some(*transformer_stream),
      consumer: Some(consumer),
      _producer: PhantomData,
    }
  }
}

impl<P, T, C> Pipeline<P, T, C>
where
  P: Producer,
  T: Transformer,
  C: Consumer,
  P::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
  T::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
  T::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
  C::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Drives the consumer over the assembled stream until the input is
  /// exhausted or a fatal error is drained.
  ///
  /// Returns the consumer on success so callers can retrieve anything it
  /// collected.
  pub async fn run(mut self) -> Result<C, PipelineError>
  where
    C::InputStream: From<T::OutputStream>,
  {
    let transformer_stream = self.transformer_stream.take().unwrap();
    let mut consumer = self.consumer.take().unwrap();

    match consumer.consume(transformer_stream.into()).await {
      Ok(()) => Ok(consumer),
      Err(error) => Err(PipelineError::from_stream_error(error)),
    }
  }
}
