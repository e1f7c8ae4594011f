//! End-to-end pipeline scenarios for the sliding-window average filter.

use std::io::Write;

use rollmean::consumers::VecConsumer;
use rollmean::error::ErrorStrategy;
use rollmean::pipeline::PipelineBuilder;
use rollmean::producers::{FileProducer, RangeProducer, VecProducer};
use rollmean::transformers::{MovingAverageTransformer, ParseIntTransformer};

fn lines(values: &[&str]) -> Vec<String> {
  values.iter().map(|s| s.to_string()).collect()
}

async fn filter_lines(values: &[&str], window: usize) -> Vec<f64> {
  let pipeline = PipelineBuilder::new()
    .producer(VecProducer::new(lines(values)))
    .transformer(ParseIntTransformer::new())
    .transformer(MovingAverageTransformer::new(window).unwrap())
    .consumer(VecConsumer::<f64>::new());

  pipeline.run().await.unwrap().into_inner()
}

#[tokio::test]
async fn seven_values_window_five() {
  let averages = filter_lines(&["1", "2", "3", "4", "5", "6", "7"], 5).await;
  assert_eq!(averages, vec![3.0, 4.0, 5.0]);
}

#[tokio::test]
async fn emits_len_minus_window_plus_one_averages() {
  let averages = filter_lines(&["5", "5", "5", "5", "5", "5"], 3).await;
  assert_eq!(averages.len(), 6 - 3 + 1);
  assert!(averages.iter().all(|&a| a == 5.0));
}

#[tokio::test]
async fn short_input_divides_by_nominal_window() {
  // Documented quirk: a stream shorter than the window still divides its sum
  // by the configured window size.
  let averages = filter_lines(&["10"], 5).await;
  assert_eq!(averages, vec![2.0]);
}

#[tokio::test]
async fn empty_input_produces_no_output() {
  let averages = filter_lines(&[], 5).await;
  assert!(averages.is_empty());
}

#[tokio::test]
async fn whitespace_around_values_is_ignored() {
  let averages = filter_lines(&[" 1 ", "2\t", " 3"], 3).await;
  assert_eq!(averages, vec![2.0]);
}

#[tokio::test]
async fn rerunning_the_same_input_is_identical() {
  let input = ["4", "8", "15", "16", "23", "42"];
  let first = filter_lines(&input, 4).await;
  let second = filter_lines(&input, 4).await;
  assert_eq!(first, second);
}

#[tokio::test]
async fn non_numeric_line_is_fatal() {
  let pipeline = PipelineBuilder::new()
    .producer(VecProducer::new(lines(&["1", "2", "3", "oops", "5"])))
    .transformer(ParseIntTransformer::new())
    .transformer(MovingAverageTransformer::new(2).unwrap())
    .consumer(VecConsumer::<f64>::new());

  let error = pipeline.run().await.unwrap_err();
  assert!(error.to_string().contains("oops"));
}

#[tokio::test]
async fn nothing_is_emitted_after_the_failing_line() {
  use futures::StreamExt;
  use rollmean::error::StreamError;
  use rollmean::transformer::Transformer;

  let mut parse = ParseIntTransformer::new();
  let mut average = MovingAverageTransformer::new(2).unwrap();

  let input: <ParseIntTransformer as rollmean::input::Input>::InputStream = Box::pin(
    futures::stream::iter(
      lines(&["1", "2", "3", "oops", "5"])
        .into_iter()
        .map(Ok::<String, StreamError>),
    ),
  );
  let output = average.transform(parse.transform(input));
  let items: Vec<Result<f64, StreamError>> = output.collect().await;

  // Averages for windows [1,2] and [2,3], then the parse failure, then end.
  assert_eq!(items.len(), 3);
  assert_eq!(*items[0].as_ref().unwrap(), 1.5);
  assert_eq!(*items[1].as_ref().unwrap(), 2.5);
  assert!(items[2].is_err());
}

#[tokio::test]
async fn skip_strategy_filters_out_bad_lines() {
  let pipeline = PipelineBuilder::new()
    .producer(VecProducer::new(lines(&["1", "2", "x", "3", "4", "5"])))
    .transformer(ParseIntTransformer::new().with_error_strategy(ErrorStrategy::Skip))
    .transformer(MovingAverageTransformer::new(5).unwrap())
    .consumer(VecConsumer::<f64>::new());

  let consumer = pipeline.run().await.unwrap();
  assert_eq!(consumer.collected(), &[3.0]);
}

#[tokio::test]
async fn range_producer_feeds_the_average_directly() {
  let pipeline = PipelineBuilder::new()
    .producer(RangeProducer::new(1i64, 8, 1))
    .transformer(MovingAverageTransformer::new(5).unwrap())
    .consumer(VecConsumer::<f64>::new());

  let consumer = pipeline.run().await.unwrap();
  assert_eq!(consumer.collected(), &[3.0, 4.0, 5.0]);
}

#[tokio::test]
async fn file_input_end_to_end() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  for value in [1, 2, 3, 4, 5, 6, 7] {
    writeln!(file, "{value}").unwrap();
  }

  let pipeline = PipelineBuilder::new()
    .producer(FileProducer::new(file.path().to_path_buf()))
    .transformer(ParseIntTransformer::new())
    .transformer(MovingAverageTransformer::new(5).unwrap())
    .consumer(VecConsumer::<f64>::new());

  let consumer = pipeline.run().await.unwrap();
  assert_eq!(consumer.collected(), &[3.0, 4.0, 5.0]);
}

#[tokio::test]
async fn missing_input_file_fails_the_pipeline() {
  let pipeline = PipelineBuilder::new()
    .producer(FileProducer::new("/nonexistent/rollmean-input".into()))
    .transformer(ParseIntTransformer::new())
    .transformer(MovingAverageTransformer::new(5).unwrap())
    .consumer(VecConsumer::<f64>::new());

  assert!(pipeline.run().await.is_err());
}
