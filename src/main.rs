//! `rollmean` reads integer lines and writes their sliding-window averages.
//!
//! One average is printed per input line once the window (default 5 values)
//! has filled:
//!
//! ```sh
//! seq 1 7 | rollmean
//! ```
//!
//! Use a custom window size:
//!
//! ```sh
//! seq 1 100 | rollmean 10
//! ```
//!
//! Read from a file instead of stdin:
//!
//! ```sh
//! rollmean 5 --input values.txt
//! ```
//!
//! A line that does not parse as an integer is fatal: the process reports the
//! failure on stderr and exits non-zero, emitting nothing past the failing
//! line.

use clap::Parser;
use futures::Stream;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::ExitCode;

use rollmean::consumers::StdoutConsumer;
use rollmean::error::{PipelineError, StreamError};
use rollmean::output::Output;
use rollmean::pipeline::PipelineBuilder;
use rollmean::producer::Producer;
use rollmean::producers::{FileProducer, StdinProducer};
use rollmean::transformers::{MovingAverageTransformer, ParseIntTransformer};
use rollmean::window::DEFAULT_WINDOW_SIZE;

#[derive(Parser, Debug)]
#[command(
  name = "rollmean",
  version,
  about = "Sliding-window average filter for numeric line streams"
)]
struct Args {
  /// Number of input values averaged per output line.
  #[arg(
    value_name = "WINDOW",
    default_value_t = DEFAULT_WINDOW_SIZE,
    value_parser = parse_window_size
  )]
  window: usize,

  /// Read input lines from a file instead of stdin.
  #[arg(short, long, value_name = "FILE")]
  input: Option<PathBuf>,
}

fn parse_window_size(value: &str) -> Result<usize, String> {
  match value.parse::<usize>() {
    Ok(0) | Err(_) => Err(format!("`{value}` is not a positive integer")),
    Ok(size) => Ok(size),
  }
}

async fn run_filter<P>(
  producer: P,
  average: MovingAverageTransformer,
) -> Result<(), PipelineError>
where
  P: Producer + 'static,
  P: Output<
      Output = String,
      OutputStream = Pin<Box<dyn Stream<Item = Result<String, StreamError>> + Send>>,
    >,
{
  let pipeline = PipelineBuilder::new()
    .producer(producer)
    .transformer(ParseIntTransformer::new().with_name("parse".to_string()))
    .transformer(average.with_name("average".to_string()))
    .consumer(StdoutConsumer::<f64>::new().with_name("stdout".to_string()));

  pipeline.run().await.map(|_| ())
}

#[tokio::main]
async fn main() -> ExitCode {
  let args = Args::parse();

  // Keep stdout a pure data channel; diagnostics go to stderr.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .init();

  let average = match MovingAverageTransformer::new(args.window) {
    Ok(transformer) => transformer,
    Err(error) => {
      tracing::error!(%error, "invalid configuration");
      return ExitCode::FAILURE;
    }
  };

  let result = match args.input {
    Some(path) => run_filter(FileProducer::new(path), average).await,
    None => run_filter(StdinProducer::new(), average).await,
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(error) => {
      tracing::error!(%error, "pipeline failed");
      ExitCode::FAILURE
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn window_size_parser_accepts_positive_integers() {
    assert_eq!(parse_window_size("5"), Ok(5));
    assert_eq!(parse_window_size("1"), Ok(1));
  }

  #[test]
  fn window_size_parser_rejects_zero_and_garbage() {
    assert!(parse_window_size("0").is_err());
    assert!(parse_window_size("-3").is_err());
    assert!(parse_window_size("five").is_err());
  }

  #[test]
  fn args_default_to_stdin_and_window_five() {
    let args = Args::parse_from(["rollmean"]);
    assert_eq!(args.window, DEFAULT_WINDOW_SIZE);
    assert!(args.input.is_none());
  }

  #[test]
  fn args_accept_window_and_input_file() {
    let args = Args::parse_from(["rollmean", "3", "--input", "values.txt"]);
    assert_eq!(args.window, 3);
    assert_eq!(args.input, Some(PathBuf::from("values.txt")));
  }
}
