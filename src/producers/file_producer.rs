//! File producer.
//!
//! [`FileProducer`] reads a file line by line and emits each line as a
//! `String`, the input stage behind the binary's `--input` flag. A failure to
//! open the file is always fatal; read failures mid-stream follow the
//! configured error strategy like the stdin producer.

use crate::error::{ComponentInfo, ErrorContext, ErrorStrategy, StreamError};
use crate::output::Output;
use crate::producer::{Producer, ProducerConfig};
use futures::{Stream, StreamExt};
use std::path::PathBuf;
use std::pin::Pin;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;

/// A producer that reads lines from a file.
#[derive(Debug)]
pub struct FileProducer {
  path: PathBuf,
  /// Configuration for the producer, including error handling strategy.
  pub config: ProducerConfig,
}

impl FileProducer {
  /// Creates a new `FileProducer` for the given path.
  pub fn new(path: PathBuf) -> Self {
    Self {
      path,
      config: ProducerConfig::default(),
    }
  }

  /// Sets the error handling strategy for this producer.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
    self.config.error_strategy = strategy;
    self
  }

  /// Sets the name for this producer.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl Output for FileProducer {
  type Output = String;
  type OutputStream = Pin<Box<dyn Stream<Item = Result<String, StreamError>> + Send>>;
}

impl Producer for FileProducer {
  fn produce(&mut self) -> Self::OutputStream {
    let path = self.path.clone();
    let strategy = self.config.error_strategy();
    let info = self.component_info();

    Box::pin(async_stream::stream! {
      let file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
          let error = StreamError::new(
            Box::new(e),
            ErrorContext {
              timestamp: chrono::Utc::now(),
              item: Some(path.display().to_string()),
              component_name: info.name.clone(),
              component_type: info.type_name.clone(),
            },
            info.clone(),
          );
          yield Err(error);
          return;
        }
      };

      let mut lines = LinesStream::new(BufReader::new(file).lines());
      while let Some(next) = lines.next().await {
        match next {
          Ok(line) => yield Ok(line),
          Err(e) => {
            if matches!(strategy, ErrorStrategy::Skip) {
              tracing::warn!(
                component = %info.name,
                path = %path.display(),
                error = %e,
                "failed to read line from file, stopping"
              );
              break;
            }
            let error = StreamError::new(
              Box::new(e),
              ErrorContext {
                timestamp: chrono::Utc::now(),
                item: Some(path.display().to_string()),
                component_name: info.name.clone(),
                component_type: info.type_name.clone(),
              },
              info.clone(),
            );
            yield Err(error);
            break;
          }
        }
      }
    })
  }

  fn set_config_impl(&mut self, config: ProducerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name()
        .unwrap_or_else(|| "file_producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}
