use std::io;

use thiserror::Error;

/// Error type for building and configuring Markdown pipelines.
#[derive(Debug, Error)]
pub enum RenderError {
  #[error("Invalid configuration: {0}")]
  InvalidConfiguration(String),

  #[error("Settings error: {0}")]
  Settings(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}
