//! File-based pipeline settings.
//!
//! ```toml
//! preset = "commonmark"
//! extensions = ["tables", "footnotes"]
//! allow_html = false
//! heading_id_prefix = "doc-"
//! ```
use std::{fs, io::Read, path::Path};

use serde::Deserialize;

use crate::{
  error::RenderError,
  options::MarkdownFilterOptions,
  pipeline::{Extension, MarkdownPipelineBuilder},
};

/// Base feature set the listed extensions are added to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
  /// The extended syntax bundle.
  #[default]
  Advanced,
  /// Plain CommonMark.
  Commonmark,
}

/// Pipeline settings as read from a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSettings {
  pub preset:            Preset,
  pub extensions:        Vec<Extension>,
  pub allow_html:        bool,
  pub heading_id_prefix: Option<String>,
}

impl Default for PipelineSettings {
  fn default() -> Self {
    Self {
      preset:            Preset::Advanced,
      extensions:        Vec::new(),
      allow_html:        true,
      heading_id_prefix: None,
    }
  }
}

impl PipelineSettings {
  /// Parse settings from a TOML document.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::Toml`] if the document is malformed or carries
  /// unknown keys.
  pub fn from_toml_str(content: &str) -> Result<Self, RenderError> {
    Ok(toml::from_str(content)?)
  }

  /// Read settings from a TOML stream.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::Io`] if the stream cannot be read and
  /// [`RenderError::Toml`] if its contents do not parse.
  pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, RenderError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Self::from_toml_str(&content)
  }

  /// Load settings from a TOML file.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::Settings`] if the file cannot be read or parsed.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      RenderError::Settings(format!(
        "Failed to read settings file: {}: {e}",
        path.display()
      ))
    })?;

    Self::from_toml_str(&content).map_err(|e| {
      RenderError::Settings(format!(
        "Failed to parse settings from {}: {e}",
        path.display()
      ))
    })
  }

  /// Apply the settings to a builder.
  #[must_use]
  pub fn apply(
    &self,
    builder: MarkdownPipelineBuilder,
  ) -> MarkdownPipelineBuilder {
    let mut builder = match self.preset {
      Preset::Advanced => builder.use_advanced_extensions(),
      Preset::Commonmark => builder,
    };

    for extension in &self.extensions {
      builder = builder.use_extension(*extension);
    }

    if let Some(prefix) = &self.heading_id_prefix {
      builder = builder.use_heading_id_prefix(prefix.as_str());
    }

    if !self.allow_html {
      builder = builder.disable_html();
    }

    builder
  }

  /// Filter options whose pipeline transformation applies these settings.
  #[must_use]
  pub fn into_filter_options(self) -> MarkdownFilterOptions {
    MarkdownFilterOptions::with_pipeline(move |builder| self.apply(builder))
  }
}
