//! Caller-facing pipeline configuration.
use std::{fmt, sync::Arc};

use crate::{
  error::RenderError,
  pipeline::{MarkdownPipeline, MarkdownPipelineBuilder},
};

/// Transformation applied to a fresh [`MarkdownPipelineBuilder`] when a
/// renderer is constructed.
pub type ConfigurePipeline = Arc<
  dyn Fn(MarkdownPipelineBuilder) -> MarkdownPipelineBuilder + Send + Sync,
>;

/// Options for the Markdown filters.
///
/// The pipeline transformation replaces the default wholesale; it is not
/// layered on top of the advanced bundle.
#[derive(Clone)]
pub struct MarkdownFilterOptions {
  /// Pipeline transformation. `None` is a configuration error, reported
  /// when a renderer is built from these options.
  pub configure_pipeline: Option<ConfigurePipeline>,
}

impl Default for MarkdownFilterOptions {
  fn default() -> Self {
    Self {
      configure_pipeline: Some(Arc::new(
        MarkdownPipelineBuilder::use_advanced_extensions,
      )),
    }
  }
}

impl fmt::Debug for MarkdownFilterOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MarkdownFilterOptions")
      .field(
        "configure_pipeline",
        &self.configure_pipeline.as_ref().map(|_| "<fn>"),
      )
      .finish()
  }
}

impl MarkdownFilterOptions {
  /// Options with a custom pipeline transformation.
  #[must_use]
  pub fn with_pipeline<F>(configure: F) -> Self
  where
    F: Fn(MarkdownPipelineBuilder) -> MarkdownPipelineBuilder
      + Send
      + Sync
      + 'static,
  {
    Self {
      configure_pipeline: Some(Arc::new(configure)),
    }
  }

  /// Options with the identity transformation: bare CommonMark.
  #[must_use]
  pub fn commonmark() -> Self {
    Self::with_pipeline(|builder| builder)
  }

  /// Apply the transformation to a fresh builder and build the pipeline.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::InvalidConfiguration`] if no transformation is
  /// set.
  pub fn build_pipeline(&self) -> Result<MarkdownPipeline, RenderError> {
    let configure = self.configure_pipeline.as_ref().ok_or_else(|| {
      RenderError::InvalidConfiguration(
        "configure_pipeline must be set to build a markdown pipeline"
          .to_string(),
      )
    })?;

    Ok(configure(MarkdownPipelineBuilder::new()).build())
  }
}
