use log::trace;

use crate::{
  error::RenderError,
  options::MarkdownFilterOptions,
  pipeline::MarkdownPipeline,
};

/// Converts Markdown to HTML with a fixed pipeline.
///
/// Stateless once built, so a single renderer can be shared between threads
/// and template evaluations.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
  pipeline: MarkdownPipeline,
}

impl MarkdownRenderer {
  /// Build a renderer from filter options.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::InvalidConfiguration`] if the options carry no
  /// pipeline transformation.
  pub fn new(options: &MarkdownFilterOptions) -> Result<Self, RenderError> {
    Ok(Self::from_pipeline(options.build_pipeline()?))
  }

  #[must_use]
  pub const fn from_pipeline(pipeline: MarkdownPipeline) -> Self {
    Self { pipeline }
  }

  #[must_use]
  pub const fn pipeline(&self) -> &MarkdownPipeline {
    &self.pipeline
  }

  /// Render Markdown to HTML. Empty input yields an empty string.
  #[must_use]
  pub fn render(&self, markdown: &str) -> String {
    if markdown.is_empty() {
      return String::new();
    }

    let html =
      comrak::markdown_to_html(markdown, &self.pipeline.comrak_options());
    trace!(
      "Rendered {} bytes of markdown into {} bytes of HTML",
      markdown.len(),
      html.len()
    );
    html
  }

  /// Render optional Markdown; `None` renders like the empty string.
  #[must_use]
  pub fn to_html(&self, markdown: Option<&str>) -> String {
    self.render(markdown.unwrap_or_default())
  }
}
