use markdown_filter_render::RenderError;
use thiserror::Error;

/// Error type for filter registration and template rendering.
#[derive(Debug, Error)]
pub enum FilterError {
  #[error("Render error: {0}")]
  Render(#[from] RenderError),

  #[error("Template error: {0}")]
  Template(#[from] minijinja::Error),
}
