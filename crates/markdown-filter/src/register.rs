//! One-call setup for the two deployment shapes.
use std::sync::Arc;

use markdown_filter_render::{MarkdownFilterOptions, MarkdownRenderer};

use crate::{
  error::FilterError,
  filter::MarkdownFilter,
  options::TemplateOptions,
  view::{MvcMarkdownFilter, ViewEngineOptions, register_html_content_converter},
};

fn build_filter(
  options: Option<MarkdownFilterOptions>,
) -> Result<Arc<MarkdownFilter>, FilterError> {
  let options = options.unwrap_or_default();
  let renderer = MarkdownRenderer::new(&options)?;
  Ok(Arc::new(MarkdownFilter::new(Arc::new(renderer))))
}

/// Build a Markdown filter and register it into fresh template options.
///
/// # Errors
///
/// Returns [`FilterError::Render`] if `options` carries no pipeline
/// transformation.
pub fn create_standalone(
  options: Option<MarkdownFilterOptions>,
) -> Result<(Arc<MarkdownFilter>, TemplateOptions), FilterError> {
  let filter = build_filter(options)?;

  let mut template_options = TemplateOptions::default();
  filter.register(&mut template_options.filters);

  Ok((filter, template_options))
}

/// Register the HTML value converter and the view-safe Markdown filter into
/// a view engine's template options.
///
/// The renderer is built before anything is registered, so a configuration
/// error leaves `view_options` untouched.
///
/// # Errors
///
/// Returns [`FilterError::Render`] if `options` carries no pipeline
/// transformation.
pub fn create_for_view_engine(
  view_options: &mut ViewEngineOptions,
  options: Option<MarkdownFilterOptions>,
) -> Result<&mut ViewEngineOptions, FilterError> {
  let filter = Arc::new(MvcMarkdownFilter::new(build_filter(options)?));

  register_html_content_converter(&mut view_options.template_options);
  filter.register(&mut view_options.template_options.filters);

  Ok(view_options)
}
