//! The Markdown template filter.
use std::{fmt, sync::Arc};

use log::debug;
use markdown_filter_render::{MarkdownFilterOptions, MarkdownRenderer};
use minijinja::{Error, Value};

use crate::{
  error::FilterError,
  html::HtmlEncoder,
  options::{FilterRegistry, ValueConverters},
};

/// Primary filter name.
pub const FILTER_NAME: &str = "markdown";

/// Jekyll-compatible alias of [`FILTER_NAME`].
pub const FILTER_ALIAS: &str = "markdownify";

/// What a filter invocation can see of the options it was registered in.
#[derive(Clone, Copy)]
pub struct FilterContext<'a> {
  /// Converters used to box host objects returned by the filter.
  pub converters: &'a ValueConverters,

  /// Encoder the options write pre-encoded content with.
  pub encoder: &'a dyn HtmlEncoder,
}

impl fmt::Debug for FilterContext<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FilterContext")
      .field("converters", self.converters)
      .field("encoder", &self.encoder)
      .finish()
  }
}

/// A template filter: piped value and arguments in, value out.
pub trait TemplateFilter: fmt::Debug + Send + Sync {
  /// Apply the filter.
  ///
  /// # Errors
  ///
  /// Returns a template error if the filter cannot handle its input.
  fn invoke(
    &self,
    input: &Value,
    arguments: &[Value],
    context: &FilterContext<'_>,
  ) -> Result<Value, Error>;
}

/// Converts the piped value from Markdown to HTML.
///
/// The result is a plain string value, so an escaping environment escapes it
/// like any other string. Use [`crate::MvcMarkdownFilter`] where the HTML
/// must reach the output as markup.
#[derive(Debug, Clone)]
pub struct MarkdownFilter {
  renderer: Arc<MarkdownRenderer>,
}

impl MarkdownFilter {
  #[must_use]
  pub const fn new(renderer: Arc<MarkdownRenderer>) -> Self {
    Self { renderer }
  }

  /// Build the renderer from `options` and wrap it.
  ///
  /// # Errors
  ///
  /// Returns [`FilterError::Render`] if the options carry no pipeline
  /// transformation.
  pub fn from_options(
    options: &MarkdownFilterOptions,
  ) -> Result<Self, FilterError> {
    Ok(Self::new(Arc::new(MarkdownRenderer::new(options)?)))
  }

  #[must_use]
  pub fn renderer(&self) -> &MarkdownRenderer {
    &self.renderer
  }

  /// Render the piped value. Undefined and `none` render as empty text;
  /// non-string values are rendered from their display form.
  #[must_use]
  pub fn render_input(&self, input: &Value) -> String {
    if input.is_undefined() || input.is_none() {
      return self.renderer.to_html(None);
    }

    match input.as_str() {
      Some(markdown) => self.renderer.render(markdown),
      None => self.renderer.render(&input.to_string()),
    }
  }

  /// Register under [`FILTER_NAME`] and [`FILTER_ALIAS`], replacing
  /// existing entries.
  pub fn register(self: &Arc<Self>, filters: &mut FilterRegistry) {
    let filter: Arc<dyn TemplateFilter> = Arc::<Self>::clone(self);
    register_as_markdown(filters, &filter);
  }
}

impl TemplateFilter for MarkdownFilter {
  fn invoke(
    &self,
    input: &Value,
    _arguments: &[Value],
    _context: &FilterContext<'_>,
  ) -> Result<Value, Error> {
    Ok(Value::from(self.render_input(input)))
  }
}

pub(crate) fn register_as_markdown(
  filters: &mut FilterRegistry,
  filter: &Arc<dyn TemplateFilter>,
) {
  filters.insert(FILTER_NAME, Arc::clone(filter));
  filters.insert(FILTER_ALIAS, Arc::clone(filter));
  debug!("Registered markdown filter as `{FILTER_NAME}` and `{FILTER_ALIAS}`");
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "Fine in tests")]
mod tests {
  use std::sync::Arc;

  use markdown_filter_render::MarkdownFilterOptions;
  use minijinja::Value;

  use super::{
    FILTER_ALIAS,
    FILTER_NAME,
    FilterContext,
    MarkdownFilter,
    TemplateFilter,
  };
  use crate::{
    html::DefaultHtmlEncoder,
    options::{FilterRegistry, ValueConverters},
  };

  fn filter() -> MarkdownFilter {
    MarkdownFilter::from_options(&MarkdownFilterOptions::default())
      .expect("default options should build")
  }

  #[test]
  fn test_absent_input_renders_empty() {
    let filter = filter();
    assert_eq!(filter.render_input(&Value::UNDEFINED), "");
    assert_eq!(filter.render_input(&Value::from(())), "");
    assert_eq!(filter.render_input(&Value::from("")), "");
  }

  #[test]
  fn test_non_string_input_uses_display_form() {
    let html = filter().render_input(&Value::from(42));
    assert!(html.contains("<p>42</p>"));
  }

  #[test]
  fn test_invoke_returns_plain_string_and_ignores_arguments() {
    let converters = ValueConverters::default();
    let context = FilterContext {
      converters: &converters,
      encoder:    &DefaultHtmlEncoder,
    };

    let out = filter()
      .invoke(&Value::from("**b**"), &[Value::from("ignored")], &context)
      .expect("filter should not fail");
    let html = out.as_str().expect("filter returns a string");
    assert!(html.contains("<strong>b</strong>"));
  }

  #[test]
  fn test_register_binds_both_names_and_overwrites() {
    let mut filters = FilterRegistry::default();

    let first = Arc::new(filter());
    first.register(&mut filters);
    let second = Arc::new(filter());
    second.register(&mut filters);

    assert_eq!(filters.len(), 2);
    assert_eq!(filters.names().collect::<Vec<_>>(), vec![
      FILTER_NAME,
      FILTER_ALIAS
    ]);

    let bound = filters.get(FILTER_ALIAS).expect("alias registered");
    let expected: Arc<dyn TemplateFilter> = second;
    assert!(Arc::ptr_eq(bound, &expected));
  }
}
