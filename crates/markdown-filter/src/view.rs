//! View-engine integration.
//!
//! Views render with auto-escaping on, which would escape the Markdown
//! filter's output a second time. [`MvcMarkdownFilter`] hands its HTML back
//! as [`HtmlString`] content instead, and the converter installed by
//! [`register_html_content_converter`] boxes any such content as
//! [`PreEncodedHtml`], which the environment writes unescaped.
use std::{any::Any, sync::Arc};

use log::{debug, warn};
use minijinja::{Error, Value};

use crate::{
  error::FilterError,
  filter::{FilterContext, MarkdownFilter, TemplateFilter, register_as_markdown},
  html::{HtmlString, html_content_of},
  options::{FilterRegistry, TemplateContext, TemplateOptions},
  value::PreEncodedHtml,
};

/// The Markdown filter for escaping views.
#[derive(Debug, Clone)]
pub struct MvcMarkdownFilter {
  inner: Arc<MarkdownFilter>,
}

impl MvcMarkdownFilter {
  #[must_use]
  pub const fn new(inner: Arc<MarkdownFilter>) -> Self {
    Self { inner }
  }

  #[must_use]
  pub const fn inner(&self) -> &Arc<MarkdownFilter> {
    &self.inner
  }

  /// Register under the same names as [`MarkdownFilter::register`].
  pub fn register(self: &Arc<Self>, filters: &mut FilterRegistry) {
    let filter: Arc<dyn TemplateFilter> = Arc::<Self>::clone(self);
    register_as_markdown(filters, &filter);
  }
}

impl TemplateFilter for MvcMarkdownFilter {
  fn invoke(
    &self,
    input: &Value,
    _arguments: &[Value],
    context: &FilterContext<'_>,
  ) -> Result<Value, Error> {
    let html = HtmlString::new(self.inner.render_input(input));

    Ok(context.converters.convert(&html).unwrap_or_else(|| {
      warn!(
        "No value converter recognised HTML content; returning it as a safe \
         string"
      );
      Value::from_safe_string(html.into_string())
    }))
  }
}

/// Box `candidate` as [`PreEncodedHtml`] if it is HTML content.
#[must_use]
pub fn html_content_converter(candidate: &dyn Any) -> Option<Value> {
  html_content_of(candidate)
    .map(|content| PreEncodedHtml::new(content).into_value())
}

/// Append [`html_content_converter`] to the options' value converters.
///
/// Every call appends another copy; only the first one can ever match.
pub fn register_html_content_converter(options: &mut TemplateOptions) {
  options.value_converters.push(html_content_converter);
  debug!(
    "Registered HTML content value converter ({} converters)",
    options.value_converters.len()
  );
}

/// Options of a view engine: template options with auto-escaping on.
#[derive(Debug, Clone)]
pub struct ViewEngineOptions {
  pub template_options: TemplateOptions,
}

impl Default for ViewEngineOptions {
  fn default() -> Self {
    Self {
      template_options: TemplateOptions {
        auto_escape: true,
        ..TemplateOptions::default()
      },
    }
  }
}

impl ViewEngineOptions {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// An empty view context.
  #[must_use]
  pub fn context(&self) -> TemplateContext {
    self.template_options.context()
  }

  /// Render a view template.
  ///
  /// # Errors
  ///
  /// Returns [`FilterError::Template`] if the template fails to parse or
  /// evaluate.
  pub fn render(
    &self,
    source: &str,
    context: &TemplateContext,
  ) -> Result<String, FilterError> {
    self.template_options.render(source, context)
  }
}
