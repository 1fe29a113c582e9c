//! HTML content and encoders.
//!
//! [`HtmlContent`] is anything that already knows how to write itself as
//! HTML. Writers are handed an [`HtmlEncoder`] to escape whatever plain text
//! they carry; pre-encoded markup is written as is.
use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer};

/// Escapes text for inclusion in HTML.
pub trait HtmlEncoder: fmt::Debug + Send + Sync {
  /// Write `text` to `out`, escaped.
  ///
  /// # Errors
  ///
  /// Propagates errors from the underlying writer.
  fn encode(&self, out: &mut dyn fmt::Write, text: &str) -> fmt::Result;
}

/// Escapes `&`, `<`, `>`, `"` and `'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHtmlEncoder;

impl HtmlEncoder for DefaultHtmlEncoder {
  fn encode(&self, out: &mut dyn fmt::Write, text: &str) -> fmt::Result {
    out.write_str(&html_escape::encode_quoted_attribute(text))
  }
}

/// Writes text verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHtmlEncoder;

impl HtmlEncoder for NullHtmlEncoder {
  fn encode(&self, out: &mut dyn fmt::Write, text: &str) -> fmt::Result {
    out.write_str(text)
  }
}

/// Content that writes itself as HTML.
pub trait HtmlContent: fmt::Debug + Send + Sync {
  /// Write the content to `out`, escaping any plain text with `encoder`.
  ///
  /// # Errors
  ///
  /// Propagates errors from the underlying writer.
  fn write_to(
    &self,
    out: &mut dyn fmt::Write,
    encoder: &dyn HtmlEncoder,
  ) -> fmt::Result;
}

/// Write `content` into a new string.
#[must_use]
pub fn render_html(
  content: &dyn HtmlContent,
  encoder: &dyn HtmlEncoder,
) -> String {
  let mut buf = String::new();
  // Writing into a String cannot fail
  content.write_to(&mut buf, encoder).unwrap_or_default();
  buf
}

/// Markup that is already valid, escaped HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlString(String);

impl HtmlString {
  #[must_use]
  pub fn new<S: Into<String>>(html: S) -> Self {
    Self(html.into())
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  #[must_use]
  pub fn into_string(self) -> String {
    self.0
  }
}

impl HtmlContent for HtmlString {
  fn write_to(
    &self,
    out: &mut dyn fmt::Write,
    _encoder: &dyn HtmlEncoder,
  ) -> fmt::Result {
    out.write_str(&self.0)
  }
}

impl From<String> for HtmlString {
  fn from(html: String) -> Self {
    Self(html)
  }
}

impl fmt::Display for HtmlString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl Serialize for HtmlString {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
  Text(String),
  Html(String),
}

/// HTML assembled from plain text and markup.
///
/// Text parts are escaped with the encoder passed to
/// [`HtmlContent::write_to`]; markup parts are written unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlContentBuilder {
  parts: Vec<Part>,
}

impl HtmlContentBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Append plain text, escaped on write.
  #[must_use]
  pub fn append<S: Into<String>>(mut self, text: S) -> Self {
    self.parts.push(Part::Text(text.into()));
    self
  }

  /// Append markup, written unchanged.
  #[must_use]
  pub fn append_html<S: Into<String>>(mut self, html: S) -> Self {
    self.parts.push(Part::Html(html.into()));
    self
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.parts.is_empty()
  }
}

impl HtmlContent for HtmlContentBuilder {
  fn write_to(
    &self,
    out: &mut dyn fmt::Write,
    encoder: &dyn HtmlEncoder,
  ) -> fmt::Result {
    for part in &self.parts {
      match part {
        Part::Text(text) => encoder.encode(out, text)?,
        Part::Html(html) => out.write_str(html)?,
      }
    }
    Ok(())
  }
}

impl Serialize for HtmlContentBuilder {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&render_html(self, &DefaultHtmlEncoder))
  }
}

/// Find the [`HtmlContent`] behind a type-erased host object.
///
/// Recognises [`HtmlString`], [`HtmlContentBuilder`] and
/// `Arc<dyn HtmlContent>`. Content of other types is handed over as the
/// latter, for example through [`crate::TemplateContext::set_html`].
#[must_use]
pub fn html_content_of(
  candidate: &dyn std::any::Any,
) -> Option<Arc<dyn HtmlContent>> {
  if let Some(content) = candidate.downcast_ref::<Arc<dyn HtmlContent>>() {
    return Some(Arc::clone(content));
  }
  if let Some(html) = candidate.downcast_ref::<HtmlString>() {
    return Some(Arc::new(html.clone()));
  }
  if let Some(builder) = candidate.downcast_ref::<HtmlContentBuilder>() {
    return Some(Arc::new(builder.clone()));
  }
  None
}
