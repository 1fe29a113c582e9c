//! The pre-encoded HTML template value.
//!
//! [`PreEncodedHtml`] carries [`HtmlContent`] through the template value
//! system. Every conversion treats it as markup that has already been
//! escaped:
//!
//! - it is always truthy, since it stands for the presence of markup rather
//!   than for non-empty text,
//! - it has no numeric value and nothing to iterate over,
//! - its text form is the content written through [`DefaultHtmlEncoder`],
//! - two values are equal when their text forms are.
//!
//! Rendering environments built by [`crate::TemplateOptions`] write it
//! through [`PreEncodedHtml::write_to`] instead of auto-escaping it.
use std::{cmp::Ordering, fmt, iter, sync::Arc};

use minijinja::value::{DynObject, Enumerator, Object, ObjectRepr, Value};

use crate::html::{
  DefaultHtmlEncoder,
  HtmlContent,
  HtmlEncoder,
  HtmlString,
  render_html,
};

/// HTML content exposed as a template value that is never escaped again.
#[derive(Debug, Clone)]
pub struct PreEncodedHtml {
  content: Arc<dyn HtmlContent>,
}

impl PreEncodedHtml {
  #[must_use]
  pub fn new(content: Arc<dyn HtmlContent>) -> Self {
    Self { content }
  }

  /// Wrap optional content; `None` becomes an empty [`HtmlString`].
  #[must_use]
  pub fn from_optional(content: Option<Arc<dyn HtmlContent>>) -> Self {
    Self::new(content.unwrap_or_else(|| Arc::new(HtmlString::default())))
  }

  #[must_use]
  pub const fn to_boolean(&self) -> bool {
    true
  }

  #[must_use]
  pub const fn to_number(&self) -> f64 {
    0.0
  }

  /// The content written through the default encoder.
  #[must_use]
  pub fn to_text(&self) -> String {
    render_html(self.content.as_ref(), &DefaultHtmlEncoder)
  }

  /// The wrapped content itself.
  #[must_use]
  pub const fn raw(&self) -> &Arc<dyn HtmlContent> {
    &self.content
  }

  pub fn enumerate(&self) -> iter::Empty<Value> {
    iter::empty()
  }

  #[must_use]
  pub fn equals(&self, other: &Self) -> bool {
    std::ptr::eq(self, other)
      || Arc::ptr_eq(&self.content, &other.content)
      || self.to_text() == other.to_text()
  }

  /// Write the content with `encoder`, or the default encoder if `None`.
  ///
  /// The locale is accepted for parity with other template values and not
  /// used.
  ///
  /// # Errors
  ///
  /// Propagates errors from the underlying writer.
  pub fn write_to(
    &self,
    out: &mut dyn fmt::Write,
    encoder: Option<&dyn HtmlEncoder>,
    _locale: Option<&str>,
  ) -> fmt::Result {
    self
      .content
      .write_to(out, encoder.unwrap_or(&DefaultHtmlEncoder))
  }

  /// Box into a template value.
  #[must_use]
  pub fn into_value(self) -> Value {
    Value::from_object(self)
  }
}

impl PartialEq for PreEncodedHtml {
  fn eq(&self, other: &Self) -> bool {
    self.equals(other)
  }
}

impl Eq for PreEncodedHtml {}

impl Object for PreEncodedHtml {
  fn repr(self: &Arc<Self>) -> ObjectRepr {
    ObjectRepr::Plain
  }

  fn is_true(self: &Arc<Self>) -> bool {
    self.to_boolean()
  }

  fn enumerate(self: &Arc<Self>) -> Enumerator {
    Enumerator::Empty
  }

  fn custom_cmp(self: &Arc<Self>, other: &DynObject) -> Option<Ordering> {
    let other = other.downcast_ref::<Self>()?;
    Some(self.to_text().cmp(&other.to_text()))
  }

  fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.write_to(f, None, None)
  }
}
