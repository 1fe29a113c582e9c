//! Template options: filter table, value converters and output encoding.
//!
//! [`TemplateOptions`] is the registration target for the Markdown filters.
//! It is turned into a [`minijinja::Environment`] on demand, so two options
//! objects never share filters or converters.
use std::{any::Any, collections::BTreeMap, fmt, sync::Arc};

use indexmap::IndexMap;
use log::debug;
use minijinja::{
  AutoEscape,
  Environment,
  Error,
  ErrorKind,
  Output,
  State,
  escape_formatter,
  value::{Rest, Value},
};
use serde::Serialize;

use crate::{
  error::FilterError,
  filter::{FilterContext, TemplateFilter},
  html::{DefaultHtmlEncoder, HtmlContent, HtmlEncoder, render_html},
  value::PreEncodedHtml,
};

/// Recognises a host object and boxes it as a template value.
pub type ValueConverter =
  Arc<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;

/// Ordered list of value converters; the first match wins.
#[derive(Clone, Default)]
pub struct ValueConverters(Vec<ValueConverter>);

impl ValueConverters {
  /// Append a converter after the existing ones.
  pub fn push<F>(&mut self, converter: F)
  where
    F: Fn(&dyn Any) -> Option<Value> + Send + Sync + 'static,
  {
    self.0.push(Arc::new(converter));
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Box `candidate` with the first converter that recognises it.
  #[must_use]
  pub fn convert(&self, candidate: &dyn Any) -> Option<Value> {
    self.0.iter().find_map(|converter| converter(candidate))
  }
}

impl fmt::Debug for ValueConverters {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("ValueConverters").field(&self.0.len()).finish()
  }
}

/// Filters by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
  filters: IndexMap<String, Arc<dyn TemplateFilter>>,
}

impl FilterRegistry {
  /// Register `filter` under `name`, replacing any previous entry.
  pub fn insert<N: Into<String>>(
    &mut self,
    name: N,
    filter: Arc<dyn TemplateFilter>,
  ) -> Option<Arc<dyn TemplateFilter>> {
    self.filters.insert(name.into(), filter)
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&Arc<dyn TemplateFilter>> {
    self.filters.get(name)
  }

  pub fn remove(&mut self, name: &str) -> Option<Arc<dyn TemplateFilter>> {
    self.filters.shift_remove(name)
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.filters.contains_key(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.filters.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn TemplateFilter>)> {
    self
      .filters
      .iter()
      .map(|(name, filter)| (name.as_str(), filter))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.filters.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.filters.is_empty()
  }
}

#[derive(Debug, Clone)]
enum Entry {
  Boxed(Value),
  Host {
    object:   Arc<dyn Any + Send + Sync>,
    fallback: Value,
  },
}

/// Named values for one template evaluation.
///
/// Host objects are kept as they are and boxed when the context is rendered,
/// with the converters of the options rendering it. A context created before
/// a converter was registered still sees that converter.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
  values: IndexMap<String, Entry>,
}

impl TemplateContext {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set an already boxed value.
  pub fn set<N: Into<String>>(&mut self, name: N, value: Value) -> &mut Self {
    self.values.insert(name.into(), Entry::Boxed(value));
    self
  }

  /// Set a host object. Objects no converter recognises are serialized.
  pub fn set_value<N, T>(&mut self, name: N, value: &T) -> &mut Self
  where
    N: Into<String>,
    T: Any + Serialize + Clone + Send + Sync,
  {
    let fallback = Value::from_serialize(value);
    self.insert_host(name, Arc::new(value.clone()), fallback)
  }

  /// Set HTML content of any type.
  ///
  /// Without a converter that recognises it, the content is rendered as the
  /// plain string written by [`DefaultHtmlEncoder`].
  pub fn set_html<N: Into<String>>(
    &mut self,
    name: N,
    content: Arc<dyn HtmlContent>,
  ) -> &mut Self {
    let fallback =
      Value::from(render_html(content.as_ref(), &DefaultHtmlEncoder));
    self.insert_host(name, Arc::new(content), fallback)
  }

  /// Set a host object that only a converter can box. Unrecognised objects
  /// are undefined in the template.
  pub fn set_object<N, T>(&mut self, name: N, object: T) -> &mut Self
  where
    N: Into<String>,
    T: Any + Send + Sync,
  {
    self.insert_host(name, Arc::new(object), Value::UNDEFINED)
  }

  fn insert_host<N: Into<String>>(
    &mut self,
    name: N,
    object: Arc<dyn Any + Send + Sync>,
    fallback: Value,
  ) -> &mut Self {
    self
      .values
      .insert(name.into(), Entry::Host { object, fallback });
    self
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.values.contains_key(name)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.values.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The value of `name`, boxed with `converters`.
  #[must_use]
  pub fn get(&self, name: &str, converters: &ValueConverters) -> Option<Value> {
    self.values.get(name).map(|entry| box_entry(entry, converters))
  }

  /// The context as a template map value, boxed with `converters`.
  #[must_use]
  pub fn to_value(&self, converters: &ValueConverters) -> Value {
    let map: BTreeMap<String, Value> = self
      .values
      .iter()
      .map(|(name, entry)| (name.clone(), box_entry(entry, converters)))
      .collect();
    Value::from(map)
  }
}

fn box_entry(entry: &Entry, converters: &ValueConverters) -> Value {
  match entry {
    Entry::Boxed(value) => value.clone(),
    Entry::Host { object, fallback } => {
      let object: &dyn Any = object.as_ref();
      converters.convert(object).unwrap_or_else(|| fallback.clone())
    },
  }
}

/// Registration target for template filters.
#[derive(Debug, Clone)]
pub struct TemplateOptions {
  pub filters:          FilterRegistry,
  pub value_converters: ValueConverters,

  /// HTML-escape expression output that is not already marked safe.
  pub auto_escape: bool,

  /// Encoder handed to pre-encoded values when they are written out.
  pub encoder: Arc<dyn HtmlEncoder>,
}

impl Default for TemplateOptions {
  fn default() -> Self {
    Self {
      filters:          FilterRegistry::default(),
      value_converters: ValueConverters::default(),
      auto_escape:      false,
      encoder:          Arc::new(DefaultHtmlEncoder),
    }
  }
}

struct FilterScope {
  converters: ValueConverters,
  encoder:    Arc<dyn HtmlEncoder>,
}

impl FilterScope {
  fn context(&self) -> FilterContext<'_> {
    FilterContext {
      converters: &self.converters,
      encoder:    self.encoder.as_ref(),
    }
  }
}

impl TemplateOptions {
  /// Box a host object the way template values are boxed: registered
  /// converters first, serialization otherwise.
  #[must_use]
  pub fn box_value<T: Any + Serialize>(&self, value: &T) -> Value {
    self
      .value_converters
      .convert(value)
      .unwrap_or_else(|| Value::from_serialize(value))
  }

  /// Box HTML content of any type: registered converters first, its
  /// default-encoded text as a plain string otherwise.
  #[must_use]
  pub fn box_html(&self, content: Arc<dyn HtmlContent>) -> Value {
    self.value_converters.convert(&content).unwrap_or_else(|| {
      Value::from(render_html(content.as_ref(), &DefaultHtmlEncoder))
    })
  }

  /// An empty context for these options.
  #[must_use]
  pub fn context(&self) -> TemplateContext {
    TemplateContext::new()
  }

  /// Build a rendering environment with every registered filter.
  ///
  /// Pre-encoded HTML values are written through their own writer with
  /// [`Self::encoder`]; everything else goes through the regular
  /// (optionally escaping) formatter.
  #[must_use]
  pub fn environment(&self) -> Environment<'static> {
    let mut env = Environment::new();

    let scope = Arc::new(FilterScope {
      converters: self.value_converters.clone(),
      encoder:    Arc::clone(&self.encoder),
    });

    for (name, filter) in self.filters.iter() {
      let filter = Arc::clone(filter);
      let scope = Arc::clone(&scope);
      env.add_filter(name.to_string(), move |value: Value, args: Rest<Value>| {
        filter.invoke(&value, &args, &scope.context())
      });
    }

    let auto_escape = self.auto_escape;
    env.set_auto_escape_callback(move |_name| {
      if auto_escape {
        AutoEscape::Html
      } else {
        AutoEscape::None
      }
    });

    let encoder = Arc::clone(&self.encoder);
    env.set_formatter(move |out, state, value| {
      format_value(out, state, value, encoder.as_ref())
    });

    debug!(
      "Built template environment: filters=[{}], converters={}, \
       auto_escape={}",
      self.filters.names().collect::<Vec<_>>().join(", "),
      self.value_converters.len(),
      self.auto_escape
    );
    env
  }

  /// Render a template source with `context`.
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
    let context = context.to_value(&self.value_converters);
    Ok(self.environment().render_str(source, context)?)
  }
}

fn format_value(
  out: &mut Output<'_>,
  state: &State<'_, '_>,
  value: &Value,
  encoder: &dyn HtmlEncoder,
) -> Result<(), Error> {
  if let Some(html) = value.downcast_object_ref::<PreEncodedHtml>() {
    return html.write_to(out, Some(encoder), None).map_err(|e| {
      Error::new(ErrorKind::InvalidOperation, "failed to write HTML content")
        .with_source(e)
    });
  }
  escape_formatter(out, state, value)
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "Fine in tests")]
mod tests {
  use std::any::Any;

  use minijinja::Value;

  use super::{TemplateContext, TemplateOptions, ValueConverters};

  #[test]
  fn test_converters_first_match_wins() {
    let mut converters = ValueConverters::default();
    converters.push(|candidate: &dyn Any| {
      candidate.downcast_ref::<u32>().map(|_| Value::from("first"))
    });
    converters.push(|candidate: &dyn Any| {
      candidate.downcast_ref::<u32>().map(|_| Value::from("second"))
    });

    assert_eq!(converters.len(), 2);
    assert_eq!(converters.convert(&1_u32), Some(Value::from("first")));
    assert_eq!(converters.convert(&"x"), None);
  }

  #[test]
  fn test_box_value_falls_back_to_serialize() {
    let options = TemplateOptions::default();
    assert_eq!(options.box_value(&"plain"), Value::from("plain"));
    assert_eq!(options.box_value(&3_i64), Value::from(3_i64));
  }

  #[test]
  fn test_plain_render_without_escaping() {
    let options = TemplateOptions::default();
    let mut context = TemplateContext::new();
    context.set("name", Value::from("<b>World</b>"));

    let out = options
      .render("Hello {{ name }}", &context)
      .expect("template should render");
    assert_eq!(out, "Hello <b>World</b>");
  }

  #[test]
  fn test_auto_escape_applies_to_plain_strings() {
    let options = TemplateOptions {
      auto_escape: true,
      ..TemplateOptions::default()
    };
    let mut context = options.context();
    context.set_value("name", &"<b>World</b>");

    let out = options
      .render("Hello {{ name }}", &context)
      .expect("template should render");
    assert!(out.starts_with("Hello &lt;b&gt;World&lt;"));
    assert!(!out.contains("<b>"));
  }

  #[derive(Debug)]
  struct Marker;

  fn marker_converter(candidate: &dyn Any) -> Option<Value> {
    candidate
      .downcast_ref::<Marker>()
      .map(|_| Value::from("marker"))
  }

  #[test]
  fn test_context_boxes_with_converters_at_render_time() {
    let mut options = TemplateOptions::default();
    let mut context = options.context();
    context.set_object("value", Marker);

    assert!(
      context
        .get("value", &options.value_converters)
        .is_some_and(|value| value.is_undefined())
    );

    options.value_converters.push(marker_converter);
    assert_eq!(
      context.get("value", &options.value_converters),
      Some(Value::from("marker"))
    );
    let out = options
      .render("{{ value }}", &context)
      .expect("template should render");
    assert_eq!(out, "marker");
  }

  #[test]
  fn test_context_entries() {
    let mut context = TemplateContext::new();
    assert!(context.is_empty());

    context.set("a", Value::from(1)).set_value("b", &"two");
    assert_eq!(context.len(), 2);
    assert!(context.contains("b"));
    assert!(!context.contains("c"));
    assert_eq!(
      context.get("b", &ValueConverters::default()),
      Some(Value::from("two"))
    );
  }
}
