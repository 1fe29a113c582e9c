//! # markdown-filter
//!
//! Markdown filters for [`minijinja`] templates, registered as `markdown`
//! and its Jekyll-compatible alias `markdownify`.
//!
//! ## Standalone templates
//!
//! ```rust
//! use markdown_filter::create_standalone;
//!
//! let (_filter, options) = create_standalone(None)?;
//! let html = options.render("{{ '# Hi' | markdown }}", &options.context())?;
//! assert!(html.contains("<h1"));
//! # Ok::<(), markdown_filter::FilterError>(())
//! ```
//!
//! ## Views
//!
//! Views escape their output. The view variant of the filter returns its HTML
//! as pre-encoded content so it is written exactly once, unescaped. The same
//! applies to any [`HtmlContent`] placed in the view context; content of
//! other types goes in through [`TemplateContext::set_html`].
//!
//! ```rust
//! use markdown_filter::{
//!   HtmlString,
//!   ViewEngineOptions,
//!   create_for_view_engine,
//! };
//!
//! let mut view = ViewEngineOptions::new();
//! create_for_view_engine(&mut view, None)?;
//!
//! let mut context = view.context();
//! context.set_value("title", &"<Intro>");
//! context.set_value("body", &HtmlString::new("<p>&lt;x&gt;</p>"));
//!
//! let html = view.render("{{ title }}{{ body }}", &context)?;
//! assert!(html.starts_with("&lt;Intro&gt;"));
//! assert!(html.ends_with("<p>&lt;x&gt;</p>"));
//! # Ok::<(), markdown_filter::FilterError>(())
//! ```

mod error;
mod filter;
pub mod html;
mod options;
mod register;
mod value;
mod view;

pub use markdown_filter_render::{
  MarkdownFilterOptions,
  MarkdownPipelineBuilder,
  MarkdownRenderer,
  PipelineSettings,
};

pub use crate::{
  error::FilterError,
  filter::{
    FILTER_ALIAS,
    FILTER_NAME,
    FilterContext,
    MarkdownFilter,
    TemplateFilter,
  },
  html::{
    DefaultHtmlEncoder,
    HtmlContent,
    HtmlContentBuilder,
    HtmlEncoder,
    HtmlString,
    NullHtmlEncoder,
  },
  options::{
    FilterRegistry,
    TemplateContext,
    TemplateOptions,
    ValueConverter,
    ValueConverters,
  },
  register::{create_for_view_engine, create_standalone},
  value::PreEncodedHtml,
  view::{
    MvcMarkdownFilter,
    ViewEngineOptions,
    html_content_converter,
    register_html_content_converter,
  },
};
