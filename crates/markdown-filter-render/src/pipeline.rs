//! Markdown pipeline construction.
//!
//! A [`MarkdownPipeline`] is the immutable set of comrak extensions a
//! renderer applies. It is produced by a [`MarkdownPipelineBuilder`], which
//! starts out as bare CommonMark and is switched on feature by feature.
//!
//! # Examples
//!
//! ```
//! use markdown_filter_render::MarkdownPipelineBuilder;
//!
//! let pipeline = MarkdownPipelineBuilder::new()
//!   .use_tables()
//!   .use_strikethrough()
//!   .build();
//!
//! assert!(pipeline.features().tables);
//! assert!(!pipeline.features().footnotes);
//! ```

use comrak::options::Options;
use log::debug;
use serde::Deserialize;

/// A single opt-in Markdown extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extension {
  /// GitHub-style pipe tables.
  Tables,
  /// `- [ ]` and `- [x]` list items.
  TaskLists,
  /// `~~deleted~~` text.
  Strikethrough,
  /// `id` attributes generated from heading text.
  AutoIdentifiers,
  /// `[^1]` footnote references and definitions.
  Footnotes,
  /// Term / `: definition` lists.
  DefinitionLists,
  /// Bare URLs and e-mail addresses turned into links.
  Autolinks,
  /// `^superscript^` text.
  Superscript,
}

/// Feature switches recorded by a [`MarkdownPipelineBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "One switch per comrak extension"
)]
pub struct PipelineFeatures {
  pub tables:           bool,
  pub task_lists:       bool,
  pub strikethrough:    bool,
  pub auto_identifiers: bool,
  pub footnotes:        bool,
  pub definition_lists: bool,
  pub autolinks:        bool,
  pub superscript:      bool,

  /// Prefix prepended to generated heading ids.
  pub heading_id_prefix: String,

  /// Pass raw HTML in the input through to the output. When `false` it is
  /// escaped and rendered as text.
  pub allow_html: bool,
}

impl Default for PipelineFeatures {
  fn default() -> Self {
    Self {
      tables:            false,
      task_lists:        false,
      strikethrough:     false,
      auto_identifiers:  false,
      footnotes:         false,
      definition_lists:  false,
      autolinks:         false,
      superscript:       false,
      heading_id_prefix: String::new(),
      allow_html:        true,
    }
  }
}

impl PipelineFeatures {
  /// Names of the enabled extensions, in a stable order.
  #[must_use]
  pub fn enabled(&self) -> Vec<&'static str> {
    [
      (self.tables, "tables"),
      (self.task_lists, "task_lists"),
      (self.strikethrough, "strikethrough"),
      (self.auto_identifiers, "auto_identifiers"),
      (self.footnotes, "footnotes"),
      (self.definition_lists, "definition_lists"),
      (self.autolinks, "autolinks"),
      (self.superscript, "superscript"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect()
  }
}

/// Builder for [`MarkdownPipeline`] with method chaining.
///
/// The default builder is bare CommonMark with raw HTML passed through.
#[derive(Debug, Clone, Default)]
pub struct MarkdownPipelineBuilder {
  features: PipelineFeatures,
}

impl MarkdownPipelineBuilder {
  /// Create a builder with no extensions enabled.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub const fn use_tables(mut self) -> Self {
    self.features.tables = true;
    self
  }

  #[must_use]
  pub const fn use_task_lists(mut self) -> Self {
    self.features.task_lists = true;
    self
  }

  #[must_use]
  pub const fn use_strikethrough(mut self) -> Self {
    self.features.strikethrough = true;
    self
  }

  /// Generate `id` attributes for headings from their text.
  #[must_use]
  pub const fn use_auto_identifiers(mut self) -> Self {
    self.features.auto_identifiers = true;
    self
  }

  #[must_use]
  pub const fn use_footnotes(mut self) -> Self {
    self.features.footnotes = true;
    self
  }

  #[must_use]
  pub const fn use_definition_lists(mut self) -> Self {
    self.features.definition_lists = true;
    self
  }

  #[must_use]
  pub const fn use_autolinks(mut self) -> Self {
    self.features.autolinks = true;
    self
  }

  #[must_use]
  pub const fn use_superscript(mut self) -> Self {
    self.features.superscript = true;
    self
  }

  /// Enable the extended syntax bundle: tables, task lists, strikethrough,
  /// heading identifiers, footnotes, definition lists, autolinks and
  /// superscript.
  #[must_use]
  pub const fn use_advanced_extensions(self) -> Self {
    self
      .use_tables()
      .use_task_lists()
      .use_strikethrough()
      .use_auto_identifiers()
      .use_footnotes()
      .use_definition_lists()
      .use_autolinks()
      .use_superscript()
  }

  /// Enable a single extension by name.
  #[must_use]
  pub const fn use_extension(self, extension: Extension) -> Self {
    match extension {
      Extension::Tables => self.use_tables(),
      Extension::TaskLists => self.use_task_lists(),
      Extension::Strikethrough => self.use_strikethrough(),
      Extension::AutoIdentifiers => self.use_auto_identifiers(),
      Extension::Footnotes => self.use_footnotes(),
      Extension::DefinitionLists => self.use_definition_lists(),
      Extension::Autolinks => self.use_autolinks(),
      Extension::Superscript => self.use_superscript(),
    }
  }

  /// Prefix generated heading ids. Implies [`Self::use_auto_identifiers`].
  #[must_use]
  pub fn use_heading_id_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
    self.features.heading_id_prefix = prefix.into();
    self.use_auto_identifiers()
  }

  /// Treat raw HTML in the input as text.
  #[must_use]
  pub const fn disable_html(mut self) -> Self {
    self.features.allow_html = false;
    self
  }

  /// Features recorded so far.
  #[must_use]
  pub const fn features(&self) -> &PipelineFeatures {
    &self.features
  }

  /// Freeze the recorded features into a pipeline.
  #[must_use]
  pub fn build(self) -> MarkdownPipeline {
    debug!(
      "Built markdown pipeline: extensions=[{}], allow_html={}",
      self.features.enabled().join(", "),
      self.features.allow_html
    );
    MarkdownPipeline {
      features: self.features,
    }
  }
}

/// An immutable, shareable Markdown pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPipeline {
  features: PipelineFeatures,
}

impl Default for MarkdownPipeline {
  fn default() -> Self {
    MarkdownPipelineBuilder::new().build()
  }
}

impl MarkdownPipeline {
  #[must_use]
  pub const fn features(&self) -> &PipelineFeatures {
    &self.features
  }

  /// Comrak options for one render.
  #[must_use]
  pub fn comrak_options(&self) -> Options<'static> {
    let features = &self.features;
    let mut options = Options::default();

    options.extension.table = features.tables;
    options.extension.tasklist = features.task_lists;
    options.extension.strikethrough = features.strikethrough;
    options.extension.footnotes = features.footnotes;
    options.extension.description_lists = features.definition_lists;
    options.extension.autolink = features.autolinks;
    options.extension.superscript = features.superscript;
    options.extension.header_ids = features
      .auto_identifiers
      .then(|| features.heading_id_prefix.clone());

    options.render.r#unsafe = features.allow_html;
    options.render.escape = !features.allow_html;

    options
  }
}
