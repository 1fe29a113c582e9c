//! # markdown-filter-render
//!
//! The Markdown half of the markdown template filters: a configurable comrak
//! pipeline and a renderer that turns text into HTML with it.
//!
//! ## Quick Start
//!
//! ```rust
//! use markdown_filter_render::{MarkdownFilterOptions, MarkdownRenderer};
//!
//! let renderer = MarkdownRenderer::new(&MarkdownFilterOptions::default())?;
//! assert!(renderer.render("**bold**").contains("<strong>bold</strong>"));
//! assert_eq!(renderer.to_html(None), "");
//! # Ok::<(), markdown_filter_render::RenderError>(())
//! ```
//!
//! ## Configuration
//!
//! The pipeline is chosen by a transformation over a
//! [`MarkdownPipelineBuilder`]. The default enables the extended syntax
//! bundle; replacing it selects a different feature set.
//!
//! ```rust
//! use markdown_filter_render::{MarkdownFilterOptions, MarkdownRenderer};
//!
//! let options = MarkdownFilterOptions::with_pipeline(|builder| {
//!   builder.use_tables().use_footnotes()
//! });
//! let renderer = MarkdownRenderer::new(&options)?;
//! assert!(!renderer.render("~~x~~").contains("<del>"));
//! # Ok::<(), markdown_filter_render::RenderError>(())
//! ```

mod error;
mod options;
pub mod pipeline;
mod renderer;
pub mod settings;

pub use crate::{
  error::RenderError,
  options::{ConfigurePipeline, MarkdownFilterOptions},
  pipeline::{
    Extension,
    MarkdownPipeline,
    MarkdownPipelineBuilder,
    PipelineFeatures,
  },
  renderer::MarkdownRenderer,
  settings::{PipelineSettings, Preset},
};
