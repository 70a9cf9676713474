//! Markdown to Confluence wiki markup renderer.
//!
//! This crate provides a generic [`MarkdownRenderer`] that walks a
//! pulldown-cmark event stream and produces output through the
//! [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! - [`WikiMarkupBackend`]: Produces Confluence wiki markup (`h1.`, `{code}`,
//!   `||header||`, `*`/`#` lists, ...)
//! - [`Language`]: Maps code fence hints to the languages accepted by the
//!   Confluence code block macro
//!
//! Most callers only need [`convert`].
//!
//! # Example
//!
//! ```
//! use md2confl_renderer::{CodeBlockTheme, RenderOptions, convert};
//!
//! let options = RenderOptions::new().with_theme(CodeBlockTheme::Midnight);
//! let markup = convert("# Hello\n\n**Bold** text", &options).unwrap();
//! assert_eq!(markup, "h1. Hello\n\n*Bold* text\n\n");
//! ```

mod backend;
mod confluence;
mod error;
mod language;
mod options;
mod renderer;
mod state;
mod util;

use pulldown_cmark::{Options, Parser};

pub use backend::RenderBackend;
pub use confluence::WikiMarkupBackend;
pub use error::RenderError;
pub use language::{Language, UnknownLanguage, alias_table};
pub use options::{
    CodeBlockFlag, CodeBlockOptions, CodeBlockPredicate, CodeBlockTheme, NewlineReplacement,
    RenderOptions, TaskListStyle, UnknownTheme,
};
pub use renderer::MarkdownRenderer;
pub use util::{replace_newlines, unescape_html};

/// Parser extensions used by [`convert`].
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Convert a Markdown document to Confluence wiki markup.
///
/// # Errors
///
/// Returns [`RenderError::MalformedTableRow`] if a table row renders without
/// any cell delimiter.
pub fn convert(markdown: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let parser = Parser::new_ext(markdown, parser_options());
    MarkdownRenderer::new(WikiMarkupBackend::new(options.clone())).render(parser)
}
