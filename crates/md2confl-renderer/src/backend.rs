//! Render backend trait for per-construct output.
//!
//! The [`MarkdownRenderer`](crate::MarkdownRenderer) walks the parser's event
//! stream and calls one backend method per closed Markdown construct. Children
//! are always rendered first, so every method receives its content as an
//! already rendered string and returns the fragment for the whole construct.

use pulldown_cmark::Alignment;

use crate::error::RenderError;

/// Backend trait producing one output fragment per Markdown construct.
///
/// Implementations must be pure: the same inputs always yield the same
/// fragment.
pub trait RenderBackend {
    /// Render a paragraph from its inline content.
    fn paragraph(&self, text: &str) -> String;

    /// Render a heading.
    ///
    /// # Arguments
    ///
    /// * `text` - Rendered heading content
    /// * `level` - Heading level (1-6)
    fn heading(&self, text: &str, level: u8) -> String;

    /// Render strong (bold) text.
    fn strong(&self, text: &str) -> String;

    /// Render emphasized (italic) text.
    fn emphasis(&self, text: &str) -> String;

    /// Render struck-through text.
    fn strikethrough(&self, text: &str) -> String;

    /// Render an inline code span.
    fn code_span(&self, code: &str) -> String;

    /// Render a blockquote from its rendered block content.
    fn blockquote(&self, quote: &str) -> String;

    /// Render an explicit (hard) line break.
    fn line_break(&self) -> String;

    /// Render a horizontal rule.
    fn horizontal_rule(&self) -> String;

    /// Render a link.
    ///
    /// # Arguments
    ///
    /// * `href` - Link destination
    /// * `title` - Optional link title
    /// * `text` - Rendered link text (may be empty)
    fn link(&self, href: &str, title: Option<&str>, text: &str) -> String;

    /// Render a list from its rendered items.
    ///
    /// # Arguments
    ///
    /// * `body` - Concatenated output of [`list_item`](Self::list_item)
    /// * `ordered` - Whether the list is numbered
    /// * `start` - First number of an ordered list
    fn list(&self, body: &str, ordered: bool, start: Option<u64>) -> String;

    /// Render a single list item.
    fn list_item(&self, body: &str) -> String;

    /// Render a task list marker.
    fn checkbox(&self, checked: bool) -> String;

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `href` - Image source URL
    /// * `title` - Optional title
    /// * `alt` - Plain alt text (may be empty)
    fn image(&self, href: &str, title: Option<&str>, alt: &str) -> String;

    /// Render a table from its rendered header row and body rows.
    fn table(&self, header: &str, body: &str) -> String;

    /// Render a table row from its concatenated cells.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MalformedTableRow`] if the row content holds no
    /// cell delimiter.
    fn table_row(&self, content: &str) -> Result<String, RenderError>;

    /// Render a table cell.
    ///
    /// # Arguments
    ///
    /// * `content` - Rendered cell content
    /// * `header` - Whether the cell belongs to the header row
    /// * `alignment` - Column alignment from the delimiter row
    fn table_cell(&self, content: &str, header: bool, alignment: Alignment) -> String;

    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `code` - Code text without the trailing newline
    /// * `language` - Fence hint, if any (e.g., "js", "golang")
    fn code_block(&self, code: &str, language: Option<&str>) -> String;

    /// Render plain text.
    ///
    /// Default passes the text through unchanged.
    fn text(&self, text: &str) -> String {
        text.to_owned()
    }

    /// Render a soft line break inside a paragraph.
    ///
    /// Default keeps the newline.
    fn soft_break(&self) -> String {
        "\n".to_owned()
    }

    /// Render raw HTML (block or inline).
    ///
    /// Default passes the HTML through unchanged.
    fn html(&self, html: &str) -> String {
        html.to_owned()
    }

    /// Render raw inline HTML inside a block.
    ///
    /// Default renders it like block HTML.
    fn inline_html(&self, html: &str) -> String {
        self.html(html)
    }
}
