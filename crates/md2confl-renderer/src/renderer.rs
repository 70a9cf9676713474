//! Markdown event walker with pluggable backend.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag};

use crate::backend::RenderBackend;
use crate::error::RenderError;
use crate::state::{Node, NodeKind, NodeStack, TableState};
use crate::util::{fence_language, heading_level_to_num};

/// Markdown renderer driving a [`RenderBackend`].
///
/// pulldown-cmark emits a flat stream of start/end events. The renderer keeps
/// a stack of open constructs, buffers the rendered output of their children
/// and hands it to the backend when the construct closes, so every backend
/// call sees fully rendered content.
pub struct MarkdownRenderer<B: RenderBackend> {
    backend: B,
    output: String,
    /// Open constructs with their buffered children.
    stack: NodeStack,
    /// Table rendering state.
    table: TableState,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            output: String::with_capacity(4096),
            stack: NodeStack::default(),
            table: TableState::default(),
        }
    }

    /// Backend used for rendering.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Render markdown events and return the output.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the backend. Partial output is
    /// discarded.
    pub fn render<'a, I>(&mut self, events: I) -> Result<String, RenderError>
    where
        I: Iterator<Item = Event<'a>>,
    {
        self.output.clear();
        self.stack = NodeStack::default();

        for event in events {
            self.process_event(event)?;
        }

        let output = std::mem::take(&mut self.output);
        tracing::debug!(output_len = output.len(), "Rendered wiki markup");
        Ok(output)
    }

    fn process_event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(_) => return self.end_tag(),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => {
                let rendered = self.backend.html(&html);
                self.push(&rendered);
            }
            Event::InlineHtml(html) => {
                let rendered = self.backend.inline_html(&html);
                self.push(&rendered);
            }
            Event::SoftBreak => {
                let rendered = self.backend.soft_break();
                self.push(&rendered);
            }
            Event::HardBreak => {
                let rendered = self.backend.line_break();
                self.push(&rendered);
            }
            Event::Rule => {
                let rendered = self.backend.horizontal_rule();
                self.push(&rendered);
            }
            Event::TaskListMarker(checked) => {
                let rendered = self.backend.checkbox(checked);
                self.push(&rendered);
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        // Alt text is plain: formatting inside an image keeps only its text
        if self.stack.in_image() {
            self.stack.push(NodeKind::Transparent);
            return;
        }

        let kind = match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading(heading_level_to_num(level)),
            Tag::BlockQuote(_) => NodeKind::BlockQuote,
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(ref info) => fence_language(info).map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                NodeKind::CodeBlock { language }
            }
            Tag::List(start) => NodeKind::List { start },
            Tag::Item => NodeKind::Item,
            Tag::Table(alignments) => {
                self.table.start(alignments);
                NodeKind::Table {
                    header: String::new(),
                }
            }
            Tag::TableHead => {
                self.table.start_head();
                NodeKind::TableHead
            }
            Tag::TableRow => {
                self.table.start_row();
                NodeKind::TableRow
            }
            Tag::TableCell => NodeKind::TableCell {
                header: self.table.is_in_head(),
                alignment: self.table.current_alignment(),
            },
            Tag::Emphasis => NodeKind::Emphasis,
            Tag::Strong => NodeKind::Strong,
            Tag::Strikethrough => NodeKind::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => NodeKind::Link {
                href: dest_url.into_string(),
                title: non_empty(title),
            },
            Tag::Image {
                dest_url, title, ..
            } => NodeKind::Image {
                href: dest_url.into_string(),
                title: non_empty(title),
            },
            _ => NodeKind::Transparent,
        };
        self.stack.push(kind);
    }

    fn end_tag(&mut self) -> Result<(), RenderError> {
        let Some(Node { kind, content }) = self.stack.pop() else {
            return Ok(());
        };
        let backend = &self.backend;

        let rendered = match kind {
            NodeKind::Paragraph => backend.paragraph(&content),
            NodeKind::Heading(level) => backend.heading(&content, level),
            NodeKind::BlockQuote => backend.blockquote(&content),
            NodeKind::CodeBlock { language } => {
                // The parser keeps the newline before the closing fence
                let code = content.strip_suffix('\n').unwrap_or(&content);
                backend.code_block(code, language.as_deref())
            }
            NodeKind::List { start } => backend.list(&content, start.is_some(), start),
            NodeKind::Item => backend.list_item(&content),
            NodeKind::Table { header } => backend.table(&header, &content),
            NodeKind::TableHead => {
                self.table.end_head();
                let row = backend.table_row(&content)?;
                // Header cells come without a row; the table renders it separately
                if let Some(Node {
                    kind: NodeKind::Table { header },
                    ..
                }) = self.stack.top_mut()
                {
                    header.push_str(&row);
                    return Ok(());
                }
                row
            }
            NodeKind::TableRow => backend.table_row(&content)?,
            NodeKind::TableCell { header, alignment } => {
                self.table.next_cell();
                backend.table_cell(&content, header, alignment)
            }
            NodeKind::Emphasis => backend.emphasis(&content),
            NodeKind::Strong => backend.strong(&content),
            NodeKind::Strikethrough => backend.strikethrough(&content),
            NodeKind::Link { href, title } => backend.link(&href, title.as_deref(), &content),
            NodeKind::Image { href, title } => backend.image(&href, title.as_deref(), &content),
            NodeKind::Transparent => content,
        };

        self.push(&rendered);
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.stack.in_code_block() || self.stack.in_image() {
            self.push(text);
        } else {
            let rendered = self.backend.text(text);
            self.push(&rendered);
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.stack.in_image() {
            self.push(code);
        } else {
            let rendered = self.backend.code_span(code);
            self.push(&rendered);
        }
    }

    /// Append rendered output to the innermost open construct.
    fn push(&mut self, rendered: &str) {
        match self.stack.top_mut() {
            Some(node) => node.content.push_str(rendered),
            None => self.output.push_str(rendered),
        }
    }
}

fn non_empty(value: CowStr<'_>) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.into_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Alignment, Options, Parser};

    use super::*;

    /// Backend that tags every construct, to check event plumbing.
    struct TraceBackend;

    impl RenderBackend for TraceBackend {
        fn paragraph(&self, text: &str) -> String {
            format!("<p>{text}</p>")
        }
        fn heading(&self, text: &str, level: u8) -> String {
            format!("<h{level}>{text}</h{level}>")
        }
        fn strong(&self, text: &str) -> String {
            format!("<b>{text}</b>")
        }
        fn emphasis(&self, text: &str) -> String {
            format!("<i>{text}</i>")
        }
        fn strikethrough(&self, text: &str) -> String {
            format!("<s>{text}</s>")
        }
        fn code_span(&self, code: &str) -> String {
            format!("<code>{code}</code>")
        }
        fn blockquote(&self, quote: &str) -> String {
            format!("<quote>{quote}</quote>")
        }
        fn line_break(&self) -> String {
            "<br>".to_owned()
        }
        fn horizontal_rule(&self) -> String {
            "<hr>".to_owned()
        }
        fn link(&self, href: &str, title: Option<&str>, text: &str) -> String {
            format!("<a {href} {title:?}>{text}</a>")
        }
        fn list(&self, body: &str, ordered: bool, start: Option<u64>) -> String {
            format!("<list {ordered} {start:?}>{body}</list>")
        }
        fn list_item(&self, body: &str) -> String {
            format!("<li>{body}</li>")
        }
        fn checkbox(&self, checked: bool) -> String {
            format!("<cb {checked}>")
        }
        fn image(&self, href: &str, title: Option<&str>, alt: &str) -> String {
            format!("<img {href} {title:?} {alt:?}>")
        }
        fn table(&self, header: &str, body: &str) -> String {
            format!("<table><head>{header}</head><body>{body}</body></table>")
        }
        fn table_row(&self, content: &str) -> Result<String, RenderError> {
            if content.is_empty() {
                return Err(RenderError::MalformedTableRow {
                    row: content.to_owned(),
                });
            }
            Ok(format!("<tr>{content}</tr>"))
        }
        fn table_cell(&self, content: &str, header: bool, alignment: Alignment) -> String {
            format!("<td {header} {alignment:?}>{content}</td>")
        }
        fn code_block(&self, code: &str, language: Option<&str>) -> String {
            format!("<pre {language:?}>{code}</pre>")
        }
    }

    fn render(markdown: &str) -> String {
        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);
        MarkdownRenderer::new(TraceBackend).render(parser).unwrap()
    }

    #[test]
    fn test_children_rendered_before_parent() {
        assert_eq!(
            render("Hello **bold _both_** end"),
            "<p>Hello <b>bold <i>both</i></b> end</p>"
        );
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(render("### Three"), "<h3>Three</h3>");
    }

    #[test]
    fn test_soft_and_hard_breaks() {
        assert_eq!(render("a\nb"), "<p>a\nb</p>");
        assert_eq!(render("a\\\nb"), "<p>a<br>b</p>");
    }

    #[test]
    fn test_link_title_is_optional() {
        assert_eq!(
            render("[text](http://x)"),
            "<p><a http://x None>text</a></p>"
        );
        assert_eq!(
            render("[](http://x 'T')"),
            "<p><a http://x Some(\"T\")></a></p>"
        );
    }

    #[test]
    fn test_image_alt_is_plain_text() {
        assert_eq!(
            render("![some *styled* `alt`](a.png \"T\")"),
            "<p><img a.png Some(\"T\") \"some styled alt\"></p>"
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            render("1. a\n    - b"),
            "<list true Some(1)><li>a<list false None><li>b</li></list></li></list>"
        );
    }

    #[test]
    fn test_task_list_marker() {
        assert_eq!(
            render("- [x] done"),
            "<list false None><li><cb true>done</li></list>"
        );
    }

    #[test]
    fn test_table_header_and_body() {
        assert_eq!(
            render("| A | B |\n|:--|--:|\n| 1 | 2 |"),
            "<table><head><tr><td true Left>A</td><td true Right>B</td></tr></head>\
             <body><tr><td false Left>1</td><td false Right>2</td></tr></body></table>"
        );
    }

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(
            render("```rust title=main.rs\nfn main() {}\n```"),
            "<pre Some(\"rust\")>fn main() {}</pre>"
        );
    }

    #[test]
    fn test_indented_code_block() {
        assert_eq!(render("    plain\n"), "<pre None>plain</pre>");
    }

    #[test]
    fn test_code_block_keeps_inner_markup_verbatim() {
        assert_eq!(
            render("```\n**not bold**\n\nline\n```"),
            "<pre None>**not bold**\n\nline</pre>"
        );
    }

    #[test]
    fn test_blockquote_wraps_paragraph() {
        assert_eq!(render("> quoted"), "<quote><p>quoted</p></quote>");
    }

    #[test]
    fn test_raw_html_passes_through() {
        assert_eq!(render("a <span>b</span>"), "<p>a <span>b</span></p>");
    }

    #[test]
    fn test_backend_error_aborts_render() {
        let events = vec![
            Event::Start(Tag::Table(vec![Alignment::None])),
            Event::Start(Tag::TableHead),
            Event::End(pulldown_cmark::TagEnd::TableHead),
            Event::End(pulldown_cmark::TagEnd::Table),
        ];
        let result = MarkdownRenderer::new(TraceBackend).render(events.into_iter());
        assert!(matches!(
            result,
            Err(RenderError::MalformedTableRow { .. })
        ));
    }

    #[test]
    fn test_renderer_is_reusable() {
        let mut renderer = MarkdownRenderer::new(TraceBackend);
        let first = renderer.render(Parser::new("*a*")).unwrap();
        let second = renderer.render(Parser::new("*a*")).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "<p><i>a</i></p>");
    }
}
