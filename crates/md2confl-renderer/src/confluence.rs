//! Confluence backend for markdown rendering.
//!
//! Produces Confluence wiki markup, the lightweight syntax accepted by the
//! wiki markup editor and the `{code}`, `{quote}` and image macros.

use std::collections::BTreeMap;
use std::fmt::Write;

use pulldown_cmark::Alignment;

use crate::backend::RenderBackend;
use crate::error::RenderError;
use crate::language::Language;
use crate::options::{RenderOptions, TaskListStyle};
use crate::util::{replace_newlines, unescape_html};

const NUMBERED_LIST_MARKER: char = '#';
const BULLET_LIST_MARKER: char = '*';

const HEADER_CELL: &str = "||";
const CELL: &str = "|";

/// Stand-in for empty table cells, which Confluence would otherwise collapse.
const EMPTY_CELL: &str = "\u{0020}";

/// Confluence wiki markup render backend.
///
/// Produces wiki markup with:
/// - `h1.`..`h6.` headings
/// - `*`/`#` prefixed list lines, repeated per nesting level
/// - `||`/`|` delimited tables
/// - `{code:...}` macros with sorted parameters
#[derive(Debug, Clone, Default)]
pub struct WikiMarkupBackend {
    options: RenderOptions,
}

impl WikiMarkupBackend {
    /// Create a backend with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options used by this backend.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

/// Join parameters as `key=value` pairs in key order.
fn join_params(params: &BTreeMap<&str, String>, separator: &str) -> String {
    let mut out = String::new();
    for (i, (key, value)) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        write!(out, "{key}={value}").unwrap();
    }
    out
}

/// Position of the last `||` that is not followed by another `||`.
///
/// Scans overlapping pairs left to right, so in `a|||` the answer is the pair
/// starting at index 1, not 2.
fn last_double_pipe(row: &str) -> Option<usize> {
    let bytes = row.as_bytes();
    (0..bytes.len().saturating_sub(1)).find(|&i| {
        bytes[i] == b'|' && bytes[i + 1] == b'|' && !row[i + 2..].contains("||")
    })
}

impl RenderBackend for WikiMarkupBackend {
    fn paragraph(&self, text: &str) -> String {
        match self.options.replace_new_lines_in_paragraphs.replacement() {
            Some(replacement) => format!("{}\n\n", replace_newlines(text, replacement)),
            None => format!("{text}\n\n"),
        }
    }

    fn heading(&self, text: &str, level: u8) -> String {
        format!("h{level}. {text}\n\n")
    }

    fn strong(&self, text: &str) -> String {
        format!("*{text}*")
    }

    fn emphasis(&self, text: &str) -> String {
        format!("_{text}_")
    }

    fn strikethrough(&self, text: &str) -> String {
        format!("-{text}-")
    }

    fn code_span(&self, code: &str) -> String {
        format!("{{{{{code}}}}}")
    }

    fn blockquote(&self, quote: &str) -> String {
        format!("{{quote}}{}{{quote}}", quote.trim())
    }

    fn line_break(&self) -> String {
        "\n".to_owned()
    }

    fn horizontal_rule(&self) -> String {
        "----\n".to_owned()
    }

    fn link(&self, href: &str, title: Option<&str>, text: &str) -> String {
        let alias = if text.is_empty() { title } else { Some(text) };
        match alias {
            Some(alias) if !alias.is_empty() => format!("[{alias}|{href}]"),
            _ => format!("[{href}]"),
        }
    }

    fn list(&self, body: &str, ordered: bool, _start: Option<u64>) -> String {
        let marker = if ordered {
            NUMBERED_LIST_MARKER
        } else {
            BULLET_LIST_MARKER
        };
        let lines: Vec<String> = body
            .trim()
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(|line| {
                // Nested list lines already carry markers; deepen them
                if line.starts_with([NUMBERED_LIST_MARKER, BULLET_LIST_MARKER]) {
                    format!("{marker}{line}")
                } else {
                    format!("{marker} {line}")
                }
            })
            .collect();
        format!("\n{}\n\n", lines.join("\n"))
    }

    fn list_item(&self, body: &str) -> String {
        format!("{body}\n")
    }

    fn checkbox(&self, checked: bool) -> String {
        match (self.options.task_list, checked) {
            (TaskListStyle::Omit, _) => String::new(),
            (TaskListStyle::HtmlCheckbox, false) => {
                r#"<input type="checkbox" disabled=""> "#.to_owned()
            }
            (TaskListStyle::HtmlCheckbox, true) => {
                r#"<input type="checkbox" disabled="" checked=""> "#.to_owned()
            }
        }
    }

    fn image(&self, href: &str, title: Option<&str>, alt: &str) -> String {
        let params: BTreeMap<&str, String> = [("alt", Some(alt)), ("title", title)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (key, v.to_owned()))
            })
            .collect();

        if params.is_empty() {
            format!("!{href}!")
        } else {
            format!("!{href}|{}!", join_params(&params, ","))
        }
    }

    fn table(&self, header: &str, body: &str) -> String {
        format!("\n{}\n", format!("{header}{body}").trim())
    }

    fn table_row(&self, content: &str) -> Result<String, RenderError> {
        // The parser already unescapes `\|` in cells; kept so hand-built rows behave alike
        let unescaped = content.replacen("\\|", "", 1);
        let last_pipe = unescaped
            .rfind('|')
            .ok_or_else(|| RenderError::MalformedTableRow {
                row: content.to_owned(),
            })?;

        // Header cells end in `||`, so the last `||` sits right before the last `|`
        let close = match last_double_pipe(&unescaped) {
            Some(index) if last_pipe - index == 1 => HEADER_CELL,
            _ => CELL,
        };

        Ok(format!("{content}{close}\n"))
    }

    fn table_cell(&self, content: &str, header: bool, _alignment: Alignment) -> String {
        let delimiter = if header { HEADER_CELL } else { CELL };
        let content = if content.is_empty() {
            EMPTY_CELL
        } else {
            content
        };
        format!("{delimiter}{content}")
    }

    fn inline_html(&self, html: &str) -> String {
        // Text and code spans arrive decoded; only raw tags still carry references
        unescape_html(html).into_owned()
    }

    fn code_block(&self, code: &str, language: Option<&str>) -> String {
        let language = Language::resolve(language);
        let code_block = &self.options.code_block;

        let params = BTreeMap::from([
            ("language", language.to_string()),
            ("theme", code_block.theme.to_string()),
            (
                "linenumbers",
                code_block.show_line_numbers.resolve(code, language).to_string(),
            ),
            ("collapse", code_block.collapse.resolve(code, language).to_string()),
        ]);

        format!("{{code:{}}}\n{code}\n{{code}}\n\n", join_params(&params, "|"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::options::{CodeBlockFlag, CodeBlockTheme, NewlineReplacement};

    fn backend() -> WikiMarkupBackend {
        WikiMarkupBackend::default()
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(backend().paragraph("Hello"), "Hello\n\n");
    }

    #[test]
    fn test_paragraph_keeps_newlines_by_default() {
        assert_eq!(backend().paragraph("line 1\nline 2"), "line 1\nline 2\n\n");
    }

    #[test]
    fn test_paragraph_replaces_newlines_with_space() {
        let backend = WikiMarkupBackend::new(
            RenderOptions::new().with_newline_replacement(NewlineReplacement::Space),
        );
        assert_eq!(backend.paragraph("line 1\r\nline 2\n"), "line 1 line 2\n\n");
    }

    #[test]
    fn test_paragraph_replaces_newlines_with_text() {
        let backend = WikiMarkupBackend::new(
            RenderOptions::new().with_newline_replacement(NewlineReplacement::Text("\\\\".to_owned())),
        );
        assert_eq!(backend.paragraph("a\nb"), "a\\\\b\n\n");
    }

    #[test]
    fn test_paragraph_keeps_decoded_text() {
        assert_eq!(backend().paragraph("&lt;div&gt; &amp;"), "&lt;div&gt; &amp;\n\n");
    }

    #[test]
    fn test_inline_html_unescapes_entities() {
        assert_eq!(
            backend().inline_html("<abbr title=\"&quot; &amp; &colon; &lt; &gt; &#39;\">"),
            "<abbr title=\"\" & : < > '\">"
        );
    }

    #[test]
    fn test_block_html_passes_through() {
        assert_eq!(backend().html("<p>&amp;</p>\n"), "<p>&amp;</p>\n");
    }

    #[test]
    fn test_heading() {
        assert_eq!(backend().heading("Title", 1), "h1. Title\n\n");
        assert_eq!(backend().heading("Deep", 6), "h6. Deep\n\n");
    }

    #[test]
    fn test_inline_formatting() {
        assert_eq!(backend().strong("bold"), "*bold*");
        assert_eq!(backend().emphasis("italic"), "_italic_");
        assert_eq!(backend().strikethrough("strike"), "-strike-");
        assert_eq!(backend().code_span("x + 1"), "{{x + 1}}");
    }

    #[test]
    fn test_blockquote_trims_content() {
        assert_eq!(backend().blockquote("\nquoted\n\n"), "{quote}quoted{quote}");
    }

    #[test]
    fn test_breaks_and_rule() {
        assert_eq!(backend().line_break(), "\n");
        assert_eq!(backend().horizontal_rule(), "----\n");
    }

    #[test]
    fn test_link_text_wins_over_title() {
        assert_eq!(
            backend().link("http://x", Some("T"), "text"),
            "[text|http://x]"
        );
    }

    #[test]
    fn test_link_falls_back_to_title() {
        assert_eq!(backend().link("http://x", Some("T"), ""), "[T|http://x]");
    }

    #[test]
    fn test_link_without_alias() {
        assert_eq!(backend().link("http://x", None, ""), "[http://x]");
        assert_eq!(backend().link("http://x", Some(""), ""), "[http://x]");
    }

    #[test]
    fn test_list_bullet() {
        assert_eq!(
            backend().list("a\nb\n", false, None),
            "\n* a\n* b\n\n"
        );
    }

    #[test]
    fn test_list_numbered_with_nested_markers() {
        let nested = "a\n* a1\n# a2\n\n";
        assert_eq!(
            backend().list(nested, true, Some(1)),
            "\n# a\n#* a1\n## a2\n\n"
        );
    }

    #[test]
    fn test_list_item() {
        assert_eq!(backend().list_item("item"), "item\n");
    }

    #[test]
    fn test_checkbox_html() {
        assert_eq!(
            backend().checkbox(false),
            r#"<input type="checkbox" disabled=""> "#
        );
        assert_eq!(
            backend().checkbox(true),
            r#"<input type="checkbox" disabled="" checked=""> "#
        );
    }

    #[test]
    fn test_checkbox_omitted() {
        let backend =
            WikiMarkupBackend::new(RenderOptions::new().with_task_list_style(TaskListStyle::Omit));
        assert_eq!(backend.checkbox(true), "");
        assert_eq!(backend.checkbox(false), "");
    }

    #[test]
    fn test_image_without_params() {
        assert_eq!(backend().image("a.png", None, ""), "!a.png!");
        assert_eq!(backend().image("a.png", Some("  "), " "), "!a.png!");
    }

    #[test]
    fn test_image_params_sorted() {
        assert_eq!(
            backend().image("a.png", Some("Title"), "Alt"),
            "!a.png|alt=Alt,title=Title!"
        );
        assert_eq!(backend().image("a.png", Some("Title"), ""), "!a.png|title=Title!");
        assert_eq!(backend().image("a.png", None, "Alt"), "!a.png|alt=Alt!");
    }

    #[test]
    fn test_table() {
        assert_eq!(
            backend().table("||h||\n", "|c|\n"),
            "\n||h||\n|c|\n"
        );
    }

    #[test]
    fn test_table_row_header() {
        assert_eq!(backend().table_row("||a||b").unwrap(), "||a||b||\n");
    }

    #[test]
    fn test_table_row_single_header_cell() {
        assert_eq!(backend().table_row("||a").unwrap(), "||a||\n");
    }

    #[test]
    fn test_table_row_data() {
        assert_eq!(backend().table_row("|a|b").unwrap(), "|a|b|\n");
        assert_eq!(backend().table_row("|a").unwrap(), "|a|\n");
    }

    #[test]
    fn test_table_row_ignores_escaped_pipe() {
        assert_eq!(backend().table_row("|a|b\\|").unwrap(), "|a|b\\||\n");
    }

    #[test]
    fn test_table_row_without_delimiter_fails() {
        let err = backend().table_row("no cells").unwrap_err();
        assert_eq!(
            err,
            RenderError::MalformedTableRow {
                row: "no cells".to_owned()
            }
        );
    }

    #[test]
    fn test_table_cell() {
        assert_eq!(backend().table_cell("h", true, Alignment::None), "||h");
        assert_eq!(backend().table_cell("c", false, Alignment::Center), "|c");
    }

    #[test]
    fn test_table_cell_empty_gets_placeholder() {
        assert_eq!(backend().table_cell("", false, Alignment::None), "| ");
        assert_eq!(backend().table_cell("", true, Alignment::Left), "|| ");
    }

    #[test]
    fn test_code_block_defaults() {
        assert_eq!(
            backend().code_block("let x = 1;", Some("js")),
            "{code:collapse=false|language=javascript|linenumbers=false|theme=Confluence}\nlet x = 1;\n{code}\n\n"
        );
    }

    #[test]
    fn test_code_block_objective_cpp() {
        assert_eq!(
            backend().code_block("x", Some("objective-c++")),
            "{code:collapse=false|language=objc|linenumbers=false|theme=Confluence}\nx\n{code}\n\n"
        );
    }

    #[test]
    fn test_code_block_unknown_language() {
        let out = backend().code_block("x", Some("pony"));
        assert!(out.starts_with("{code:collapse=false|language=none|"));
        let out = backend().code_block("x", None);
        assert!(out.contains("language=none"));
    }

    #[test]
    fn test_code_block_options() {
        let backend = WikiMarkupBackend::new(
            RenderOptions::new()
                .with_theme(CodeBlockTheme::RDark)
                .with_line_numbers(true)
                .with_collapse(CodeBlockFlag::computed(|code, language| {
                    language == Language::Python && code.contains("def")
                })),
        );
        assert_eq!(
            backend.code_block("def f(): pass", Some("python")),
            "{code:collapse=true|language=python|linenumbers=true|theme=RDark}\ndef f(): pass\n{code}\n\n"
        );
        assert_eq!(
            backend.code_block("puts 1", Some("ruby")),
            "{code:collapse=false|language=ruby|linenumbers=true|theme=RDark}\nputs 1\n{code}\n\n"
        );
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let backend = backend();
        assert_eq!(
            backend.image("a.png", Some("T"), "A"),
            backend.image("a.png", Some("T"), "A")
        );
        assert_eq!(
            backend.code_block("x", Some("go")),
            backend.code_block("x", Some("go"))
        );
    }

    #[test]
    fn test_last_double_pipe() {
        assert_eq!(last_double_pipe("||a||b"), Some(3));
        assert_eq!(last_double_pipe("a|||"), Some(1));
        assert_eq!(last_double_pipe("|a|b"), None);
    }
}
