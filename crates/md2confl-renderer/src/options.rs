//! Options controlling wiki markup output.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::language::Language;

/// Theme parameter of the Confluence code block macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CodeBlockTheme {
    DJango,
    Emacs,
    FadeToGrey,
    Midnight,
    RDark,
    Eclipse,
    #[default]
    Confluence,
}

impl CodeBlockTheme {
    /// Every theme accepted by Confluence.
    pub const ALL: [Self; 7] = [
        Self::DJango,
        Self::Emacs,
        Self::FadeToGrey,
        Self::Midnight,
        Self::RDark,
        Self::Eclipse,
        Self::Confluence,
    ];

    /// Value emitted into `{code:theme=...}`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DJango => "DJango",
            Self::Emacs => "Emacs",
            Self::FadeToGrey => "FadeToGrey",
            Self::Midnight => "Midnight",
            Self::RDark => "RDark",
            Self::Eclipse => "Eclipse",
            Self::Confluence => "Confluence",
        }
    }
}

impl fmt::Display for CodeBlockTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown code block theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for CodeBlockTheme {
    type Err = UnknownTheme;

    /// Theme names match case-insensitively (`midnight` parses as `Midnight`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTheme(s.to_owned()))
    }
}

/// Predicate deciding a code block flag from its content and language.
pub type CodeBlockPredicate = dyn Fn(&str, Language) -> bool + Send + Sync;

/// A code block macro flag: either fixed or computed per block.
#[derive(Clone)]
pub enum CodeBlockFlag {
    /// Same value for every code block.
    Constant(bool),
    /// Evaluated with the code text and resolved language of each block.
    Computed(Arc<CodeBlockPredicate>),
}

impl CodeBlockFlag {
    /// Build a computed flag from a closure.
    pub fn computed<F>(predicate: F) -> Self
    where
        F: Fn(&str, Language) -> bool + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(predicate))
    }

    /// Resolve the flag for a single code block.
    #[must_use]
    pub fn resolve(&self, code: &str, language: Language) -> bool {
        match self {
            Self::Constant(value) => *value,
            Self::Computed(predicate) => predicate(code, language),
        }
    }
}

impl Default for CodeBlockFlag {
    fn default() -> Self {
        Self::Constant(false)
    }
}

impl From<bool> for CodeBlockFlag {
    fn from(value: bool) -> Self {
        Self::Constant(value)
    }
}

impl fmt::Debug for CodeBlockFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Code block macro parameters.
#[derive(Debug, Clone, Default)]
pub struct CodeBlockOptions {
    /// Highlighting theme.
    pub theme: CodeBlockTheme,
    /// Whether to show line numbers.
    pub show_line_numbers: CodeBlockFlag,
    /// Whether the block starts collapsed.
    pub collapse: CodeBlockFlag,
}

/// How single newlines inside paragraph text are treated.
///
/// Markdown soft breaks survive as newlines by default. Confluence renders
/// those as line breaks, which is rarely what a reflowed paragraph wants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NewlineReplacement {
    /// Keep newlines.
    #[default]
    Off,
    /// Replace each newline with a single space.
    Space,
    /// Replace each newline with the given text.
    Text(String),
}

impl NewlineReplacement {
    /// Replacement text, or `None` when replacement is off.
    #[must_use]
    pub fn replacement(&self) -> Option<&str> {
        match self {
            Self::Off => None,
            Self::Space => Some(" "),
            Self::Text(text) => Some(text),
        }
    }
}

impl From<bool> for NewlineReplacement {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Space } else { Self::Off }
    }
}

/// Rendering of task list checkboxes, which Confluence wiki markup lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskListStyle {
    /// Emit a disabled HTML checkbox before the item text.
    #[default]
    HtmlCheckbox,
    /// Drop the checkbox and keep only the item text.
    Omit,
}

/// Options for a single conversion.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Code block macro parameters.
    pub code_block: CodeBlockOptions,
    /// Newline handling inside paragraphs.
    pub replace_new_lines_in_paragraphs: NewlineReplacement,
    /// Task list checkbox rendering.
    pub task_list: TaskListStyle,
}

impl RenderOptions {
    /// Create options with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code block theme.
    #[must_use]
    pub fn with_theme(mut self, theme: CodeBlockTheme) -> Self {
        self.code_block.theme = theme;
        self
    }

    /// Set whether code blocks show line numbers.
    #[must_use]
    pub fn with_line_numbers(mut self, flag: impl Into<CodeBlockFlag>) -> Self {
        self.code_block.show_line_numbers = flag.into();
        self
    }

    /// Set whether code blocks start collapsed.
    #[must_use]
    pub fn with_collapse(mut self, flag: impl Into<CodeBlockFlag>) -> Self {
        self.code_block.collapse = flag.into();
        self
    }

    /// Set paragraph newline replacement.
    #[must_use]
    pub fn with_newline_replacement(mut self, replacement: impl Into<NewlineReplacement>) -> Self {
        self.replace_new_lines_in_paragraphs = replacement.into();
        self
    }

    /// Set task list checkbox rendering.
    #[must_use]
    pub fn with_task_list_style(mut self, style: TaskListStyle) -> Self {
        self.task_list = style;
        self
    }
}
