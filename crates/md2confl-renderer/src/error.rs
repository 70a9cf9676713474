//! Error types for wiki markup rendering.

/// Error that aborts a conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A table row reached the renderer without any cell delimiter.
    ///
    /// The parser always emits at least one cell per row, so this means the
    /// row content was assembled incorrectly upstream.
    #[error("table row expects at least one '|' in its cells: {row:?}")]
    MalformedTableRow {
        /// Rendered row content.
        row: String,
    },
}
