//! State tracked while walking the markdown event stream.

use pulldown_cmark::Alignment;

/// Kind of an open Markdown construct awaiting its end event.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeKind {
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock { language: Option<String> },
    List { start: Option<u64> },
    Item,
    Table { header: String },
    TableHead,
    TableRow,
    TableCell { header: bool, alignment: Alignment },
    Emphasis,
    Strong,
    Strikethrough,
    Link { href: String, title: Option<String> },
    Image { href: String, title: Option<String> },
    /// Construct without wiki markup; children are emitted unchanged.
    Transparent,
}

/// An open construct and the rendered output of its children so far.
#[derive(Debug)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub content: String,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            content: String::new(),
        }
    }
}

/// Stack of open constructs.
///
/// Each node buffers its rendered children until its end event, at which
/// point the buffer is rendered as a whole and appended to the parent.
#[derive(Debug, Default)]
pub(crate) struct NodeStack {
    nodes: Vec<Node>,
    /// Number of open images; text inside them is collected as plain alt text.
    image_depth: usize,
}

impl NodeStack {
    /// Open a construct.
    pub fn push(&mut self, kind: NodeKind) {
        if matches!(kind, NodeKind::Image { .. }) {
            self.image_depth += 1;
        }
        self.nodes.push(Node::new(kind));
    }

    /// Close the innermost construct.
    pub fn pop(&mut self) -> Option<Node> {
        let node = self.nodes.pop()?;
        if matches!(node.kind, NodeKind::Image { .. }) {
            self.image_depth -= 1;
        }
        Some(node)
    }

    /// Innermost open construct.
    pub fn top_mut(&mut self) -> Option<&mut Node> {
        self.nodes.last_mut()
    }

    /// Whether we're inside image alt text.
    pub fn in_image(&self) -> bool {
        self.image_depth > 0
    }

    /// Whether we're inside a code block.
    pub fn in_code_block(&self) -> bool {
        matches!(
            self.nodes.last(),
            Some(Node {
                kind: NodeKind::CodeBlock { .. },
                ..
            })
        )
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    /// Whether we're inside the table header row.
    in_head: bool,
    /// Column alignments for current table.
    alignments: Vec<Alignment>,
    /// Current column index in table row.
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    /// Start the table header row.
    pub fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    /// End the table header row.
    pub fn end_head(&mut self) {
        self.in_head = false;
    }

    /// Start a new table row.
    pub fn start_row(&mut self) {
        self.cell_index = 0;
    }

    /// Move to the next cell.
    pub fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    /// Check if we're in the table header.
    pub fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Alignment of the current column.
    pub fn current_alignment(&self) -> Alignment {
        self.alignments
            .get(self.cell_index)
            .copied()
            .unwrap_or(Alignment::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_stack_tracks_images() {
        let mut stack = NodeStack::default();
        assert!(!stack.in_image());

        stack.push(NodeKind::Paragraph);
        stack.push(NodeKind::Image {
            href: "a.png".to_owned(),
            title: None,
        });
        assert!(stack.in_image());

        stack.push(NodeKind::Emphasis);
        assert!(stack.in_image());
        stack.pop();

        let image = stack.pop().unwrap();
        assert!(matches!(image.kind, NodeKind::Image { .. }));
        assert!(!stack.in_image());
    }

    #[test]
    fn test_node_stack_code_block() {
        let mut stack = NodeStack::default();
        stack.push(NodeKind::CodeBlock {
            language: Some("rust".to_owned()),
        });
        assert!(stack.in_code_block());

        stack.top_mut().unwrap().content.push_str("fn main() {}");
        let node = stack.pop().unwrap();
        assert_eq!(node.content, "fn main() {}");
        assert!(!stack.in_code_block());
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_table_cell_kind_compares_alignment() {
        let mut stack = NodeStack::default();
        stack.push(NodeKind::TableCell {
            header: true,
            alignment: Alignment::Center,
        });

        let node = stack.pop().unwrap();
        assert_eq!(
            node.kind,
            NodeKind::TableCell {
                header: true,
                alignment: Alignment::Center,
            }
        );
        assert_ne!(
            node.kind,
            NodeKind::TableCell {
                header: true,
                alignment: Alignment::Left,
            }
        );
    }

    #[test]
    fn test_table_state() {
        let mut state = TableState::default();
        state.start(vec![Alignment::Left, Alignment::Center, Alignment::Right]);

        state.start_head();
        assert!(state.is_in_head());
        assert_eq!(state.current_alignment(), Alignment::Left);

        state.next_cell();
        assert_eq!(state.current_alignment(), Alignment::Center);

        state.next_cell();
        assert_eq!(state.current_alignment(), Alignment::Right);

        state.next_cell();
        assert_eq!(state.current_alignment(), Alignment::None);

        state.end_head();
        assert!(!state.is_in_head());

        state.start_row();
        assert_eq!(state.current_alignment(), Alignment::Left);
    }
}
