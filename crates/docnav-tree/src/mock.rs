//! Recording renderer for testing.
//!
//! Provides [`RecordingRenderer`] for unit testing tree behavior without a
//! real presentation layer.

use crate::node::NodeId;
use crate::renderer::{Renderer, RowSpec, Transition};

/// Handle minted by [`RecordingRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MockRow(pub usize);

/// One recorded renderer call.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCall {
    CreateRow {
        row: MockRow,
        parent: Option<MockRow>,
        node: NodeId,
        label: String,
        link: Option<String>,
        has_children: bool,
        is_last: bool,
        depth: usize,
    },
    SetExpanded {
        row: MockRow,
        expanded: bool,
        transition: Transition,
    },
    SetSelected {
        row: MockRow,
    },
    ScrollIntoView {
        row: MockRow,
        offset: f64,
    },
}

/// Renderer that records every call in order.
///
/// # Example
///
/// ```ignore
/// use docnav_tree::{RecordingRenderer, SessionConfig, TreeSession, TreeSpec};
///
/// let spec = TreeSpec::from_json(r#"[["A", "a.html", null]]"#)?;
/// let mut session = TreeSession::new(&spec, RecordingRenderer::new(), SessionConfig::default());
/// session.init_tree("a.html");
///
/// assert_eq!(session.renderer().rows_created(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
    next_row: usize,
}

impl RecordingRenderer {
    /// Create a renderer with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in the order they were made.
    #[must_use]
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Number of rows created so far.
    #[must_use]
    pub fn rows_created(&self) -> usize {
        self.next_row
    }

    /// Labels of created rows in creation order.
    #[must_use]
    pub fn created_labels(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::CreateRow { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Row most recently marked selected.
    #[must_use]
    pub fn selected(&self) -> Option<MockRow> {
        self.calls.iter().rev().find_map(|call| match call {
            RenderCall::SetSelected { row } => Some(*row),
            _ => None,
        })
    }

    /// Scroll requests in order.
    #[must_use]
    pub fn scrolls(&self) -> Vec<(MockRow, f64)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::ScrollIntoView { row, offset } => Some((*row, *offset)),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls; row numbering continues.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    type Handle = MockRow;

    fn create_row(&mut self, parent: Option<&MockRow>, row: &RowSpec<'_>) -> MockRow {
        let handle = MockRow(self.next_row);
        self.next_row += 1;
        self.calls.push(RenderCall::CreateRow {
            row: handle,
            parent: parent.copied(),
            node: row.node,
            label: row.label.to_owned(),
            link: row.link.map(ToOwned::to_owned),
            has_children: row.has_children,
            is_last: row.is_last,
            depth: row.depth,
        });
        handle
    }

    fn set_expanded(&mut self, handle: &MockRow, expanded: bool, transition: Transition) {
        self.calls.push(RenderCall::SetExpanded {
            row: *handle,
            expanded,
            transition,
        });
    }

    fn set_selected(&mut self, handle: &MockRow) {
        self.calls.push(RenderCall::SetSelected { row: *handle });
    }

    fn scroll_into_view(&mut self, handle: &MockRow, vertical_offset: f64) {
        self.calls.push(RenderCall::ScrollIntoView {
            row: *handle,
            offset: vertical_offset,
        });
    }
}
