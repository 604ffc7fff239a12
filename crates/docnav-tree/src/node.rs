//! Materialized tree nodes.

use crate::spec::TreeEntry;

/// Identifier of a materialized node within one session.
///
/// Ids are indices into the session's node arena and are only meaningful
/// for the session that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic root owning all top-level nodes.
    pub const ROOT: Self = Self(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Expand/collapse state of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpansionState {
    /// No children data; cannot be expanded.
    Leaf,
    /// Children hidden (or never materialized).
    Collapsed,
    /// Children materialized and shown.
    Expanded,
}

/// On-screen tree entry.
///
/// Children are created lazily: `children` stays empty until the node is
/// expanded for the first time, at which point `children_visited` is set.
#[derive(Debug)]
pub struct Node<'a, H> {
    pub(crate) label: String,
    pub(crate) link: Option<String>,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) children_data: Option<&'a [TreeEntry]>,
    pub(crate) is_last: bool,
    pub(crate) expanded: bool,
    pub(crate) children_visited: bool,
    pub(crate) handle: Option<H>,
}

impl<'a, H> Node<'a, H> {
    pub(crate) fn root(entries: &'a [TreeEntry]) -> Self {
        Self {
            label: String::new(),
            link: None,
            depth: 0,
            parent: None,
            children: Vec::new(),
            children_data: Some(entries),
            is_last: true,
            expanded: false,
            children_visited: false,
            handle: None,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Link target, `None` for structural nodes.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Nesting depth; top-level nodes have depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Owning node, `None` only for the synthetic root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Materialized children in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Source entries for this node's children, `None` for leaves.
    #[must_use]
    pub fn children_data(&self) -> Option<&'a [TreeEntry]> {
        self.children_data
    }

    /// True if this is the final sibling in its group.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// True once children have been materialized.
    #[must_use]
    pub fn children_visited(&self) -> bool {
        self.children_visited
    }

    /// True for the synthetic root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Presentation handle returned by the renderer.
    #[must_use]
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> ExpansionState {
        match (self.children_data, self.expanded) {
            (None, _) => ExpansionState::Leaf,
            (Some(_), false) => ExpansionState::Collapsed,
            (Some(_), true) => ExpansionState::Expanded,
        }
    }
}
