//! Presentation collaborator contract.
//!
//! The tree engine never touches presentation primitives directly. It asks a
//! [`Renderer`] to create rows, show or hide child containers, mark the
//! selected row and scroll it into view. Handles returned by the renderer are
//! stored with each node and passed back unchanged.

use crate::node::NodeId;

/// How a child container is revealed or hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Apply synchronously. Used for breadcrumb auto-expansion.
    Immediate,
    /// Fire-and-forget animation. Used for user-initiated toggles.
    ///
    /// A later call for the same handle may supersede an animation that is
    /// still running.
    Animated,
}

/// Description of a row to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSpec<'r> {
    /// Node the row represents. Renderers bind event handlers to this id.
    pub node: NodeId,
    pub label: &'r str,
    pub link: Option<&'r str>,
    /// True if the row gets an expand control.
    pub has_children: bool,
    /// True if the row is the final sibling.
    pub is_last: bool,
    pub depth: usize,
}

/// Connector glyph shown in front of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connector {
    /// Leaf with siblings below.
    Node,
    /// Final leaf.
    LastNode,
    /// Collapsed node with siblings below.
    Plus,
    /// Final collapsed node.
    PlusLast,
    /// Expanded node with siblings below.
    Minus,
    /// Final expanded node.
    MinusLast,
}

impl Connector {
    /// Pick the connector for a row.
    #[must_use]
    pub fn for_row(has_children: bool, is_last: bool, expanded: bool) -> Self {
        match (has_children, expanded, is_last) {
            (false, _, false) => Self::Node,
            (false, _, true) => Self::LastNode,
            (true, false, false) => Self::Plus,
            (true, false, true) => Self::PlusLast,
            (true, true, false) => Self::Minus,
            (true, true, true) => Self::MinusLast,
        }
    }

    /// Stable name used in markup.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::LastNode => "lastnode",
            Self::Plus => "pnode",
            Self::PlusLast => "plastnode",
            Self::Minus => "mnode",
            Self::MinusLast => "mlastnode",
        }
    }
}

/// Presentation backend for a navigation tree.
pub trait Renderer {
    /// Opaque row handle.
    type Handle;

    /// Create a row under `parent`'s child container (`None` for the root container).
    ///
    /// The child container starts hidden.
    fn create_row(&mut self, parent: Option<&Self::Handle>, row: &RowSpec<'_>) -> Self::Handle;

    /// Show or hide the row's child container and update its connector.
    fn set_expanded(&mut self, handle: &Self::Handle, expanded: bool, transition: Transition);

    /// Mark the row as the selected one.
    fn set_selected(&mut self, handle: &Self::Handle);

    /// Scroll the viewport so the row sits at `vertical_offset` from the top.
    fn scroll_into_view(&mut self, handle: &Self::Handle, vertical_offset: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_for_leaf_rows() {
        assert_eq!(Connector::for_row(false, false, false), Connector::Node);
        assert_eq!(Connector::for_row(false, true, false), Connector::LastNode);
        // Leaves never show an expanded glyph
        assert_eq!(Connector::for_row(false, true, true), Connector::LastNode);
    }

    #[test]
    fn test_connector_for_branch_rows() {
        assert_eq!(Connector::for_row(true, false, false), Connector::Plus);
        assert_eq!(Connector::for_row(true, true, false), Connector::PlusLast);
        assert_eq!(Connector::for_row(true, false, true), Connector::Minus);
        assert_eq!(Connector::for_row(true, true, true), Connector::MinusLast);
    }

    #[test]
    fn test_connector_names() {
        assert_eq!(Connector::Plus.as_str(), "pnode");
        assert_eq!(Connector::MinusLast.as_str(), "mlastnode");
    }
}
