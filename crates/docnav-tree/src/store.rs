//! Node arena with lazy materialization.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec` indexed by [`NodeId`], with parent and
//! children relationships tracked by ids. Slot 0 holds the synthetic root
//! whose children data is the whole [`TreeSpec`]. Descendants are created
//! only when their parent is materialized, so the arena grows with the
//! visible part of the tree rather than with the tree data.

use crate::node::{Node, NodeId};
use crate::renderer::{Renderer, RowSpec};
use crate::spec::{TreeEntry, TreeSpec};

/// Owner of all materialized nodes for one session.
#[derive(Debug)]
pub struct TreeNodeStore<'a, H> {
    nodes: Vec<Node<'a, H>>,
}

impl<'a, H> TreeNodeStore<'a, H> {
    /// Create a store holding only the synthetic root.
    #[must_use]
    pub fn new(spec: &'a TreeSpec) -> Self {
        Self {
            nodes: vec![Node::root(spec.entries())],
        }
    }

    /// Id of the synthetic root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Look up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<'a, H>> {
        self.nodes.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<'a, H>> {
        self.nodes.get_mut(id.index())
    }

    /// Number of materialized nodes, including the synthetic root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the synthetic root is present from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child of `parent` at sibling position `index`, if materialized.
    #[must_use]
    pub fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.get(parent)?.children.get(index).copied()
    }

    /// Allocate a node for `entry` and append it to `parent`'s children.
    ///
    /// The renderer creates a row under the parent's container and the
    /// returned handle is stored with the node. Never recurses into the
    /// entry's children.
    ///
    /// `parent` must be a node of this store.
    pub(crate) fn create_node<R>(
        &mut self,
        parent: NodeId,
        entry: &'a TreeEntry,
        is_last: bool,
        renderer: &mut R,
    ) -> NodeId
    where
        R: Renderer<Handle = H>,
    {
        let id = NodeId::new(self.nodes.len());
        let parent_node = &self.nodes[parent.index()];
        let depth = if parent_node.is_root() {
            0
        } else {
            parent_node.depth + 1
        };

        let row = RowSpec {
            node: id,
            label: &entry.label,
            link: entry.link.as_deref(),
            has_children: entry.children.is_some(),
            is_last,
            depth,
        };
        let handle = renderer.create_row(parent_node.handle.as_ref(), &row);

        self.nodes.push(Node {
            label: entry.label.clone(),
            link: entry.link.clone(),
            depth,
            parent: Some(parent),
            children: Vec::new(),
            children_data: entry.children.as_deref(),
            is_last,
            expanded: false,
            children_visited: false,
            handle: Some(handle),
        });
        self.nodes[parent.index()].children.push(id);

        id
    }

    /// Create nodes for every child entry of `id`, in source order.
    ///
    /// No-op for leaves, for unknown ids and for nodes already materialized.
    /// Returns true if children were created by this call.
    pub fn materialize_children<R>(&mut self, id: NodeId, renderer: &mut R) -> bool
    where
        R: Renderer<Handle = H>,
    {
        let Some(node) = self.get(id) else {
            return false;
        };
        if node.children_visited {
            return false;
        }
        let Some(entries) = node.children_data else {
            return false;
        };

        let last = entries.len().saturating_sub(1);
        for (i, entry) in entries.iter().enumerate() {
            self.create_node(id, entry, i == last, renderer);
        }
        self.nodes[id.index()].children_visited = true;

        tracing::debug!(node = id.index(), count = entries.len(), "Materialized children");
        true
    }

    /// Materialize the top level and mark the root as open.
    ///
    /// The root's container is always visible and has no row of its own.
    pub(crate) fn open_root<R>(&mut self, renderer: &mut R)
    where
        R: Renderer<Handle = H>,
    {
        self.materialize_children(NodeId::ROOT, renderer);
        self.nodes[NodeId::ROOT.index()].expanded = true;
    }
}
