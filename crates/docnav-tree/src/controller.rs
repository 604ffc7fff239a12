//! Expand/collapse state machine.
//!
//! Each node is in one of three states (see [`ExpansionState`]):
//!
//! ```text
//! Collapsed --expand--> Expanded --collapse--> Collapsed
//! Leaf (no transitions)
//! ```
//!
//! The first expansion of a node materializes its children; later expansions
//! reuse them. Transitions update node state synchronously and tell the
//! renderer how to animate, so a toggle issued while an animation is still
//! running always sees consistent state.

use crate::node::{ExpansionState, Node, NodeId};
use crate::renderer::{Renderer, Transition};
use crate::store::TreeNodeStore;

/// Drives state transitions for the nodes of a store.
///
/// Borrows the store and renderer for the duration of one or more
/// transitions.
pub struct ExpansionController<'s, 'a, R: Renderer> {
    store: &'s mut TreeNodeStore<'a, R::Handle>,
    renderer: &'s mut R,
}

impl<'s, 'a, R: Renderer> ExpansionController<'s, 'a, R> {
    #[must_use]
    pub fn new(store: &'s mut TreeNodeStore<'a, R::Handle>, renderer: &'s mut R) -> Self {
        Self { store, renderer }
    }

    /// Flip a node between collapsed and expanded.
    ///
    /// Leaves are left alone. User toggles are always animated. Returns the
    /// resulting state, or `None` for an unknown id.
    pub fn toggle(&mut self, id: NodeId) -> Option<ExpansionState> {
        match self.store.get(id).map(Node::state)? {
            ExpansionState::Leaf => {}
            ExpansionState::Expanded => {
                self.collapse(id);
            }
            ExpansionState::Collapsed => {
                self.expand(id, Transition::Animated);
            }
        }
        let state = self.store.get(id).map(Node::state);
        tracing::trace!(node = id.index(), ?state, "Toggled node");
        state
    }

    /// Expand a collapsed node, materializing its children on first use.
    ///
    /// No-op for leaves, already expanded nodes and the synthetic root.
    /// Returns true if the node changed state.
    pub fn expand(&mut self, id: NodeId, transition: Transition) -> bool {
        match self.store.get(id) {
            Some(node) if !node.is_root() && node.state() == ExpansionState::Collapsed => {}
            _ => return false,
        }

        self.store.materialize_children(id, &mut *self.renderer);

        let Some(node) = self.store.get_mut(id) else {
            return false;
        };
        node.expanded = true;
        if let Some(handle) = &node.handle {
            self.renderer.set_expanded(handle, true, transition);
        }
        true
    }

    /// Collapse an expanded node. Materialized children are kept.
    ///
    /// Returns true if the node changed state.
    pub fn collapse(&mut self, id: NodeId) -> bool {
        let Some(node) = self.store.get_mut(id) else {
            return false;
        };
        if node.is_root() || !node.expanded {
            return false;
        }

        node.expanded = false;
        if let Some(handle) = &node.handle {
            self.renderer.set_expanded(handle, false, Transition::Animated);
        }
        true
    }
}
