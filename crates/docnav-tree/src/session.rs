//! Per-page-load navigation tree session.
//!
//! A [`TreeSession`] owns everything the tree needs for one page load: the
//! node arena, the renderer, the selection and scroll state, and the
//! configuration. Nothing survives the session; a new page load builds a new
//! one.
//!
//! # Lifecycle
//!
//! 1. [`TreeSession::new`] materializes the top level of the tree.
//! 2. [`TreeSession::init_tree`] resolves the current page, expands the path
//!    to it without animation and selects it.
//! 3. [`TreeSession::host_loaded`] runs the deferred scroll once the host
//!    reports its layout.
//! 4. User events arrive through [`TreeSession::toggle`] and
//!    [`TreeSession::activate_label`].
//!
//! # Example
//!
//! ```
//! use docnav_tree::{HtmlRenderer, SessionConfig, TreeSession, TreeSpec, ViewportMetrics};
//!
//! let spec = TreeSpec::from_json(
//!     r#"[["A", "a.html", null], ["B", null, [["B1", "b1.html", null], ["B2", "b2.html", null]]]]"#,
//! )
//! .unwrap();
//! let mut session = TreeSession::new(&spec, HtmlRenderer::new(""), SessionConfig::default());
//!
//! let outcome = session.init_tree("b2.html");
//! assert_eq!(outcome.path().map(|p| p.indices().to_vec()), Some(vec![1, 1]));
//!
//! let offset = session.host_loaded(ViewportMetrics::new(600.0, 0.0, 0.0));
//! assert_eq!(offset, Some(-300.0));
//! ```

use crate::controller::ExpansionController;
use crate::node::{ExpansionState, Node, NodeId};
use crate::renderer::{Renderer, Transition};
use crate::resolver::{self, BreadcrumbPath, DEFAULT_FALLBACK, Matched};
use crate::spec::TreeSpec;
use crate::store::TreeNodeStore;
use crate::view_sync::{ViewSync, ViewportMetrics};

/// Configuration for [`TreeSession`].
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Page selected when the current page is not in the tree.
    pub fallback: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK.to_owned(),
        }
    }
}

/// Result of [`TreeSession::init_tree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    /// A node was expanded to and selected.
    Selected {
        /// Route to the selected node.
        path: BreadcrumbPath,
        /// The selected node.
        node: NodeId,
        /// Whether the target or the fallback matched.
        matched: Matched,
    },
    /// Neither the target nor the fallback is in the tree. The tree stays
    /// collapsed and nothing is selected.
    Unresolved,
}

impl InitOutcome {
    /// Breadcrumb path, if resolved.
    #[must_use]
    pub fn path(&self) -> Option<&BreadcrumbPath> {
        match self {
            Self::Selected { path, .. } => Some(path),
            Self::Unresolved => None,
        }
    }

    /// Selected node, if resolved.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Selected { node, .. } => Some(*node),
            Self::Unresolved => None,
        }
    }
}

/// Result of [`TreeSession::activate_label`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivateOutcome {
    /// The host should navigate to this link.
    Navigate(String),
    /// Structural node: the label acted as the expand control.
    Toggled(ExpansionState),
    /// Nothing to do (unknown node, or no link and no children).
    Inert,
}

/// Navigation tree state for one page load.
pub struct TreeSession<'a, R: Renderer> {
    spec: &'a TreeSpec,
    store: TreeNodeStore<'a, R::Handle>,
    renderer: R,
    view_sync: ViewSync,
    config: SessionConfig,
    breadcrumbs: Option<BreadcrumbPath>,
}

impl<'a, R: Renderer> TreeSession<'a, R> {
    /// Create a session and materialize the top level of the tree.
    pub fn new(spec: &'a TreeSpec, mut renderer: R, config: SessionConfig) -> Self {
        let mut store = TreeNodeStore::new(spec);
        store.open_root(&mut renderer);

        Self {
            spec,
            store,
            renderer,
            view_sync: ViewSync::new(),
            config,
            breadcrumbs: None,
        }
    }

    /// Resolve `target`, expand the path to it and select it.
    ///
    /// Falls back to the configured fallback page when `target` is not in the
    /// tree. Expansion along the path is immediate, so the chain is complete
    /// before the deferred scroll can run. The scroll itself waits for
    /// [`host_loaded`](Self::host_loaded).
    pub fn init_tree(&mut self, target: &str) -> InitOutcome {
        let Some(resolution) = resolver::resolve(target, &self.config.fallback, self.spec) else {
            return InitOutcome::Unresolved;
        };

        let mut current = NodeId::ROOT;
        for &index in resolution.path.indices() {
            let Some(next) = self.store.child(current, index) else {
                tracing::warn!(
                    page = target,
                    path = ?resolution.path.indices(),
                    "Breadcrumb path does not match materialized tree"
                );
                return InitOutcome::Unresolved;
            };
            current = next;
            self.controller().expand(current, Transition::Immediate);
        }

        self.view_sync
            .select(&self.store, &mut self.renderer, current);
        self.breadcrumbs = Some(resolution.path.clone());

        InitOutcome::Selected {
            path: resolution.path,
            node: current,
            matched: resolution.matched,
        }
    }

    /// Toggle a node in response to a click on its expand control.
    pub fn toggle(&mut self, id: NodeId) -> Option<ExpansionState> {
        self.controller().toggle(id)
    }

    /// Expand a node with the given transition.
    pub fn expand(&mut self, id: NodeId, transition: Transition) -> bool {
        self.controller().expand(id, transition)
    }

    /// Collapse a node.
    pub fn collapse(&mut self, id: NodeId) -> bool {
        self.controller().collapse(id)
    }

    /// Handle a click on a node's label.
    ///
    /// Linked nodes navigate. Structural nodes (children but no link) toggle,
    /// the same as clicking their expand control.
    pub fn activate_label(&mut self, id: NodeId) -> ActivateOutcome {
        let Some(node) = self.store.get(id) else {
            return ActivateOutcome::Inert;
        };
        if let Some(link) = node.link() {
            return ActivateOutcome::Navigate(link.to_owned());
        }
        if node.is_root() || node.children_data().is_none() {
            return ActivateOutcome::Inert;
        }
        self.toggle(id)
            .map_or(ActivateOutcome::Inert, ActivateOutcome::Toggled)
    }

    /// Host full-load signal: record metrics and run the deferred scroll.
    ///
    /// Returns the offset passed to the renderer, if a scroll was issued.
    pub fn host_loaded(&mut self, metrics: ViewportMetrics) -> Option<f64> {
        self.view_sync
            .host_loaded(metrics, &self.store, &mut self.renderer)
    }

    /// An animated reveal finished: re-center the selected row.
    ///
    /// Does nothing before the host has loaded.
    pub fn transition_finished(&mut self) -> Option<f64> {
        self.view_sync.sync(&self.store, &mut self.renderer)
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<'a, R::Handle>> {
        self.store.get(id)
    }

    /// Id of the synthetic root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.store.root()
    }

    /// Child of `parent` at sibling position `index`, if materialized.
    #[must_use]
    pub fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.store.child(parent, index)
    }

    /// Selected node, if any.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.view_sync.selected()
    }

    /// Path resolved by the last [`init_tree`](Self::init_tree).
    #[must_use]
    pub fn breadcrumbs(&self) -> Option<&BreadcrumbPath> {
        self.breadcrumbs.as_ref()
    }

    /// True if the selected row is still waiting for the host to load.
    #[must_use]
    pub fn has_pending_scroll(&self) -> bool {
        self.view_sync.has_pending_scroll()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Node arena.
    #[must_use]
    pub fn store(&self) -> &TreeNodeStore<'a, R::Handle> {
        &self.store
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// End the session and hand back the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn controller(&mut self) -> ExpansionController<'_, 'a, R> {
        ExpansionController::new(&mut self.store, &mut self.renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockRow, RecordingRenderer, RenderCall};
    use crate::spec::TreeEntry;
    use pretty_assertions::assert_eq;

    fn sample() -> TreeSpec {
        TreeSpec::from_json(
            r#"[["A", "a.html", null], ["B", null, [["B1", "b1.html", null], ["B2", "b2.html", null]]]]"#,
        )
        .unwrap()
    }

    fn session<'a>(spec: &'a TreeSpec, fallback: &str) -> TreeSession<'a, RecordingRenderer> {
        let config = SessionConfig {
            fallback: fallback.to_owned(),
        };
        TreeSession::new(spec, RecordingRenderer::new(), config)
    }

    fn handle(session: &TreeSession<'_, RecordingRenderer>, id: NodeId) -> MockRow {
        *session.node(id).unwrap().handle().unwrap()
    }

    #[test]
    fn test_new_materializes_top_level_only() {
        let spec = sample();

        let session = session(&spec, DEFAULT_FALLBACK);

        assert_eq!(session.renderer().created_labels(), vec!["A", "B"]);
        let b = session.child(session.root(), 1).unwrap();
        assert!(!session.node(b).unwrap().children_visited());
    }

    #[test]
    fn test_init_tree_expands_path_and_selects_target() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);

        let outcome = session.init_tree("b2.html");

        assert_eq!(outcome.path().unwrap().indices(), &[1, 1]);
        let a = session.child(session.root(), 0).unwrap();
        let b = session.child(session.root(), 1).unwrap();
        let b2 = session.child(b, 1).unwrap();
        assert_eq!(outcome.node(), Some(b2));
        assert!(matches!(
            outcome,
            InitOutcome::Selected {
                matched: Matched::Target,
                ..
            }
        ));

        let b_node = session.node(b).unwrap();
        assert!(b_node.is_expanded());
        assert_eq!(b_node.children().len(), 2);
        assert_eq!(session.selected(), Some(b2));
        assert_eq!(session.renderer().selected(), Some(handle(&session, b2)));

        let a_node = session.node(a).unwrap();
        assert_eq!(a_node.state(), ExpansionState::Leaf);
        assert!(!a_node.children_visited());
    }

    #[test]
    fn test_init_tree_uses_immediate_expansion() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);

        session.init_tree("b1.html");

        let transitions: Vec<_> = session
            .renderer()
            .calls()
            .iter()
            .filter_map(|call| match call {
                RenderCall::SetExpanded { transition, .. } => Some(*transition),
                _ => None,
            })
            .collect();
        assert_eq!(transitions, vec![Transition::Immediate]);
    }

    #[test]
    fn test_init_tree_falls_back_to_fallback_link() {
        let spec = sample();
        let mut session = session(&spec, "a.html");

        let outcome = session.init_tree("missing.html");

        assert_eq!(outcome.path().unwrap().indices(), &[0]);
        assert!(matches!(
            outcome,
            InitOutcome::Selected {
                matched: Matched::Fallback,
                ..
            }
        ));
        let a = session.child(session.root(), 0).unwrap();
        let b = session.child(session.root(), 1).unwrap();
        assert_eq!(session.selected(), Some(a));
        let b_node = session.node(b).unwrap();
        assert!(!b_node.is_expanded());
        assert!(!b_node.children_visited());
        assert!(b_node.children().is_empty());
    }

    #[test]
    fn test_init_tree_unresolved_leaves_tree_collapsed() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);
        session.host_loaded(ViewportMetrics::new(600.0, 0.0, 0.0));

        let outcome = session.init_tree("missing.html");

        assert_eq!(outcome, InitOutcome::Unresolved);
        assert_eq!(session.selected(), None);
        assert_eq!(session.breadcrumbs(), None);
        assert!(session.renderer().scrolls().is_empty());
        assert!(session.renderer().selected().is_none());
        assert_eq!(session.store().len(), 3);
    }

    #[test]
    fn test_init_tree_on_empty_spec_is_unresolved() {
        let spec = TreeSpec::default();
        let mut session = session(&spec, DEFAULT_FALLBACK);

        assert_eq!(session.init_tree("index.html"), InitOutcome::Unresolved);
        assert_eq!(session.renderer().rows_created(), 0);
    }

    #[test]
    fn test_init_tree_expands_matching_branch_itself() {
        let spec = TreeSpec::new(vec![TreeEntry::branch(
            "Pages",
            Some("pages.html"),
            vec![TreeEntry::leaf("Todo", "todo.html")],
        )]);
        let mut session = session(&spec, DEFAULT_FALLBACK);

        let outcome = session.init_tree("pages.html");

        let pages = outcome.node().unwrap();
        assert!(session.node(pages).unwrap().is_expanded());
        assert_eq!(session.node(pages).unwrap().children().len(), 1);
    }

    #[test]
    fn test_init_tree_on_deeply_nested_data() {
        let mut source = String::from("[");
        for level in 0..200 {
            source.push_str(&format!(r#"["Level {level}", null, ["#));
        }
        source.push_str(r#"["Bottom", "bottom.html", null]]"#);
        source.push_str(&"]]".repeat(200));
        let spec = TreeSpec::from_json(&source).unwrap();
        let mut session = session(&spec, DEFAULT_FALLBACK);

        let outcome = session.init_tree("bottom.html");

        assert_eq!(outcome.path().unwrap().len(), 201);
        let bottom = outcome.node().unwrap();
        assert_eq!(session.node(bottom).unwrap().depth(), 200);
        assert_eq!(session.selected(), Some(bottom));
        assert_eq!(session.renderer().rows_created(), 201);
    }

    #[test]
    fn test_scroll_deferred_until_host_loaded() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);
        session.init_tree("b2.html");

        assert!(session.has_pending_scroll());
        assert!(session.renderer().scrolls().is_empty());

        let offset = session.host_loaded(ViewportMetrics::new(900.0, 100.0, 40.0));

        assert_eq!(offset, Some(-380.0));
        let b2 = session.selected().unwrap();
        assert_eq!(
            session.renderer().scrolls(),
            vec![(handle(&session, b2), -380.0)]
        );
        assert!(!session.has_pending_scroll());
    }

    #[test]
    fn test_host_loaded_before_init_scrolls_on_select() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);
        session.host_loaded(ViewportMetrics::new(500.0, 0.0, 0.0));

        session.init_tree("a.html");

        assert_eq!(session.renderer().scrolls().len(), 1);
    }

    #[test]
    fn test_toggle_after_init_keeps_children() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);
        session.init_tree("b2.html");
        let b = session.child(session.root(), 1).unwrap();
        let children = session.node(b).unwrap().children().to_vec();
        let rows_before = session.renderer().rows_created();

        assert_eq!(session.toggle(b), Some(ExpansionState::Collapsed));
        assert_eq!(session.toggle(b), Some(ExpansionState::Expanded));

        assert_eq!(session.node(b).unwrap().children(), children.as_slice());
        assert_eq!(session.renderer().rows_created(), rows_before);
        // Selection survives collapse and re-expansion
        assert_eq!(session.selected(), Some(children[1]));
    }

    #[test]
    fn test_activate_label_on_link_navigates() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);
        let a = session.child(session.root(), 0).unwrap();

        assert_eq!(
            session.activate_label(a),
            ActivateOutcome::Navigate("a.html".to_owned())
        );
    }

    #[test]
    fn test_activate_label_on_structural_node_toggles() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);
        let b = session.child(session.root(), 1).unwrap();

        assert_eq!(
            session.activate_label(b),
            ActivateOutcome::Toggled(ExpansionState::Expanded)
        );
        assert_eq!(
            session.activate_label(b),
            ActivateOutcome::Toggled(ExpansionState::Collapsed)
        );
    }

    #[test]
    fn test_activate_label_on_unknown_node_is_inert() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);

        assert_eq!(session.activate_label(NodeId::new(50)), ActivateOutcome::Inert);
        assert_eq!(session.activate_label(session.root()), ActivateOutcome::Inert);
    }

    #[test]
    fn test_transition_finished_recenters_after_load() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);
        session.init_tree("b1.html");

        // Before load nothing happens
        assert_eq!(session.transition_finished(), None);

        session.host_loaded(ViewportMetrics::new(200.0, 0.0, 0.0));
        let b = session.child(session.root(), 1).unwrap();
        session.toggle(b);
        session.toggle(b);

        assert_eq!(session.transition_finished(), Some(-100.0));
        assert_eq!(session.renderer().scrolls().len(), 2);
    }

    #[test]
    fn test_into_renderer_returns_renderer() {
        let spec = sample();
        let mut session = session(&spec, DEFAULT_FALLBACK);
        session.init_tree("b2.html");

        let renderer = session.into_renderer();

        assert_eq!(renderer.rows_created(), 4);
    }
}
