//! Selection and scroll synchronization.
//!
//! After the breadcrumb path is expanded, the active row is marked selected
//! and scrolled to the vertical center of the usable viewport. Header and
//! footer heights are only known once the host has finished layout, so the
//! scroll waits for [`ViewSync::host_loaded`].

use crate::node::NodeId;
use crate::renderer::Renderer;
use crate::store::TreeNodeStore;

/// Host viewport measurements taken after layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    /// Total window height.
    pub window_height: f64,
    /// Height of the fixed header above the tree.
    pub header_height: f64,
    /// Height of the fixed footer below the tree.
    pub footer_height: f64,
}

impl ViewportMetrics {
    #[must_use]
    pub fn new(window_height: f64, header_height: f64, footer_height: f64) -> Self {
        Self {
            window_height,
            header_height,
            footer_height,
        }
    }

    /// Window height minus header and footer, never negative.
    #[must_use]
    pub fn usable_height(&self) -> f64 {
        (self.window_height - self.header_height - self.footer_height).max(0.0)
    }

    /// Scroll offset that centers a row in the usable height.
    #[must_use]
    pub fn centering_offset(&self) -> f64 {
        -self.usable_height() / 2.0
    }
}

/// Tracks the selected node and whether the host is ready to scroll.
///
/// At most one node is selected per session.
#[derive(Debug, Default)]
pub struct ViewSync {
    selected: Option<NodeId>,
    metrics: Option<ViewportMetrics>,
}

impl ViewSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected node.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// True once the host has reported it is laid out.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.metrics.is_some()
    }

    /// True if a node is selected but the scroll is still waiting for the host.
    #[must_use]
    pub fn has_pending_scroll(&self) -> bool {
        self.selected.is_some() && self.metrics.is_none()
    }

    /// Mark `id` as the selected node and schedule a scroll to it.
    ///
    /// Scrolls immediately if the host is already loaded. Returns false if
    /// the node is already selected or has no row.
    pub fn select<R: Renderer>(
        &mut self,
        store: &TreeNodeStore<'_, R::Handle>,
        renderer: &mut R,
        id: NodeId,
    ) -> bool {
        if self.selected == Some(id) {
            return false;
        }
        let Some(handle) = store.get(id).and_then(|node| node.handle()) else {
            return false;
        };

        renderer.set_selected(handle);
        self.selected = Some(id);

        if self.is_loaded() {
            self.sync(store, renderer);
        } else {
            tracing::debug!(node = id.index(), "Scroll deferred until host load");
        }
        true
    }

    /// Record the host's full-load signal and run any pending scroll.
    ///
    /// Returns the offset passed to the renderer, if a scroll was issued.
    pub fn host_loaded<R: Renderer>(
        &mut self,
        metrics: ViewportMetrics,
        store: &TreeNodeStore<'_, R::Handle>,
        renderer: &mut R,
    ) -> Option<f64> {
        self.metrics = Some(metrics);
        self.sync(store, renderer)
    }

    /// Scroll the selected row to the center of the viewport.
    ///
    /// Does nothing before the host has loaded or when nothing is selected.
    pub fn sync<R: Renderer>(
        &self,
        store: &TreeNodeStore<'_, R::Handle>,
        renderer: &mut R,
    ) -> Option<f64> {
        let metrics = self.metrics?;
        let id = self.selected?;
        let handle = store.get(id)?.handle()?;

        let offset = metrics.centering_offset();
        renderer.scroll_into_view(handle, offset);
        tracing::debug!(node = id.index(), offset, "Scrolled selected row into view");
        Some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockRow, RecordingRenderer, RenderCall};
    use crate::spec::{TreeEntry, TreeSpec};
    use pretty_assertions::assert_eq;

    fn sample() -> TreeSpec {
        TreeSpec::new(vec![
            TreeEntry::leaf("A", "a.html"),
            TreeEntry::leaf("B", "b.html"),
        ])
    }

    fn open(spec: &TreeSpec) -> (TreeNodeStore<'_, MockRow>, RecordingRenderer) {
        let mut store = TreeNodeStore::new(spec);
        let mut renderer = RecordingRenderer::new();
        store.open_root(&mut renderer);
        renderer.clear();
        (store, renderer)
    }

    #[test]
    fn test_usable_height_subtracts_chrome() {
        let metrics = ViewportMetrics::new(800.0, 100.0, 50.0);

        assert!((metrics.usable_height() - 650.0).abs() < f64::EPSILON);
        assert!((metrics.centering_offset() + 325.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_usable_height_clamps_at_zero() {
        let metrics = ViewportMetrics::new(100.0, 80.0, 80.0);

        assert!(metrics.usable_height().abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_before_load_defers_scroll() {
        let spec = sample();
        let (store, mut renderer) = open(&spec);
        let a = store.child(NodeId::ROOT, 0).unwrap();
        let mut sync = ViewSync::new();

        let selected = sync.select(&store, &mut renderer, a);

        assert!(selected);
        assert!(sync.has_pending_scroll());
        assert_eq!(renderer.calls(), &[RenderCall::SetSelected { row: MockRow(0) }]);
        assert!(renderer.scrolls().is_empty());
    }

    #[test]
    fn test_host_loaded_runs_deferred_scroll() {
        let spec = sample();
        let (store, mut renderer) = open(&spec);
        let b = store.child(NodeId::ROOT, 1).unwrap();
        let mut sync = ViewSync::new();
        sync.select(&store, &mut renderer, b);

        let offset = sync.host_loaded(ViewportMetrics::new(600.0, 40.0, 20.0), &store, &mut renderer);

        assert_eq!(offset, Some(-270.0));
        assert_eq!(renderer.scrolls(), vec![(MockRow(1), -270.0)]);
        assert!(!sync.has_pending_scroll());
    }

    #[test]
    fn test_select_after_load_scrolls_immediately() {
        let spec = sample();
        let (store, mut renderer) = open(&spec);
        let a = store.child(NodeId::ROOT, 0).unwrap();
        let mut sync = ViewSync::new();
        sync.host_loaded(ViewportMetrics::new(400.0, 0.0, 0.0), &store, &mut renderer);

        sync.select(&store, &mut renderer, a);

        assert_eq!(renderer.scrolls(), vec![(MockRow(0), -200.0)]);
    }

    #[test]
    fn test_host_loaded_without_selection_does_not_scroll() {
        let spec = sample();
        let (store, mut renderer) = open(&spec);
        let mut sync = ViewSync::new();

        let offset = sync.host_loaded(ViewportMetrics::new(400.0, 0.0, 0.0), &store, &mut renderer);

        assert_eq!(offset, None);
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn test_select_same_node_twice_is_noop() {
        let spec = sample();
        let (store, mut renderer) = open(&spec);
        let a = store.child(NodeId::ROOT, 0).unwrap();
        let mut sync = ViewSync::new();
        sync.select(&store, &mut renderer, a);

        let selected = sync.select(&store, &mut renderer, a);

        assert!(!selected);
        assert_eq!(renderer.calls().len(), 1);
    }

    #[test]
    fn test_select_root_is_rejected() {
        let spec = sample();
        let (store, mut renderer) = open(&spec);
        let mut sync = ViewSync::new();

        assert!(!sync.select(&store, &mut renderer, NodeId::ROOT));
        assert_eq!(sync.selected(), None);
    }
}
