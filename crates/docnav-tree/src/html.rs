//! HTML navigation tree renderer.
//!
//! [`HtmlRenderer`] keeps the created rows in memory and serializes them as
//! nested lists:
//!
//! ```html
//! <ul>
//!   <li><div class="item" data-connector="pnode"><span class="label"><a class="nolink">Classes</a></span></div>
//!     <ul class="children_ul" style="display:none">...</ul></li>
//! </ul>
//! ```
//!
//! Child containers only appear once a row has children. Collapsed
//! containers are emitted hidden so a page script can reveal them without
//! rebuilding the markup. The selected row's item carries `id="selected"`.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::renderer::{Connector, Renderer, RowSpec, Transition};

/// Handle for a row created by [`HtmlRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowHandle(usize);

#[derive(Debug)]
struct Row {
    label: String,
    link: Option<String>,
    has_children: bool,
    is_last: bool,
    expanded: bool,
    children: Vec<usize>,
}

/// Renderer producing static navigation markup.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    relpath: String,
    rows: Vec<Row>,
    top_level: Vec<usize>,
    selected: Option<usize>,
    last_scroll: Option<(RowHandle, f64)>,
}

impl HtmlRenderer {
    /// Create a renderer that prefixes every link with `relpath`.
    #[must_use]
    pub fn new(relpath: impl Into<String>) -> Self {
        Self {
            relpath: relpath.into(),
            ..Self::default()
        }
    }

    /// Number of rows created.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Most recent scroll request.
    #[must_use]
    pub fn last_scroll(&self) -> Option<(RowHandle, f64)> {
        self.last_scroll
    }

    /// Serialize the current tree.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_list(&self.top_level, None, &mut out);
        out
    }

    fn write_list(&self, rows: &[usize], hidden: Option<bool>, out: &mut String) {
        match hidden {
            None => out.push_str("<ul>"),
            Some(false) => out.push_str(r#"<ul class="children_ul">"#),
            Some(true) => out.push_str(r#"<ul class="children_ul" style="display:none">"#),
        }
        for &index in rows {
            self.write_row(index, out);
        }
        out.push_str("</ul>");
    }

    fn write_row(&self, index: usize, out: &mut String) {
        let row = &self.rows[index];
        let connector = Connector::for_row(row.has_children, row.is_last, row.expanded);

        out.push_str("<li>");
        if self.selected == Some(index) {
            out.push_str(r#"<div class="item selected" id="selected""#);
        } else {
            out.push_str(r#"<div class="item""#);
        }
        write!(out, r#" data-connector="{}">"#, connector.as_str()).unwrap();
        out.push_str(r#"<span class="label">"#);
        match &row.link {
            Some(link) => write!(
                out,
                r#"<a href="{}{}">"#,
                encode_double_quoted_attribute(&self.relpath),
                encode_double_quoted_attribute(link)
            )
            .unwrap(),
            None if row.has_children => out.push_str(r#"<a class="nolink">"#),
            None => out.push_str("<a>"),
        }
        out.push_str(&encode_text(&row.label));
        out.push_str("</a></span></div>");

        if !row.children.is_empty() {
            self.write_list(&row.children, Some(!row.expanded), out);
        }
        out.push_str("</li>");
    }
}

impl Renderer for HtmlRenderer {
    type Handle = RowHandle;

    fn create_row(&mut self, parent: Option<&RowHandle>, row: &RowSpec<'_>) -> RowHandle {
        let index = self.rows.len();
        self.rows.push(Row {
            label: row.label.to_owned(),
            link: row.link.map(ToOwned::to_owned),
            has_children: row.has_children,
            is_last: row.is_last,
            expanded: false,
            children: Vec::new(),
        });
        match parent {
            Some(RowHandle(p)) => self.rows[*p].children.push(index),
            None => self.top_level.push(index),
        }
        RowHandle(index)
    }

    // Markup is static, so both transitions apply at once.
    fn set_expanded(&mut self, handle: &RowHandle, expanded: bool, _transition: Transition) {
        if let Some(row) = self.rows.get_mut(handle.0) {
            row.expanded = expanded;
        }
    }

    fn set_selected(&mut self, handle: &RowHandle) {
        self.selected = Some(handle.0);
    }

    fn scroll_into_view(&mut self, handle: &RowHandle, vertical_offset: f64) {
        self.last_scroll = Some((*handle, vertical_offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use pretty_assertions::assert_eq;

    fn row<'r>(label: &'r str, link: Option<&'r str>, has_children: bool, is_last: bool) -> RowSpec<'r> {
        RowSpec {
            node: NodeId::new(1),
            label,
            link,
            has_children,
            is_last,
            depth: 0,
        }
    }

    #[test]
    fn test_render_empty_tree() {
        let renderer = HtmlRenderer::new("");

        assert_eq!(renderer.render(), "<ul></ul>");
    }

    #[test]
    fn test_render_leaf_with_relpath() {
        let mut renderer = HtmlRenderer::new("../");
        renderer.create_row(None, &row("Guide", Some("guide.html"), false, true));

        assert_eq!(
            renderer.render(),
            r#"<ul><li><div class="item" data-connector="lastnode"><span class="label"><a href="../guide.html">Guide</a></span></div></li></ul>"#
        );
    }

    #[test]
    fn test_render_structural_row_uses_nolink() {
        let mut renderer = HtmlRenderer::new("");
        renderer.create_row(None, &row("Files", None, true, false));

        let html = renderer.render();

        assert!(html.contains(r#"<a class="nolink">Files</a>"#));
        assert!(html.contains(r#"data-connector="pnode""#));
    }

    #[test]
    fn test_collapsed_children_are_hidden() {
        let mut renderer = HtmlRenderer::new("");
        let parent = renderer.create_row(None, &row("B", None, true, true));
        renderer.create_row(Some(&parent), &row("B1", Some("b1.html"), false, true));

        let html = renderer.render();

        assert!(html.contains(r#"<ul class="children_ul" style="display:none">"#));
        assert!(html.contains(r#"data-connector="plastnode""#));
    }

    #[test]
    fn test_expanded_children_are_visible() {
        let mut renderer = HtmlRenderer::new("");
        let parent = renderer.create_row(None, &row("B", None, true, false));
        renderer.create_row(Some(&parent), &row("B1", Some("b1.html"), false, true));

        renderer.set_expanded(&parent, true, Transition::Animated);

        let html = renderer.render();
        assert!(html.contains(r#"<ul class="children_ul"><li>"#));
        assert!(html.contains(r#"data-connector="mnode""#));
    }

    #[test]
    fn test_selected_row_gets_id() {
        let mut renderer = HtmlRenderer::new("");
        renderer.create_row(None, &row("A", Some("a.html"), false, false));
        let b = renderer.create_row(None, &row("B", Some("b.html"), false, true));

        renderer.set_selected(&b);

        let html = renderer.render();
        assert_eq!(html.matches(r#"id="selected""#).count(), 1);
        assert!(html.contains(
            r#"<div class="item selected" id="selected" data-connector="lastnode"><span class="label"><a href="b.html">B</a>"#
        ));
    }

    #[test]
    fn test_label_and_link_are_escaped() {
        let mut renderer = HtmlRenderer::new("");
        renderer.create_row(None, &row("Vec<T> & \"more\"", Some("a.html?x=1&y=2\""), false, true));

        let html = renderer.render();

        assert!(html.contains(r#"Vec&lt;T&gt; &amp; "more""#));
        assert!(html.contains(r#"href="a.html?x=1&amp;y=2&quot;""#));
    }

    #[test]
    fn test_scroll_is_recorded() {
        let mut renderer = HtmlRenderer::new("");
        let a = renderer.create_row(None, &row("A", Some("a.html"), false, true));

        renderer.scroll_into_view(&a, -120.0);

        assert_eq!(renderer.last_scroll(), Some((a, -120.0)));
    }
}
