//! Breadcrumb path resolution.
//!
//! Finds the route from the top level of a [`TreeSpec`] to the entry whose
//! link matches the current page. The route is a list of sibling indices,
//! so `[1, 0]` means "second top-level entry, then its first child".

use serde::Serialize;

use crate::spec::{TreeEntry, TreeSpec};

/// Conventional default page used when the current page is not in the tree.
pub const DEFAULT_FALLBACK: &str = "index.html";

/// Sibling indices from the synthetic root to a matched entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BreadcrumbPath(Vec<usize>);

impl BreadcrumbPath {
    /// Indices from the top level down.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for BreadcrumbPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// Which identifier produced a [`Resolution`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Matched {
    /// The requested page.
    Target,
    /// The fallback page.
    Fallback,
}

/// Result of [`resolve`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub path: BreadcrumbPath,
    pub matched: Matched,
}

/// Find the path to the first entry whose link equals `target`.
///
/// Depth-first, pre-order: an entry is compared before its children, and the
/// first match in document order wins. Structural entries (no link) are only
/// searched through.
#[must_use]
pub fn find_path(target: &str, entries: &[TreeEntry]) -> Option<BreadcrumbPath> {
    let mut trail = Vec::new();
    search(target, entries, &mut trail).then(|| BreadcrumbPath(trail))
}

/// Recursive search with backtracking on `trail`.
fn search(target: &str, entries: &[TreeEntry], trail: &mut Vec<usize>) -> bool {
    for (i, entry) in entries.iter().enumerate() {
        trail.push(i);
        if entry.link.as_deref() == Some(target) {
            return true;
        }
        if let Some(children) = &entry.children
            && search(target, children, trail)
        {
            return true;
        }
        trail.pop();
    }
    false
}

/// Resolve `target`, falling back to `fallback` when it is not in the tree.
///
/// The fallback search starts again from the top level. `None` when neither
/// identifier is present; this is a normal outcome, not an error.
#[must_use]
pub fn resolve(target: &str, fallback: &str, spec: &TreeSpec) -> Option<Resolution> {
    if let Some(path) = find_path(target, spec.entries()) {
        tracing::debug!(page = target, path = ?path.indices(), "Resolved breadcrumb path");
        return Some(Resolution {
            path,
            matched: Matched::Target,
        });
    }

    let path = find_path(fallback, spec.entries());
    match &path {
        Some(path) => tracing::debug!(
            page = target,
            fallback,
            path = ?path.indices(),
            "Target not in tree, using fallback"
        ),
        None => tracing::debug!(page = target, fallback, "Neither target nor fallback in tree"),
    }
    path.map(|path| Resolution {
        path,
        matched: Matched::Fallback,
    })
}
