//! Navigation tree data.
//!
//! A [`TreeSpec`] is the immutable nested structure produced by the
//! documentation generator. Each entry is serialized as a three-element
//! array `[label, link, children]`:
//!
//! ```text
//! [
//!   ["Overview", "index.html", null],
//!   ["Classes", null, [
//!     ["Parser", "class_parser.html", null]
//!   ]]
//! ]
//! ```
//!
//! `link` is `null` for structural grouping entries, `children` is `null`
//! for leaves. Sibling order is significant and is never changed.
//!
//! The generator usually wraps the literal in a script assignment
//! (`var NAVTREE = [...];`) followed by the functions that render it.
//! [`TreeSpec::from_script`] reads that form directly.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Error returned when tree data cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// Data file not found.
    #[error("Tree data file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading the data file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Literal is not a well-formed tree.
    #[error("Invalid tree data: {0}")]
    Parse(#[from] serde_json::Error),
    /// Script source has no `NAME = [...]` assignment.
    #[error("Tree script has no array assignment")]
    MissingAssignment,
}

/// `var NAME = [` at the start of the tree literal.
static ASSIGNMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvar\s+[A-Za-z_$][\w$]*\s*=\s*\[").unwrap());

/// Read one array of entries from `de`, growing the stack for deep trees.
fn parse_entries<'de, R>(
    de: &mut serde_json::Deserializer<R>,
) -> Result<Vec<TreeEntry>, serde_json::Error>
where
    R: serde_json::de::Read<'de>,
{
    de.disable_recursion_limit();
    Vec::<TreeEntry>::deserialize(serde_stacker::Deserializer::new(de))
}

/// One entry of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryTuple", into = "EntryTuple")]
pub struct TreeEntry {
    /// Display label.
    pub label: String,
    /// Link target relative to the documentation root. `None` for structural entries.
    pub link: Option<String>,
    /// Child entries. `None` for leaves.
    pub children: Option<Vec<TreeEntry>>,
}

/// Wire form of [`TreeEntry`].
#[derive(Serialize, Deserialize)]
struct EntryTuple(String, Option<String>, Option<Vec<TreeEntry>>);

impl From<EntryTuple> for TreeEntry {
    fn from(EntryTuple(label, link, children): EntryTuple) -> Self {
        Self {
            label,
            link,
            children,
        }
    }
}

impl From<TreeEntry> for EntryTuple {
    fn from(entry: TreeEntry) -> Self {
        Self(entry.label, entry.link, entry.children)
    }
}

impl TreeEntry {
    /// Create a leaf entry.
    #[must_use]
    pub fn leaf(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: Some(link.into()),
            children: None,
        }
    }

    /// Create an entry with children.
    #[must_use]
    pub fn branch(label: impl Into<String>, link: Option<&str>, children: Vec<TreeEntry>) -> Self {
        Self {
            label: label.into(),
            link: link.map(ToOwned::to_owned),
            children: Some(children),
        }
    }

    /// True if the entry has a children array (possibly empty).
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }
}

/// Immutable navigation tree data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeSpec {
    entries: Vec<TreeEntry>,
}

impl TreeSpec {
    /// Create a tree from top-level entries.
    #[must_use]
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Top-level entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// True if the tree has no top-level entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a bare JSON array literal.
    ///
    /// Nesting depth is not limited.
    pub fn from_json(source: &str) -> Result<Self, SpecError> {
        let mut de = serde_json::Deserializer::from_str(source);
        let entries = parse_entries(&mut de)?;
        de.end()?;
        Ok(Self { entries })
    }

    /// Parse generated script source of the form `var NAME = [...];`.
    ///
    /// Only the first array literal assigned with `var` is read; comments and
    /// code around it are ignored.
    pub fn from_script(source: &str) -> Result<Self, SpecError> {
        let Some(assignment) = ASSIGNMENT_RE.find(source) else {
            return Err(SpecError::MissingAssignment);
        };
        // The match ends with the opening bracket of the literal
        let literal = &source[assignment.end() - 1..];

        let mut de = serde_json::Deserializer::from_str(literal);
        let entries = parse_entries(&mut de)?;
        Ok(Self { entries })
    }

    /// Load tree data from a file.
    ///
    /// Files with a `.js` extension are read as generated script source,
    /// anything else as a JSON array.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        if !path.exists() {
            return Err(SpecError::NotFound(path.to_path_buf()));
        }
        let source = std::fs::read_to_string(path)?;
        let spec = if path.extension().is_some_and(|ext| ext == "js") {
            Self::from_script(&source)?
        } else {
            Self::from_json(&source)?
        };
        tracing::debug!(
            path = %path.display(),
            entries = spec.entries.len(),
            "Loaded tree data"
        );
        Ok(spec)
    }

    /// Entries visited when walking `path` from the top level.
    ///
    /// Returns `None` if any index is out of range or descends into a leaf.
    #[must_use]
    pub fn trail(&self, path: &[usize]) -> Option<Vec<&TreeEntry>> {
        let mut trail = Vec::with_capacity(path.len());
        let mut level = self.entries.as_slice();
        for &index in path {
            let entry = level.get(index)?;
            trail.push(entry);
            level = entry.children.as_deref().unwrap_or_default();
        }
        Some(trail)
    }
}
