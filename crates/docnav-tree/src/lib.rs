//! Lazy navigation tree engine for static documentation sites.
//!
//! This crate provides:
//! - [`TreeSpec`]: the generator-produced tree data
//! - [`TreeSession`]: per-page-load tree state, the entry point for hosts
//! - [`find_path`] / [`resolve`]: breadcrumb path resolution
//! - [`Renderer`]: the presentation contract, with [`HtmlRenderer`] as a
//!   static markup backend
//!
//! Only the visible part of the tree is materialized. Top-level nodes are
//! created with the session; deeper nodes are created the first time their
//! parent is expanded, either by the user or by breadcrumb auto-expansion.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use docnav_tree::{HtmlRenderer, SessionConfig, TreeSession, TreeSpec, ViewportMetrics};
//!
//! let spec = TreeSpec::load(Path::new("html/navtree.js"))?;
//! let mut session = TreeSession::new(&spec, HtmlRenderer::new(""), SessionConfig::default());
//!
//! // Expand the path to the current page and select it
//! session.init_tree("class_parser.html");
//!
//! // Once the host is laid out, center the selected row
//! session.host_loaded(ViewportMetrics::new(768.0, 60.0, 24.0));
//!
//! let markup = session.renderer().render();
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod html;
#[cfg(any(test, feature = "mock"))]
mod mock;
pub mod node;
pub mod renderer;
pub mod resolver;
pub mod session;
pub mod spec;
pub mod store;
pub mod view_sync;

pub use controller::ExpansionController;
pub use html::{HtmlRenderer, RowHandle};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockRow, RecordingRenderer, RenderCall};
pub use node::{ExpansionState, Node, NodeId};
pub use renderer::{Connector, Renderer, RowSpec, Transition};
pub use resolver::{BreadcrumbPath, DEFAULT_FALLBACK, Matched, Resolution, find_path, resolve};
pub use session::{ActivateOutcome, InitOutcome, SessionConfig, TreeSession};
pub use spec::{SpecError, TreeEntry, TreeSpec};
pub use store::TreeNodeStore;
pub use view_sync::{ViewSync, ViewportMetrics};
