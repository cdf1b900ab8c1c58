//! Node selection
//!
//! Turns the document tree and the export directory listing into the list of
//! node identifiers to render:
//! - [`flatten`] - depth-limited, level-by-level flattening anchored at the document pages
//! - [`reconcile`] - name index and base-name matching

pub mod flatten;
pub mod reconcile;

pub use flatten::{flatten_document, flatten_nodes};
pub use reconcile::{reconcile, NameIndex, Selection};
