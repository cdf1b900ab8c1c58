//! Document tree model
//!
//! [`Document`] and [`Node`] are the decoded, read-only form of a Figma file.
//! They are built once per run by the document fetcher and never mutated.

use super::ids::NodeId;
use chrono::{DateTime, Utc};

/// A single entry in the document hierarchy (canvas, frame, group, layer, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identifier, unique within the document
    pub id: NodeId,

    /// Display name, not guaranteed unique
    pub name: String,

    /// Visibility flag
    pub visible: bool,

    /// Node type as reported by the API (`CANVAS`, `FRAME`, `COMPONENT`, ...)
    pub kind: String,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Node {
    /// Create a visible node with no children
    pub fn new(id: NodeId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            kind: kind.into(),
            children: Vec::new(),
        }
    }

    /// Set the children
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Set the visibility flag
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Total number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

/// A decoded Figma file: metadata plus the root node
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File name
    pub name: String,

    /// Role of the token owner on this file (`owner`, `editor`, `viewer`)
    pub role: Option<String>,

    /// Last modification time
    pub last_modified: Option<DateTime<Utc>>,

    /// File version identifier
    pub version: Option<String>,

    /// Thumbnail URL
    pub thumbnail_url: Option<String>,

    /// Schema version of the payload
    pub schema_version: i64,

    /// Root node of the tree
    pub root: Node,
}

impl Document {
    /// Create a document with only a name and a root node
    pub fn new(name: impl Into<String>, root: Node) -> Self {
        Self {
            name: name.into(),
            role: None,
            last_modified: None,
            version: None,
            thumbnail_url: None,
            schema_version: 0,
            root,
        }
    }
}
