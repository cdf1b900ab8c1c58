//! Domain identifier types with validation
//!
//! Newtype wrappers for Figma identifiers. Each type rejects empty values so a
//! project id can't be confused with a node id and neither can silently be blank.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Figma node identifier newtype wrapper
///
/// Node ids are opaque strings such as `1:2` or `I5:10;3:4`, unique within a
/// document. Deserialization goes through [`NodeId::new`], so an empty id in a
/// payload is rejected at decode time.
///
/// # Examples
///
/// ```
/// use figma_exporter::domain::ids::NodeId;
/// use std::str::FromStr;
///
/// let id = NodeId::from_str("1:2").unwrap();
/// assert_eq!(id.as_str(), "1:2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Creates a new NodeId from a string
    ///
    /// Returns `Err` if the id is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Node ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the node ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NodeId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Figma file (project) key newtype wrapper
///
/// The key is the path segment after `/file/` in a Figma URL.
///
/// # Examples
///
/// ```
/// use figma_exporter::domain::ids::ProjectId;
///
/// let project = ProjectId::new("aBcD1234efGH").unwrap();
/// assert_eq!(project.to_string(), "aBcD1234efGH");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new ProjectId, trimming surrounding whitespace
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Project ID cannot be empty".to_string());
        }
        if trimmed.contains('/') {
            return Err(format!("Project ID must not contain '/': {trimmed}"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the project ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
