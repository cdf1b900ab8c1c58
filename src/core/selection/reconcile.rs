//! Matching local placeholder files against node names

use crate::domain::{LocalAsset, Node, NodeId};
use std::collections::{HashMap, HashSet};

/// Name lookup over the flattened nodes
///
/// Names are not unique in a document. When two nodes share a name, the one
/// seen later in flattening order owns it in `by_name`; both still keep their
/// own entry in `by_id`.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_name: HashMap<String, NodeId>,
    by_id: HashMap<NodeId, String>,
}

impl NameIndex {
    /// Build the index from nodes in flattening order
    pub fn build<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let mut index = Self::default();
        for node in nodes {
            if let Some(previous) = index.by_name.insert(node.name.clone(), node.id.clone()) {
                tracing::debug!(
                    name = %node.name,
                    replaced = %previous,
                    node_id = %node.id,
                    "Duplicate node name, later node wins"
                );
            }
            index.by_id.insert(node.id.clone(), node.name.clone());
        }
        index
    }

    /// Identifier currently owning `name`
    pub fn lookup(&self, name: &str) -> Option<&NodeId> {
        self.by_name.get(name)
    }

    /// Name of the node with identifier `id`
    pub fn name_of(&self, id: &NodeId) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// The nodes chosen for export
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Selected identifiers, no duplicates, in listing order
    pub ids: Vec<NodeId>,

    /// Node name for every selected identifier
    pub names: HashMap<NodeId, String>,

    /// Local file names that matched no node
    pub unmatched: Vec<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Node name for a selected identifier
    pub fn name_of(&self, id: &NodeId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }
}

/// Select the nodes whose name equals the base name of a local file
///
/// Directories are ignored. Unmatched files add nothing and are logged at
/// debug level. A base name that appears twice (`Login.png`, `Login.svg`)
/// selects its node once.
pub fn reconcile(index: &NameIndex, assets: &[LocalAsset]) -> Selection {
    let mut selection = Selection::default();
    let mut seen: HashSet<NodeId> = HashSet::new();

    for asset in assets.iter().filter(|a| !a.is_dir) {
        match index.lookup(&asset.base_name) {
            Some(id) => {
                if seen.insert(id.clone()) {
                    tracing::debug!(
                        file = %asset.file_name,
                        node_id = %id,
                        "Selected node for export"
                    );
                    selection.ids.push(id.clone());
                    selection
                        .names
                        .insert(id.clone(), asset.base_name.clone());
                }
            }
            None => {
                tracing::debug!(file = %asset.file_name, "No node matches local file");
                selection.unmatched.push(asset.file_name.clone());
            }
        }
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: &str) -> Node {
        Node::new(NodeId::new(id).unwrap(), name, "FRAME")
    }

    fn ids(selection: &Selection) -> Vec<&str> {
        selection.ids.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn test_login_signup_round_trip() {
        let nodes = [node("1:1", "Login"), node("1:2", "Signup")];
        let index = NameIndex::build(nodes.iter());
        let assets = [LocalAsset::file("Login.png"), LocalAsset::file("Signup.svg")];

        let selection = reconcile(&index, &assets);

        assert_eq!(ids(&selection), vec!["1:1", "1:2"]);
        assert_eq!(
            selection.name_of(&NodeId::new("1:2").unwrap()),
            Some("Signup")
        );
        assert!(selection.unmatched.is_empty());
    }

    #[test]
    fn test_unmatched_files_add_nothing() {
        let nodes = [node("1:1", "Login")];
        let index = NameIndex::build(nodes.iter());
        let assets = [LocalAsset::file("Login.png"), LocalAsset::file("README.md")];

        let selection = reconcile(&index, &assets);

        assert_eq!(ids(&selection), vec!["1:1"]);
        assert_eq!(selection.unmatched, vec!["README.md".to_string()]);
    }

    #[test]
    fn test_directories_are_ignored() {
        let nodes = [node("1:1", "Login")];
        let index = NameIndex::build(nodes.iter());
        let assets = [LocalAsset::directory("Login")];

        let selection = reconcile(&index, &assets);
        assert!(selection.is_empty());
        assert!(selection.unmatched.is_empty());
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let nodes = [node("1:1", "Icon"), node("2:1", "Icon")];
        let index = NameIndex::build(nodes.iter());

        assert_eq!(index.lookup("Icon").map(NodeId::as_str), Some("2:1"));
        assert_eq!(index.name_of(&NodeId::new("1:1").unwrap()), Some("Icon"));
        assert_eq!(index.len(), 1);

        let selection = reconcile(&index, &[LocalAsset::file("Icon.png")]);
        assert_eq!(ids(&selection), vec!["2:1"]);
    }

    #[test]
    fn test_same_base_name_selected_once() {
        let nodes = [node("1:1", "Login")];
        let index = NameIndex::build(nodes.iter());
        let assets = [LocalAsset::file("Login.png"), LocalAsset::file("Login.svg")];

        let selection = reconcile(&index, &assets);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_multi_dot_and_dotless_names() {
        let nodes = [node("1:1", "icon.dark"), node("1:2", "Makefile")];
        let index = NameIndex::build(nodes.iter());
        let assets = [
            LocalAsset::file("icon.dark.png"),
            LocalAsset::file("Makefile"),
        ];

        let selection = reconcile(&index, &assets);
        assert_eq!(ids(&selection), vec!["1:1"]);
        assert_eq!(selection.unmatched, vec!["Makefile".to_string()]);
    }

    #[test]
    fn test_dotless_file_does_not_select_same_named_node() {
        let nodes = [node("1:1", "Login")];
        let index = NameIndex::build(nodes.iter());

        let selection = reconcile(&index, &[LocalAsset::file("Login")]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_empty_listing_selects_nothing() {
        let nodes = [node("1:1", "Login")];
        let index = NameIndex::build(nodes.iter());
        assert!(reconcile(&index, &[]).is_empty());
    }
}
