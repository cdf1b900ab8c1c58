//! Depth-limited flattening of the document tree

use crate::domain::{Document, ExporterError, Node, Result};

/// Flatten the hierarchy below `root` to `depth` levels
///
/// Level 1 is the root's immediate children. Each further level appends the
/// children of the nodes added at the previous level, so ancestors and their
/// descendants coexist in the output and no node appears twice. Order is
/// level by level, document order within a level.
///
/// The root itself is never part of the output. Hidden nodes are kept.
///
/// # Errors
///
/// Returns [`ExporterError::Configuration`] if `depth` is 0.
///
/// # Examples
///
/// ```
/// use figma_exporter::core::selection::flatten_nodes;
/// use figma_exporter::domain::{Node, NodeId};
///
/// # fn example() -> figma_exporter::domain::Result<()> {
/// let id = |s: &str| NodeId::new(s).unwrap();
/// let root = Node::new(id("0:0"), "Document", "DOCUMENT").with_children(vec![
///     Node::new(id("0:1"), "Page", "CANVAS")
///         .with_children(vec![Node::new(id("1:1"), "Login", "FRAME")]),
/// ]);
///
/// assert_eq!(flatten_nodes(&root, 1)?.len(), 1);
/// assert_eq!(flatten_nodes(&root, 2)?.len(), 2);
/// # Ok(())
/// # }
/// ```
pub fn flatten_nodes(root: &Node, depth: usize) -> Result<Vec<&Node>> {
    check_depth(depth)?;
    Ok(expand(root.children.iter().collect(), depth))
}

/// Flatten a document's pages and their contents to `depth` levels
///
/// Pages (the `CANVAS` children of the `DOCUMENT` node) are always listed;
/// `depth` counts levels below them, so depth 1 yields every page followed
/// by its top-level frames.
///
/// # Errors
///
/// Returns [`ExporterError::Configuration`] if `depth` is 0.
///
/// # Examples
///
/// ```
/// use figma_exporter::core::selection::flatten_document;
/// use figma_exporter::domain::{Document, Node, NodeId};
///
/// # fn example() -> figma_exporter::domain::Result<()> {
/// let id = |s: &str| NodeId::new(s).unwrap();
/// let document = Document::new(
///     "App",
///     Node::new(id("0:0"), "Document", "DOCUMENT").with_children(vec![
///         Node::new(id("0:1"), "Page", "CANVAS")
///             .with_children(vec![Node::new(id("1:1"), "Login", "FRAME")]),
///     ]),
/// );
///
/// let names: Vec<_> = flatten_document(&document, 1)?.iter().map(|n| n.name.as_str()).collect();
/// assert_eq!(names, vec!["Page", "Login"]);
/// # Ok(())
/// # }
/// ```
pub fn flatten_document(document: &Document, depth: usize) -> Result<Vec<&Node>> {
    check_depth(depth)?;
    Ok(expand(document.root.children.iter().collect(), depth + 1))
}

fn check_depth(depth: usize) -> Result<()> {
    if depth < 1 {
        return Err(ExporterError::Configuration(format!(
            "depth must be 1 or more, got {depth}"
        )));
    }
    Ok(())
}

/// Emit `frontier` and then `levels - 1` generations of descendants
fn expand(mut frontier: Vec<&Node>, levels: usize) -> Vec<&Node> {
    let mut flattened: Vec<&Node> = Vec::new();

    for level in 1..=levels {
        if frontier.is_empty() {
            break;
        }

        tracing::trace!(level, nodes = frontier.len(), "Flattening level");

        let next: Vec<&Node> = frontier
            .iter()
            .flat_map(|node| node.children.iter())
            .collect();

        flattened.append(&mut frontier);
        frontier = next;
    }

    flattened
}
