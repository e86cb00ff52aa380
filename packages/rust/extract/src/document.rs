//! Thin query layer over `roxmltree`.
//!
//! Every lookup returns an `Option`; callers decide whether absence means
//! "use a default", "skip this entry" or "fail the request".

use roxmltree::{Document, Node};
use tracing::debug;

use layoutmap_shared::{LayoutMapError, Result};

/// Parse the outer combined document.
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    Document::parse(text).map_err(|e| LayoutMapError::xml_syntax(e.to_string()))
}

/// Parse a layout definition embedded as text inside the outer document.
///
/// Empty bodies and malformed markup both yield `None`.
pub fn parse_nested(text: &str) -> Option<Document<'_>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        debug!("empty layout definition");
        return None;
    }

    match Document::parse(trimmed) {
        Ok(doc) => Some(doc),
        Err(e) => {
            debug!(error = %e, "layout definition is not well-formed");
            None
        }
    }
}

/// First direct child element with the given tag name.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// Follow a fixed path of direct child element names.
pub fn child_path<'a, 'input>(
    node: Node<'a, 'input>,
    path: &[&str],
) -> Option<Node<'a, 'input>> {
    path.iter().try_fold(node, |current, name| child(current, name))
}

/// All elements under `node` (itself included) with the given tag name, in
/// document order.
pub fn descendants_named<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().filter(move |n| n.has_tag_name(name))
}

/// Concatenated text (including CDATA) of every text node under `node`.
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Trimmed text of a direct child element, `None` if the child is absent.
pub fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name).map(|c| text_content(c).trim().to_string())
}

/// Whether a marker attribute is set to `true` (case-insensitive).
pub fn has_marker(node: Node<'_, '_>, name: &str) -> bool {
    node.attribute(name)
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}
