//! Attribute extraction shared by every builder

use crate::content::markup::{MarkupTree, NodeId};
use crate::content::taxonomy::{GROUP_TAG_NAME_KEY, TAG_NAME_KEY};
use crate::content::types::AttributeMap;

/// Attributes of an element whose name and value are both non-blank.
/// Non-element nodes have no attributes.
pub fn extract_attributes(tree: &MarkupTree, node: NodeId) -> AttributeMap {
    tree.attributes(node)
        .iter()
        .filter(|(name, value)| !is_blank(name) && !is_blank(value))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Attributes plus the synthetic `tag_name` entry
pub fn extract_tagged_attributes(tree: &MarkupTree, node: NodeId, tag_name: &str) -> AttributeMap {
    let mut attributes = extract_attributes(tree, node);
    attributes.insert(TAG_NAME_KEY.to_string(), tag_name.to_string());
    attributes
}

/// One attribute record per element below `node`, in document order, each
/// tagged with its own tag name and its parent's tag name
pub fn collect_descendants(tree: &MarkupTree, node: NodeId) -> Vec<AttributeMap> {
    tree.descendants(node)
        .into_iter()
        .map(|descendant| {
            let mut record = extract_attributes(tree, descendant);
            record.insert(
                TAG_NAME_KEY.to_string(),
                tree.tag_name(descendant).unwrap_or_default().to_string(),
            );
            if let Some(group) = tree.parent(descendant).and_then(|parent| tree.tag_name(parent)) {
                record.insert(GROUP_TAG_NAME_KEY.to_string(), group.to_string());
            }
            record
        })
        .collect()
}

/// Empty or made only of blank characters
fn is_blank(s: &str) -> bool {
    s.chars().all(is_blank_char)
}

/// Unicode whitespace minus the no-break spaces and NEL, plus the ASCII
/// information separators U+001C..U+001F
fn is_blank_char(c: char) -> bool {
    match c {
        '\u{00A0}' | '\u{2007}' | '\u{202F}' | '\u{0085}' => false,
        '\u{001C}'..='\u{001F}' => true,
        c => c.is_whitespace(),
    }
}
