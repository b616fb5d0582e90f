//! Plugin tree builder
//!
//! Works on the plugin view of a document: a copy with every `manifest` and
//! `controller` subtree removed. The view is walked from the root's children
//! downward and each element is classified by tag name:
//!
//! - `event` / `action` become nodes with the matching role
//! - other non-plugin tags (`param`, `data`, `theme`, ...) are structural
//!   carriers: no node is emitted, their children attach to the nearest
//!   enclosing modeled node
//! - everything else becomes a `Plugin` node
//!
//! The walk depth is bounded by the nesting limit enforced when the markup
//! tree was built.

use crate::content::attributes::extract_tagged_attributes;
use crate::content::markup::{MarkupTree, NodeId};
use crate::content::taxonomy::{TagRole, TagTaxonomy, CONTROLLER_TAG, MANIFEST_TAG};
use crate::content::types::{PluginNode, PluginRole};

/// The document without manifest and controller subtrees
pub fn plugin_view(tree: &MarkupTree) -> MarkupTree {
    tree.without_subtrees(|name| name == MANIFEST_TAG || name == CONTROLLER_TAG)
}

pub fn build_plugins(tree: &MarkupTree, taxonomy: &TagTaxonomy) -> Vec<PluginNode> {
    let view = plugin_view(tree);
    let plugins = match view.root_element() {
        Some(root) => build_children(&view, root, taxonomy),
        None => Vec::new(),
    };

    log::debug!("Plugin forest built: {} top-level nodes", plugins.len());
    plugins
}

fn build_children(view: &MarkupTree, parent: NodeId, taxonomy: &TagTaxonomy) -> Vec<PluginNode> {
    let mut nodes = Vec::new();
    for child in view.element_children(parent) {
        let tag_name = view.tag_name(child).unwrap_or_default();
        let role = match taxonomy.classify(tag_name) {
            TagRole::NonPlugin => {
                // Carrier element: hoist whatever it contains
                nodes.extend(build_children(view, child, taxonomy));
                continue;
            }
            TagRole::Event => PluginRole::Event,
            TagRole::Action => PluginRole::Action,
            TagRole::Plugin => PluginRole::Plugin,
        };
        nodes.push(PluginNode {
            role,
            attributes: extract_tagged_attributes(view, child, tag_name),
            children: build_children(view, child, taxonomy),
        });
    }
    nodes
}
