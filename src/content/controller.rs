//! Controller builder
//!
//! Every `controller` element becomes a `Controller` carrying its attributes
//! and the literal (CDATA) payload found among its direct children.

use crate::content::attributes::extract_tagged_attributes;
use crate::content::errors::{ContentParseError, ContentParseResult};
use crate::content::markup::{MarkupTree, NodeId, NodeKind};
use crate::content::taxonomy::CONTROLLER_TAG;
use crate::content::types::{Controller, ScriptBodyPolicy};

pub fn build_controllers(tree: &MarkupTree, policy: ScriptBodyPolicy) -> ContentParseResult<Vec<Controller>> {
    let controllers = tree
        .elements_by_tag_name(CONTROLLER_TAG)
        .into_iter()
        .map(|controller| {
            Ok(Controller {
                attributes: extract_tagged_attributes(tree, controller, CONTROLLER_TAG),
                script_body: script_body(tree, controller, policy)?,
            })
        })
        .collect::<ContentParseResult<Vec<_>>>()?;

    log::debug!("Controllers built: {}", controllers.len());
    Ok(controllers)
}

fn script_body(tree: &MarkupTree, controller: NodeId, policy: ScriptBodyPolicy) -> ContentParseResult<String> {
    let blocks: Vec<&str> = tree
        .children(controller)
        .iter()
        .filter_map(|child| match tree.kind(*child) {
            NodeKind::CData(payload) => Some(payload.as_str()),
            _ => None,
        })
        .collect();

    if blocks.len() > 1 {
        match policy {
            ScriptBodyPolicy::Reject => {
                return Err(ContentParseError::StructuralAmbiguity {
                    tag: CONTROLLER_TAG.to_string(),
                    reason: format!("{} literal blocks found, expected at most one", blocks.len()),
                })
            }
            ScriptBodyPolicy::LastWins => {
                log::warn!("<{}> has {} literal blocks, keeping the last one", CONTROLLER_TAG, blocks.len())
            }
            ScriptBodyPolicy::Concatenate => {}
        }
    }

    Ok(match policy {
        ScriptBodyPolicy::Concatenate => blocks.concat(),
        _ => blocks.last().map(|block| block.to_string()).unwrap_or_default(),
    })
}
