//! Content document parser
//!
//! Parses raw markup into a `MarkupTree` and drives the manifest, controller
//! and plugin builders over it.

use crate::content::controller::build_controllers;
use crate::content::errors::{ContentParseError, ContentParseResult};
use crate::content::manifest::build_manifest;
use crate::content::markup::MarkupTree;
use crate::content::plugins::build_plugins;
use crate::content::types::{ContentDocument, ParseSettings, MAX_DEPTH_CEILING};

/// Parse a content document with default settings
///
/// # Example
///
/// ```ignore
/// let doc = parse_content(r#"<content>
///   <manifest><media id="m1" src="a.png"/></manifest>
///   <controller id="c1"><![CDATA[x=1;]]></controller>
///   <text id="t1"><event id="e1"/></text>
/// </content>"#)?;
///
/// assert_eq!(doc.manifest.medias.len(), 1);
/// assert_eq!(doc.controllers[0].script_body, "x=1;");
/// assert_eq!(doc.plugins[0].tag_name(), "text");
/// ```
pub fn parse_content(xml: &str) -> ContentParseResult<ContentDocument> {
    parse_content_with_settings(xml, &ParseSettings::default())
}

pub fn parse_content_with_settings(xml: &str, settings: &ParseSettings) -> ContentParseResult<ContentDocument> {
    validate_settings(settings)?;

    let tree = MarkupTree::parse(xml, settings.max_depth)?;
    let root = match tree.root_element() {
        Some(root) if tree.has_children(root) => root,
        _ => {
            log::debug!("Content root has no children, returning an empty document");
            return Ok(ContentDocument::default());
        }
    };
    log::debug!(
        "Parsing content document rooted at <{}>",
        tree.tag_name(root).unwrap_or_default()
    );

    let manifest = build_manifest(&tree);
    let controllers = build_controllers(&tree, settings.script_policy)?;
    let plugins = build_plugins(&tree, &settings.taxonomy);

    Ok(ContentDocument {
        manifest,
        controllers,
        plugins,
    })
}

/// Parse raw bytes, which must be UTF-8 encoded
pub fn parse_content_bytes(bytes: &[u8], settings: &ParseSettings) -> ContentParseResult<ContentDocument> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| ContentParseError::Io(format!("input is not valid UTF-8: {}", e)))?;
    parse_content_with_settings(xml, settings)
}

fn validate_settings(settings: &ParseSettings) -> ContentParseResult<()> {
    if settings.max_depth == 0 || settings.max_depth > MAX_DEPTH_CEILING {
        return Err(ContentParseError::Configuration(format!(
            "max_depth must be between 1 and {}, got {}",
            MAX_DEPTH_CEILING, settings.max_depth
        )));
    }
    if let Some(tag) = settings.taxonomy.find_unlisted_marker() {
        return Err(ContentParseError::Configuration(format!(
            "event/action tag '{}' is missing from the non-plugin tags",
            tag
        )));
    }
    Ok(())
}
