//! Type definitions for the content document model
//!
//! - Result model (ContentDocument, Manifest, MediaEntry, Controller, PluginNode)
//! - Parser configuration (ParseSettings, ScriptBodyPolicy)
//!
//! All model values are built fresh by one parse call and are not mutated
//! afterwards; downstream stages derive new data from them.

use crate::content::taxonomy::{TagTaxonomy, TAG_NAME_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Non-blank attribute name → value
pub type AttributeMap = BTreeMap<String, String>;

// ============================================================================
// RESULT MODEL
// ============================================================================

/// Fully decomposed content document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub manifest: Manifest,
    pub controllers: Vec<Controller>,
    /// Top-level plugin forest
    pub plugins: Vec<PluginNode>,
}

impl ContentDocument {
    pub fn is_empty(&self) -> bool {
        self.manifest.medias.is_empty() && self.controllers.is_empty() && self.plugins.is_empty()
    }

    /// Number of plugin nodes across the whole forest
    pub fn plugin_count(&self) -> usize {
        self.plugins_depth_first().count()
    }

    /// Pre-order walk over every plugin node in document order
    pub fn plugins_depth_first(&self) -> PluginIter<'_> {
        PluginIter::new(&self.plugins)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Media resources listed by the document's manifest sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub medias: Vec<MediaEntry>,
}

impl Manifest {
    /// First media whose `id` attribute equals `id`
    pub fn find_media(&self, id: &str) -> Option<&MediaEntry> {
        self.medias.iter().find(|media| media.id() == Some(id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// Attributes of the media element plus `tag_name = "media"`
    pub attributes: AttributeMap,
    /// One record per element below the media, in document order, each with
    /// `tag_name` and `group_tag_name`
    pub descendants: Vec<AttributeMap>,
}

impl MediaEntry {
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    /// Attributes of the controller element plus `tag_name = "controller"`
    pub attributes: AttributeMap,
    /// Verbatim literal-block payload, empty when there is none
    pub script_body: String,
}

impl Controller {
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginRole {
    Plugin,
    Event,
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginNode {
    pub role: PluginRole,
    pub attributes: AttributeMap,
    pub children: Vec<PluginNode>,
}

impl PluginNode {
    pub fn tag_name(&self) -> &str {
        self.attributes.get(TAG_NAME_KEY).map(String::as_str).unwrap_or_default()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_event(&self) -> bool {
        self.role == PluginRole::Event
    }

    pub fn is_action(&self) -> bool {
        self.role == PluginRole::Action
    }
}

/// Pre-order iterator over a plugin forest
pub struct PluginIter<'a> {
    stack: Vec<&'a PluginNode>,
}

impl<'a> PluginIter<'a> {
    fn new(roots: &'a [PluginNode]) -> Self {
        PluginIter {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PluginIter<'a> {
    type Item = &'a PluginNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// What to do when a controller has several direct literal blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptBodyPolicy {
    /// Keep the last block in document order
    #[default]
    LastWins,
    /// Join all blocks in document order
    Concatenate,
    /// Fail with `StructuralAmbiguity`
    Reject,
}

/// Configuration options for parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    /// Maximum element nesting depth accepted from the input, between 1 and
    /// `MAX_DEPTH_CEILING`. Deeper documents fail with `NestingTooDeep`.
    pub max_depth: usize,

    pub script_policy: ScriptBodyPolicy,

    /// Tag classification table
    #[serde(skip, default = "TagTaxonomy::standard")]
    pub taxonomy: Arc<TagTaxonomy>,
}

pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Highest accepted `max_depth`. Building, comparing, dropping and
/// serializing the plugin tree all recurse once per nesting level, so the
/// bound has to stay well inside the call stack.
pub const MAX_DEPTH_CEILING: usize = 1024;

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            script_policy: ScriptBodyPolicy::default(),
            taxonomy: TagTaxonomy::standard(),
        }
    }
}

impl ParseSettings {
    pub fn with_taxonomy(mut self, taxonomy: TagTaxonomy) -> Self {
        self.taxonomy = Arc::new(taxonomy);
        self
    }

    pub fn with_script_policy(mut self, policy: ScriptBodyPolicy) -> Self {
        self.script_policy = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
