//! Tag taxonomy
//!
//! Fixed classification of content tag names into roles. Matching is an exact,
//! case-sensitive comparison on the tag name; there is no wildcard or
//! inheritance matching.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::sync::Arc;

pub const MANIFEST_TAG: &str = "manifest";
pub const MEDIA_TAG: &str = "media";
pub const CONTROLLER_TAG: &str = "controller";
pub const EVENT_TAG: &str = "event";
pub const ACTION_TAG: &str = "action";

/// Synthetic attribute holding an element's own tag name
pub const TAG_NAME_KEY: &str = "tag_name";
/// Synthetic attribute holding the tag name of an element's parent
pub const GROUP_TAG_NAME_KEY: &str = "group_tag_name";

const STANDARD_NON_PLUGIN_TAGS: [&str; 8] = [
    "param",
    "data",
    "audioSprite",
    ACTION_TAG,
    EVENT_TAG,
    MANIFEST_TAG,
    MEDIA_TAG,
    "theme",
];

lazy_static! {
    static ref STANDARD_TAXONOMY: Arc<TagTaxonomy> = Arc::new(TagTaxonomy::new(
        STANDARD_NON_PLUGIN_TAGS,
        [EVENT_TAG],
        [ACTION_TAG],
    ));
}

/// Role of a tag name in the plugin tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagRole {
    /// Structural carrier: not modeled, its children are hoisted
    NonPlugin,
    /// Trigger marker
    Event,
    /// Response marker
    Action,
    /// Unclassified, so the element is itself a plugin
    Plugin,
}

/// Read-only lookup table from tag name to role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTaxonomy {
    non_plugin: HashSet<String>,
    events: HashSet<String>,
    actions: HashSet<String>,
}

impl TagTaxonomy {
    pub fn new<N, E, A>(non_plugin: N, events: E, actions: A) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        TagTaxonomy {
            non_plugin: non_plugin.into_iter().map(Into::into).collect(),
            events: events.into_iter().map(Into::into).collect(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// Shared process-wide taxonomy, built once on first use
    pub fn standard() -> Arc<TagTaxonomy> {
        Arc::clone(&STANDARD_TAXONOMY)
    }

    pub fn classify(&self, tag_name: &str) -> TagRole {
        if self.events.contains(tag_name) {
            TagRole::Event
        } else if self.actions.contains(tag_name) {
            TagRole::Action
        } else if self.non_plugin.contains(tag_name) {
            TagRole::NonPlugin
        } else {
            TagRole::Plugin
        }
    }

    pub fn is_plugin(&self, tag_name: &str) -> bool {
        !self.non_plugin.contains(tag_name)
    }

    pub fn is_event(&self, tag_name: &str) -> bool {
        self.events.contains(tag_name)
    }

    pub fn is_action(&self, tag_name: &str) -> bool {
        self.actions.contains(tag_name)
    }

    /// Check that every event and action tag is also a non-plugin tag.
    /// Returns the first offending tag name.
    pub(crate) fn find_unlisted_marker(&self) -> Option<&str> {
        self.events
            .iter()
            .chain(self.actions.iter())
            .find(|tag| !self.non_plugin.contains(tag.as_str()))
            .map(String::as_str)
    }
}

impl Default for TagTaxonomy {
    fn default() -> Self {
        TagTaxonomy::standard().as_ref().clone()
    }
}
