//! Content document decomposer
//!
//! Converts an XML content document (layout, interactive plugins, scripted
//! controllers and a media manifest) into a structured `ContentDocument`.
//!
//! # Architecture
//!
//! ```text
//! Content XML string
//!   ↓ [Parse with quick-xml, normalize text]
//! MarkupTree
//!   ├─ [manifest builder]   → Manifest (media entries)
//!   ├─ [controller builder] → Vec<Controller> (attributes + literal script)
//!   └─ [plugin view]        → MarkupTree without manifest/controller subtrees
//!        ↓ [classify by tag taxonomy]
//!      Vec<PluginNode> (plugin / event / action tree)
//! ```
//!
//! Malformed markup is a terminal error; unexpected but well-formed structure
//! never is, and simply yields empty or default values.

pub(crate) mod attributes;
pub(crate) mod controller;
pub mod errors;
pub(crate) mod manifest;
pub(crate) mod markup;
pub mod parser;
pub(crate) mod plugins;
pub mod taxonomy;
pub mod types;

pub use errors::{ContentParseError, ContentParseResult, ErrorKind};
pub use parser::{parse_content, parse_content_bytes, parse_content_with_settings};
pub use taxonomy::{TagRole, TagTaxonomy};
pub use types::{
    AttributeMap, ContentDocument, Controller, Manifest, MediaEntry, ParseSettings, PluginNode, PluginRole,
    ScriptBodyPolicy,
};
