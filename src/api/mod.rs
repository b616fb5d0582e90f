//! Content Parser WASM API
//!
//! JavaScript-facing functions for decomposing content documents.
//!
//! # Module Structure
//!
//! - `helpers`: Console logging macros, serialization and error conversion
//! - `content`: Parse entry points

pub mod helpers;
pub mod content;

pub use content::{parse_content_document, parse_content_document_json, parse_content_document_with_settings};
