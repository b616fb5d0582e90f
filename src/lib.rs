//! Content Parser WASM Module
//!
//! Decomposes XML content documents (layout, interactive plugins, scripted
//! controllers and a media manifest) into a structured, queryable model for
//! downstream packaging stages.

pub mod content;
pub mod api;

// Re-export commonly used types
pub use content::{
    parse_content, parse_content_bytes, parse_content_with_settings, ContentDocument, ContentParseError,
    Controller, Manifest, MediaEntry, ParseSettings, PluginNode, PluginRole,
};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only when a logger is already installed
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Content parser WASM module initialized");
}
