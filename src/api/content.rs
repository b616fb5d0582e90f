//! Content parsing operations for the WASM API

use crate::api::helpers::{deserialize, parse_error, serialize};
use crate::content::{parse_content, parse_content_with_settings, ContentDocument, ParseSettings};
use crate::{wasm_error, wasm_info, wasm_log};
use wasm_bindgen::prelude::*;

fn log_summary(document: &ContentDocument) {
    wasm_log!(
        "  {} media, {} controllers, {} plugin nodes",
        document.manifest.medias.len(),
        document.controllers.len(),
        document.plugin_count()
    );
}

/// Parse a content document into a JS object
#[wasm_bindgen(js_name = parseContentDocument)]
pub fn parse_content_document(xml: &str) -> Result<JsValue, JsValue> {
    wasm_info!("parseContentDocument called ({} bytes)", xml.len());

    let document = parse_content(xml).map_err(parse_error)?;
    log_summary(&document);

    serialize(&document, "Failed to serialize content document")
}

/// Parse a content document with settings supplied from JavaScript
///
/// `settings` may omit any field; missing fields take their defaults.
#[wasm_bindgen(js_name = parseContentDocumentWithSettings)]
pub fn parse_content_document_with_settings(xml: &str, settings: JsValue) -> Result<JsValue, JsValue> {
    wasm_info!("parseContentDocumentWithSettings called ({} bytes)", xml.len());

    let settings: ParseSettings = if settings.is_undefined() || settings.is_null() {
        ParseSettings::default()
    } else {
        deserialize(settings, "Invalid parse settings")?
    };
    wasm_log!("  max_depth={}, script_policy={:?}", settings.max_depth, settings.script_policy);

    let document = parse_content_with_settings(xml, &settings).map_err(parse_error)?;
    log_summary(&document);

    serialize(&document, "Failed to serialize content document")
}

/// Parse a content document and return it as pretty-printed JSON
#[wasm_bindgen(js_name = parseContentDocumentJson)]
pub fn parse_content_document_json(xml: &str) -> Result<String, JsValue> {
    wasm_info!("parseContentDocumentJson called ({} bytes)", xml.len());

    let document = parse_content(xml).map_err(parse_error)?;
    log_summary(&document);

    let json = document.to_json_pretty().map_err(|e| {
        wasm_error!("JSON serialization error: {}", e);
        JsValue::from_str(&format!("JSON serialization error: {}", e))
    })?;

    wasm_info!("  JSON generated: {} bytes", json.len());
    Ok(json)
}
