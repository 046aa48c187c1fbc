//! WASM bindings for the storybook engine.
//!
//! Exposes page compilation and the engine's pure trackers to JavaScript
//! via wasm-bindgen.
//! Build with: `wasm-pack build --target web --features wasm`

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::engine::caption::{active_caption, CaptionTiming};
use crate::story::CaptionLine;

/// Compile storybook JSON to a self-contained HTML page.
///
/// Returns the HTML string on success, or throws a JS error on failure.
#[wasm_bindgen]
pub fn compile_page(source: &str) -> Result<String, JsError> {
    crate::compile_page(source).map_err(|e| JsError::new(&e.to_string()))
}

/// Active section for a scroll offset. Degenerate input yields 0.
#[wasm_bindgen]
pub fn active_section(offset: f64, viewport: f64, count: usize) -> usize {
    crate::engine::section::active_section(offset, viewport, count)
}

#[derive(Serialize)]
struct CaptionResult {
    index: i64,
    text: String,
    progress: f64,
}

/// Active caption at `clock` seconds.
///
/// `captions` is an array of `{ text, timestamp }`, sorted by timestamp.
/// Returns `{ index, text, progress }` with `index = -1` when nothing is active.
#[wasm_bindgen]
pub fn caption_at(clock: f64, captions: JsValue) -> Result<JsValue, JsError> {
    let lines: Vec<CaptionLine> =
        serde_wasm_bindgen::from_value(captions).map_err(|e| JsError::new(&e.to_string()))?;
    let frame = active_caption(clock, &lines, CaptionTiming::default());
    let result = CaptionResult {
        index: frame.index_or_minus_one(),
        text: frame.revealed.to_string(),
        progress: frame.progress,
    };
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsError::new(&e.to_string()))
}

/// Phrase prefix typed after `elapsed_ms` at one character per `interval_ms`.
#[wasm_bindgen]
pub fn typewriter_reveal(text: &str, elapsed_ms: u64, interval_ms: u64) -> String {
    crate::engine::typewriter_reveal(text, elapsed_ms, interval_ms).to_string()
}

/// Scale and opacity of the three encounter map layers, `elapsed_ms`
/// after the section became active.
#[wasm_bindgen]
pub fn encounter_frame(active: bool, elapsed_ms: u64) -> Result<JsValue, JsError> {
    let frame = crate::engine::encounter::encounter_frame(active, elapsed_ms);
    serde_wasm_bindgen::to_value(&frame).map_err(|e| JsError::new(&e.to_string()))
}

/// Validate storybook JSON without rendering.
///
/// Returns `{ valid, error?, warnings? }`.
#[wasm_bindgen]
pub fn validate(source: &str) -> Result<JsValue, JsError> {
    #[derive(Serialize)]
    struct Report {
        valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        warnings: Vec<String>,
    }

    let report = match crate::story::parse(source) {
        Ok(loaded) => Report {
            valid: true,
            error: None,
            warnings: loaded.warnings,
        },
        Err(e) => Report {
            valid: false,
            error: Some(e.to_string()),
            warnings: Vec::new(),
        },
    };
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsError::new(&e.to_string()))
}
