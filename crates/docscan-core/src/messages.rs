// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-visible strings for the scan screen.
//
// Hosts localise by deserialising a catalog from their resource bundle; any
// key they omit falls back to the English default.

use serde::{Deserialize, Serialize};

/// Every string the session shows to the user or returns to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageCatalog {
    /// Toast after the engine located a document in the preview.
    pub preview_success: String,
    /// Toast after the final image was produced.
    pub picture_success: String,
    /// Prefix for every full-frame processing failure.
    pub picture_error: String,
    pub error_not_sharp: String,
    pub error_skew_too_high: String,
    pub error_outline_not_found: String,
    pub error_glare_detected: String,
    pub error_too_dark: String,
    pub error_unknown: String,
    /// Progress dialog title while the full frame is processed.
    pub processing_title: String,
    /// Progress dialog body while the full frame is processed.
    pub processing_body: String,
    /// Hint shown when the preview keeps failing to find a document.
    pub preview_hint: String,
    /// Shell error prefix for a malformed configuration blob.
    pub invalid_json_data: String,
    /// Shell error prefix for every other fatal error.
    pub error_occurred: String,
    /// Result payload error when the JPEG could not be written.
    pub image_not_saved: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            preview_success: "Document found, hold still".into(),
            picture_success: "Document scanned".into(),
            picture_error: "Picture error: ".into(),
            error_not_sharp: "the document is not sharp".into(),
            error_skew_too_high: "the document is skewed too much".into(),
            error_outline_not_found: "no document outline found".into(),
            error_glare_detected: "glare detected".into(),
            error_too_dark: "the image is too dark".into(),
            error_unknown: "unknown error".into(),
            processing_title: "Processing".into(),
            processing_body: "Processing picture, please wait...".into(),
            preview_hint: "Place the whole document inside the camera view".into(),
            invalid_json_data: "invalid json data".into(),
            error_occurred: "an error occurred".into(),
            image_not_saved: "image file could not be saved".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_catalog_falls_back_to_defaults() {
        let catalog: MessageCatalog =
            serde_json::from_str(r#"{"errorGlareDetected": "Blendung erkannt"}"#).unwrap();
        assert_eq!(catalog.error_glare_detected, "Blendung erkannt");
        assert_eq!(catalog.invalid_json_data, "invalid json data");
    }
}
