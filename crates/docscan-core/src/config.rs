// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session configuration: the per-invocation view config handed in by the
// shell, and the host-side settings that shape persistence and feedback.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FatalError, Result};
use crate::messages::MessageCatalog;

/// JSON key controlling whether the first result ends the session.
pub const CANCEL_ON_RESULT_KEY: &str = "cancelOnResult";

/// Parsed view configuration for one scan session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Close the session after the first successful result.
    pub cancel_on_result: bool,
    /// Every other key of the blob, forwarded untouched to the engine.
    pub engine_options: Map<String, Value>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cancel_on_result: true,
            engine_options: Map::new(),
        }
    }
}

impl ViewConfig {
    /// Parse the shell's configuration blob.
    ///
    /// The blob must be a JSON object. `cancelOnResult` defaults to `true`
    /// and must be a boolean when present; unknown keys are kept for the
    /// engine.
    pub fn parse(text: &str) -> std::result::Result<Self, FatalError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| FatalError::InvalidConfig(err.to_string()))?;

        let Value::Object(mut engine_options) = value else {
            return Err(FatalError::InvalidConfig(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        };

        let cancel_on_result = match engine_options.remove(CANCEL_ON_RESULT_KEY) {
            None | Some(Value::Null) => true,
            Some(Value::Bool(flag)) => flag,
            Some(other) => {
                return Err(FatalError::InvalidConfig(format!(
                    "`{CANCEL_ON_RESULT_KEY}` must be a boolean, got {}",
                    json_kind(&other)
                )));
            }
        };

        Ok(Self {
            cancel_on_result,
            engine_options,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Host-side settings for the scan screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionSettings {
    /// JPEG quality for persisted results (1-100).
    pub jpeg_quality: u8,
    /// Subdirectory of the cache base that holds per-session folders.
    pub cache_namespace: String,
    /// Duration of the scale-in and scale-out animations.
    pub animation_millis: u64,
    /// Size of the result thumbnail the scale-out animation lands on.
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    /// Show a hint once preview failures have persisted this long.
    /// `None` keeps preview failures silent.
    pub preview_hint_after_millis: Option<u64>,
    pub messages: MessageCatalog,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            cache_namespace: "docscan".into(),
            animation_millis: 500,
            thumbnail_width: 100,
            thumbnail_height: 160,
            preview_hint_after_millis: Some(4_000),
            messages: MessageCatalog::default(),
        }
    }
}

impl SessionSettings {
    /// Load settings from a JSON document; missing keys take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut settings: Self = serde_json::from_str(text)?;
        settings.jpeg_quality = settings.jpeg_quality.clamp(1, 100);
        Ok(settings)
    }
}
