// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Maps engine failures to user-visible text and to what the session does next.
//
// Engine processing failures are always recoverable: the engine re-arms the
// preview on its own and the user only sees a transient message. Fatal errors
// end the session and their text goes back to the shell instead.

use crate::error::FatalError;
use crate::messages::MessageCatalog;
use crate::types::EngineError;

/// What the session does after a processing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep the session alive; the engine re-arms the preview.
    Retry,
}

/// A failure rendered for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Transient message text.
    pub message: String,
    pub disposition: Disposition,
}

/// Classify a full-frame processing failure.
pub fn classify(kind: EngineError, messages: &MessageCatalog) -> Classification {
    let suffix = match kind {
        EngineError::NotSharp => &messages.error_not_sharp,
        EngineError::SkewTooHigh => &messages.error_skew_too_high,
        EngineError::OutlineNotFound => &messages.error_outline_not_found,
        EngineError::GlareDetected => &messages.error_glare_detected,
        EngineError::TooDark => &messages.error_too_dark,
        EngineError::Unknown => &messages.error_unknown,
    };

    Classification {
        message: format!("{}{}", messages.picture_error, suffix),
        disposition: Disposition::Retry,
    }
}

/// Compose the error string the shell receives when the session dies.
pub fn classify_fatal(err: &FatalError, messages: &MessageCatalog) -> String {
    match err {
        FatalError::InvalidConfig(detail) => {
            format!("{}\n{}", messages.invalid_json_data, detail)
        }
        FatalError::CaptureFailure(cause)
        | FatalError::CameraFailure(cause)
        | FatalError::EngineFailure(cause) => {
            format!("{}\n{}", messages.error_occurred, cause)
        }
    }
}
