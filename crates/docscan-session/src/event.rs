// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inbound engine callbacks as one tagged type.

use docscan_bridge::EngineImage;
use docscan_core::{EngineError, Point};

/// One callback from the vision engine, delivered on the UI thread.
///
/// Images are borrowed for the duration of the dispatch only.
pub enum EngineEvent<'a> {
    /// A document was located in the preview; a full capture follows.
    PreviewSuccess(&'a dyn EngineImage),
    /// The full frame was captured and is about to be processed.
    TakePictureStart,
    /// The full frame could not be captured.
    TakePictureError(String),
    /// Latest document outline in the preview. `angles_valid` is advisory.
    OutlineDetected {
        points: &'a [Point],
        angles_valid: bool,
    },
    /// A preview frame did not yield a usable document. Frequent.
    PreviewFailure(EngineError),
    /// The full frame was rejected; the engine re-arms the preview itself.
    PictureFailure(EngineError),
    /// Final images. Both must be released before dispatch returns.
    Result {
        transformed: &'a mut dyn EngineImage,
        full_frame: &'a mut dyn EngineImage,
    },
    /// The engine's worker thread died.
    WorkerError(String),
}

impl EngineEvent<'_> {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PreviewSuccess(_) => "preview_success",
            Self::TakePictureStart => "take_picture_start",
            Self::TakePictureError(_) => "take_picture_error",
            Self::OutlineDetected { .. } => "outline_detected",
            Self::PreviewFailure(_) => "preview_failure",
            Self::PictureFailure(_) => "picture_failure",
            Self::Result { .. } => "result",
            Self::WorkerError(_) => "worker_error",
        }
    }
}

/// How the controller handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The event was valid in the current state and took effect.
    Applied,
    /// The event was ignored (wrong state, duplicate, or session over).
    Discarded,
    /// Outline stored; the engine should draw its default overlay.
    DrawDefaultOutline,
}
