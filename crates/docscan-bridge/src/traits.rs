// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the scan screen's collaborators.
//
// The session core drives these and never implements them for real: the
// vision engine, the shell's result channel and the UI toolkit all live on
// the native side. Each platform module supplies implementations.

use std::time::Duration;

use docscan_core::error::Result;
use docscan_core::{Outcome, Point, Rect, Size};
use image::DynamicImage;
use serde_json::{Map, Value};

/// Control surface of the native vision engine and its camera.
pub trait ScanEngine {
    /// Hand the license key and the engine's share of the view config to
    /// the engine. Called once, before any scanning.
    fn init(&mut self, license_key: &str, options: &Map<String, Value>) -> Result<()>;

    /// Start (or restart) preview scanning.
    fn start_scanning(&mut self) -> Result<()>;

    /// Stop preview scanning. The engine sends no callbacks once it has
    /// acknowledged the stop.
    fn cancel_scanning(&mut self) -> Result<()>;

    /// Release the camera without blocking the caller.
    fn release_camera_in_background(&mut self) -> Result<()>;
}

/// A bitmap owned by the engine and reference-counted on its side.
///
/// Result images are lent to the session for one callback and must be
/// released exactly once before the callback returns.
pub trait EngineImage {
    /// Pixel dimensions.
    fn size(&self) -> Size;

    /// Copy the pixels out of the engine's buffer.
    fn to_image(&self) -> Result<DynamicImage>;

    /// Drop the session's reference to the engine buffer.
    fn release(&mut self);
}

/// One-shot result channel into the embedding web shell.
pub trait ShellBridge {
    /// Deliver a JSON payload. With `keep_alive` the shell keeps the
    /// callback registered for further results.
    fn send_result(&self, outcome: Outcome, json: &str, keep_alive: bool) -> Result<()>;

    /// Close the native scan surface and return to the shell.
    fn dismiss_surface(&self) -> Result<()>;
}

/// UI toolkit side of the scan screen: dialogs, toasts and the overlay image
/// views. Implementations only render; all decisions are made upstream.
pub trait ScanPresenter {
    /// Show the modal processing indicator.
    fn show_progress(&mut self, title: &str, body: &str);

    /// Hide the modal processing indicator.
    fn dismiss_progress(&mut self);

    /// Show a transient message, replacing any message already on screen.
    fn show_message(&mut self, text: &str);

    /// Hide the transient message currently on screen.
    fn cancel_message(&mut self);

    /// Animate the preview crop from the document outline towards the full
    /// preview surface.
    fn play_scale_in(&mut self, preview: &dyn EngineImage, animation: &ScaleIn);

    /// Animate the final image shrinking into the result thumbnail.
    fn play_scale_out(&mut self, result: &dyn EngineImage, animation: &ScaleOut);

    /// Stop the scale-in animation and hide its image view.
    fn clear_scale_in(&mut self);
}

/// Camera lifecycle hooks the host surface forwards to the session.
pub trait CameraOpenListener {
    /// The camera is open and its preview surface has the given size.
    fn on_camera_opened(&mut self, preview: Size);

    /// The camera could not be opened.
    fn on_camera_error(&mut self, cause: &str);
}

// ---------------------------------------------------------------------------
// Animation parameters
// ---------------------------------------------------------------------------

/// Parameters for the preview scale-in animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleIn {
    /// Where the preview crop is laid out before scaling.
    pub frame: Rect,
    /// Uniform scale factor reached at the end of the animation.
    pub scale: f32,
    /// Scale pivot, in surface coordinates.
    pub pivot: Point,
    pub alpha_from: f32,
    pub alpha_to: f32,
    pub duration: Duration,
}

/// Parameters for the result scale-out animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOut {
    /// Frame the animation starts from (the last scale-in frame).
    pub frame: Rect,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Scale pivot, in surface coordinates.
    pub pivot: Point,
    pub alpha_from: f32,
    pub alpha_to: f32,
    pub duration: Duration,
    /// Size of the thumbnail the result settles into.
    pub thumbnail: Size,
}
