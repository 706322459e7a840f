// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Presentation adapter: turns session decisions into presenter calls.
//
// Owns the bits of UI state the session must keep consistent: whether the
// progress indicator is up (shows and dismissals stay balanced), whether a
// transient message is visible, the frame the last scale-in started from,
// and the preview-failure hint throttle. Geometry is computed here as plain
// functions so it can be checked without a presenter.

use std::time::{Duration, Instant};

use docscan_bridge::{EngineImage, ScaleIn, ScaleOut, ScanPresenter};
use docscan_core::{MessageCatalog, Outline, Point, Rect, SessionSettings, Size};
use tracing::debug;

/// Opacity the preview crop fades in from.
const SCALE_IN_ALPHA_FROM: f32 = 0.1;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Frame the preview crop is laid out in: the outline's bounding box, or the
/// whole surface when there is no usable outline.
pub fn overlay_frame(outline: Option<&Outline>, surface: Size) -> Rect {
    outline
        .map(Outline::bounding_box)
        .filter(Rect::has_area)
        .unwrap_or_else(|| Rect::from_size(surface))
}

/// Scale-in from `frame` until the crop covers the surface on both axes.
pub fn scale_in(frame: Rect, surface: Size, duration: Duration) -> ScaleIn {
    let scale = if frame.has_area() && !surface.is_empty() {
        (surface.width as f32 / frame.width()).max(surface.height as f32 / frame.height())
    } else {
        1.0
    };

    ScaleIn {
        frame,
        scale,
        pivot: frame.center(),
        alpha_from: SCALE_IN_ALPHA_FROM,
        alpha_to: 1.0,
        duration,
    }
}

/// Scale-out from `frame` down to a thumbnail `thumbnail.width` wide that
/// keeps the result's aspect ratio, pivoting on the frame's bottom-right.
pub fn scale_out(frame: Rect, result: Size, thumbnail: Size, duration: Duration) -> ScaleOut {
    let target_width = thumbnail.width as f32;
    let target_height = if result.width > 0 {
        result.height as f32 * (target_width / result.width as f32)
    } else {
        thumbnail.height as f32
    };

    let ratio = |target: f32, extent: f32| if extent > 0.0 { target / extent } else { 1.0 };

    ScaleOut {
        frame,
        scale_x: ratio(target_width, frame.width()),
        scale_y: ratio(target_height, frame.height()),
        pivot: Point::new(frame.right, frame.bottom),
        alpha_from: 1.0,
        alpha_to: 0.0,
        duration,
        thumbnail,
    }
}

// ---------------------------------------------------------------------------
// Preview hint throttle
// ---------------------------------------------------------------------------

/// Decides when a run of preview failures deserves a hint.
///
/// A streak starts at the first failure after a reset. The hint fires once,
/// when the streak has lasted `after`, and stays quiet until the next reset.
#[derive(Debug, Clone)]
pub struct PreviewHint {
    after: Duration,
    streak_started: Option<Instant>,
    shown: bool,
}

impl PreviewHint {
    pub fn new(after: Duration) -> Self {
        Self {
            after,
            streak_started: None,
            shown: false,
        }
    }

    /// Record a failure at `now`; true when the hint should be shown.
    pub fn record_failure(&mut self, now: Instant) -> bool {
        let started = *self.streak_started.get_or_insert(now);
        if self.shown || now.saturating_duration_since(started) < self.after {
            return false;
        }
        self.shown = true;
        true
    }

    pub fn reset(&mut self) {
        self.streak_started = None;
        self.shown = false;
    }
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

pub struct PresentationAdapter {
    presenter: Box<dyn ScanPresenter>,
    messages: MessageCatalog,
    animation: Duration,
    thumbnail: Size,
    surface: Size,
    progress_visible: bool,
    message_visible: bool,
    scale_in_frame: Option<Rect>,
    hint: Option<PreviewHint>,
}

impl PresentationAdapter {
    pub fn new(presenter: Box<dyn ScanPresenter>, settings: &SessionSettings) -> Self {
        Self {
            presenter,
            messages: settings.messages.clone(),
            animation: Duration::from_millis(settings.animation_millis),
            thumbnail: Size::new(settings.thumbnail_width, settings.thumbnail_height),
            surface: Size::default(),
            progress_visible: false,
            message_visible: false,
            scale_in_frame: None,
            hint: settings
                .preview_hint_after_millis
                .map(|millis| PreviewHint::new(Duration::from_millis(millis))),
        }
    }

    /// Size of the camera preview surface, known once the camera is open.
    pub fn set_surface(&mut self, surface: Size) {
        self.surface = surface;
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn progress_visible(&self) -> bool {
        self.progress_visible
    }

    /// Show the processing indicator unless it is already up.
    pub fn show_progress(&mut self) {
        if self.progress_visible {
            return;
        }
        self.presenter
            .show_progress(&self.messages.processing_title, &self.messages.processing_body);
        self.progress_visible = true;
    }

    /// Dismiss the processing indicator if it is up.
    pub fn dismiss_progress(&mut self) {
        if !self.progress_visible {
            return;
        }
        self.presenter.dismiss_progress();
        self.progress_visible = false;
    }

    /// Show a transient message; a newer one replaces the one on screen.
    pub fn show_message(&mut self, text: &str) {
        self.presenter.show_message(text);
        self.message_visible = true;
    }

    /// Hide the transient message, if any.
    pub fn suppress_message(&mut self) {
        if !self.message_visible {
            return;
        }
        self.presenter.cancel_message();
        self.message_visible = false;
    }

    /// Play the preview scale-in, framed on `outline` when there is one.
    pub fn scale_in(&mut self, preview: &dyn EngineImage, outline: Option<&Outline>) {
        let frame = overlay_frame(outline, self.surface);
        let animation = scale_in(frame, self.surface, self.animation);
        debug!(scale = animation.scale, "playing scale-in");
        self.presenter.play_scale_in(preview, &animation);
        self.scale_in_frame = Some(frame);
    }

    /// Play the result scale-out from wherever the last scale-in started.
    pub fn scale_out(&mut self, result: &dyn EngineImage, outline: Option<&Outline>) {
        let frame = self
            .scale_in_frame
            .take()
            .unwrap_or_else(|| overlay_frame(outline, self.surface));
        let animation = scale_out(frame, result.size(), self.thumbnail, self.animation);
        debug!(
            scale_x = animation.scale_x,
            scale_y = animation.scale_y,
            "playing scale-out"
        );
        self.presenter.play_scale_out(result, &animation);
    }

    /// Stop and hide the scale-in overlay.
    pub fn clear_scale_in(&mut self) {
        self.scale_in_frame = None;
        self.presenter.clear_scale_in();
    }

    /// Note a preview failure at `now`; may surface the throttled hint.
    pub fn preview_failed(&mut self, now: Instant) -> bool {
        let Some(hint) = self.hint.as_mut() else {
            return false;
        };
        if !hint.record_failure(now) {
            return false;
        }
        let text = self.messages.preview_hint.clone();
        self.show_message(&text);
        true
    }

    /// End the current failure streak.
    pub fn reset_preview_hint(&mut self) {
        if let Some(hint) = self.hint.as_mut() {
            hint.reset();
        }
    }
}
