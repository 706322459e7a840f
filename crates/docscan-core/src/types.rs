// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the scan session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DocscanError, Result};

/// Unique identifier for a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle states of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Created, `start` not yet called.
    Idle,
    /// Waiting for the engine to locate a document in the preview.
    Scanning,
    /// Preview succeeded; the full-frame capture is in flight.
    PreviewCaptured,
    /// Full frame captured, being classified and cropped.
    Processing,
    /// At least one result emitted; the session stays open for more.
    Delivered,
    /// Final. Every later callback is discarded.
    Terminated,
}

impl SessionState {
    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Whether a full-frame capture is between preview success and result.
    pub fn is_capturing(&self) -> bool {
        matches!(self, Self::PreviewCaptured | Self::Processing)
    }
}

/// A point in preview-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a surface or image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in preview-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Rectangle covering a whole surface, anchored at the origin.
    pub fn from_size(size: Size) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: size.width as f32,
            bottom: size.height as f32,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Whether the rectangle encloses a positive area.
    pub fn has_area(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }
}

/// Estimated document boundary: four points indexed clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    points: [Point; 4],
}

impl Outline {
    pub const fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Build an outline from the engine's point list, which must hold exactly
    /// four points.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let points: [Point; 4] = points
            .try_into()
            .map_err(|_| DocscanError::InvalidOutline(points.len()))?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    /// Axis-aligned bounds used to frame the capture animation.
    ///
    /// Each edge is taken from the two corners adjacent to it: left from
    /// top-left/bottom-left, top from top-left/top-right, and so on.
    pub fn bounding_box(&self) -> Rect {
        let [p0, p1, p2, p3] = self.points;
        Rect {
            left: p0.x.min(p3.x),
            top: p0.y.min(p1.y),
            right: p1.x.max(p2.x),
            bottom: p2.y.max(p3.y),
        }
    }

    /// Whether the four points form a convex, non-degenerate quadrilateral.
    pub fn is_convex(&self) -> bool {
        let mut sign = 0.0f32;
        for i in 0..4 {
            let a = self.points[i];
            let b = self.points[(i + 1) % 4];
            let c = self.points[(i + 2) % 4];
            let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
            if cross.abs() < f32::EPSILON {
                return false;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }
}

/// Recoverable failure kinds reported by the vision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineError {
    NotSharp,
    SkewTooHigh,
    OutlineNotFound,
    GlareDetected,
    TooDark,
    /// Anything the engine reports that this build does not recognise.
    Unknown,
}

impl EngineError {
    /// Map an engine error code to a kind. Unrecognised codes become
    /// `Unknown` so newer engines keep working.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "DOCUMENT_NOT_SHARP" | "NOT_SHARP" => Self::NotSharp,
            "DOCUMENT_SKEW_TOO_HIGH" | "SKEW_TOO_HIGH" => Self::SkewTooHigh,
            "DOCUMENT_OUTLINE_NOT_FOUND" | "OUTLINE_NOT_FOUND" => Self::OutlineNotFound,
            "GLARE_DETECTED" => Self::GlareDetected,
            "IMAGE_TOO_DARK" | "TOO_DARK" => Self::TooDark,
            _ => Self::Unknown,
        }
    }

    /// Canonical engine code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotSharp => "DOCUMENT_NOT_SHARP",
            Self::SkewTooHigh => "DOCUMENT_SKEW_TOO_HIGH",
            Self::OutlineNotFound => "DOCUMENT_OUTLINE_NOT_FOUND",
            Self::GlareDetected => "GLARE_DETECTED",
            Self::TooDark => "IMAGE_TOO_DARK",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Successful capture result delivered to the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    /// Absolute path of the JPEG written for this capture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Set when the image could not be persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultPayload {
    pub fn with_image(path: impl Into<String>) -> Self {
        Self {
            image_path: Some(path.into()),
            error: None,
        }
    }

    pub fn persistence_failed(reason: impl Into<String>) -> Self {
        Self {
            image_path: None,
            error: Some(reason.into()),
        }
    }
}

/// Whether the shell should treat an emission as success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Ok,
    Error,
}

/// Everything the session can hand back to the embedding shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShellPayload {
    Result(ResultPayload),
    Error {
        #[serde(rename = "error")]
        message: String,
    },
}

impl ShellPayload {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Result(payload) if payload.error.is_none() => Outcome::Ok,
            Self::Result(_) | Self::Error { .. } => Outcome::Error,
        }
    }

    /// Serialize to the JSON object the shell receives.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
