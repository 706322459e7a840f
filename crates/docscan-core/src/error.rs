// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for docscan.

use thiserror::Error;

/// Top-level error type for all docscan operations.
#[derive(Debug, Error)]
pub enum DocscanError {
    // -- Session errors --
    #[error(transparent)]
    Fatal(#[from] FatalError),

    #[error("session already started")]
    AlreadyStarted,

    #[error("session is closed; no further results are accepted")]
    SessionClosed,

    #[error("outline must have exactly four points, got {0}")]
    InvalidOutline(usize),

    // -- Persistence --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Errors that end a scan session with an error payload to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// The configuration blob was not a usable JSON object.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The full-frame capture failed (commonly memory exhaustion).
    #[error("capture failed: {0}")]
    CaptureFailure(String),

    /// The host could not open the camera.
    #[error("camera failed: {0}")]
    CameraFailure(String),

    /// The engine rejected initialisation or its worker crashed.
    #[error("engine failed: {0}")]
    EngineFailure(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocscanError>;
