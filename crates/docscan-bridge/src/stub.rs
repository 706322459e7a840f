// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where the native engine is unavailable.
//
// Engine and shell calls return `PlatformUnavailable`; real implementations
// live in the `android` module. Presenter calls are logged no-ops so a
// headless host can still drive a session.

use docscan_core::error::{DocscanError, Result};
use docscan_core::Outcome;
use serde_json::{Map, Value};

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
#[derive(Debug, Default)]
pub struct StubBridge;

impl ScanEngine for StubBridge {
    fn init(&mut self, _license_key: &str, _options: &Map<String, Value>) -> Result<()> {
        tracing::warn!("ScanEngine::init called on stub bridge");
        Err(DocscanError::PlatformUnavailable)
    }

    fn start_scanning(&mut self) -> Result<()> {
        tracing::warn!("ScanEngine::start_scanning called on stub bridge");
        Err(DocscanError::PlatformUnavailable)
    }

    fn cancel_scanning(&mut self) -> Result<()> {
        Err(DocscanError::PlatformUnavailable)
    }

    fn release_camera_in_background(&mut self) -> Result<()> {
        Err(DocscanError::PlatformUnavailable)
    }
}

impl ShellBridge for StubBridge {
    fn send_result(&self, outcome: Outcome, json: &str, keep_alive: bool) -> Result<()> {
        tracing::warn!(?outcome, keep_alive, json, "ShellBridge::send_result called on stub bridge");
        Err(DocscanError::PlatformUnavailable)
    }

    fn dismiss_surface(&self) -> Result<()> {
        tracing::warn!("ShellBridge::dismiss_surface called on stub bridge");
        Err(DocscanError::PlatformUnavailable)
    }
}

impl ScanPresenter for StubBridge {
    fn show_progress(&mut self, title: &str, _body: &str) {
        tracing::debug!(title, "stub presenter: show progress");
    }

    fn dismiss_progress(&mut self) {
        tracing::debug!("stub presenter: dismiss progress");
    }

    fn show_message(&mut self, text: &str) {
        tracing::debug!(text, "stub presenter: message");
    }

    fn cancel_message(&mut self) {}

    fn play_scale_in(&mut self, _preview: &dyn EngineImage, animation: &ScaleIn) {
        tracing::debug!(scale = animation.scale, "stub presenter: scale in");
    }

    fn play_scale_out(&mut self, _result: &dyn EngineImage, animation: &ScaleOut) {
        tracing::debug!(
            scale_x = animation.scale_x,
            scale_y = animation.scale_y,
            "stub presenter: scale out"
        );
    }

    fn clear_scale_in(&mut self) {}
}
