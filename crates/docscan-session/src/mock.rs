// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recording collaborators for the session tests.
//
// Every mock appends to one shared timeline so tests can assert the relative
// order of engine, presenter, image and shell calls.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use docscan_bridge::{EngineImage, ScaleIn, ScaleOut, ScanEngine, ScanPresenter, ShellBridge};
use docscan_core::error::{DocscanError, Result};
use docscan_core::{Outcome, Size};
use docscan_document::TempImageStore;
use image::{DynamicImage, Rgb, RgbImage};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    EngineInit { license: String, options: Map<String, Value> },
    StartScanning,
    CancelScanning,
    ReleaseCamera,
    Emit { outcome: Outcome, json: String, keep_alive: bool },
    Dismiss,
    ShowProgress,
    DismissProgress,
    ShowMessage(String),
    CancelMessage,
    ScaleIn(ScaleIn),
    ScaleOut(ScaleOut),
    ClearScaleIn,
    Release(&'static str),
}

pub type Timeline = Rc<RefCell<Vec<Call>>>;

pub fn timeline() -> Timeline {
    Rc::new(RefCell::new(Vec::new()))
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct MockEngine {
    calls: Timeline,
    fail_init: bool,
}

impl MockEngine {
    pub fn new(calls: &Timeline) -> Self {
        Self {
            calls: Rc::clone(calls),
            fail_init: false,
        }
    }

    /// Engine whose `init` rejects the license.
    pub fn rejecting(calls: &Timeline) -> Self {
        Self {
            fail_init: true,
            ..Self::new(calls)
        }
    }
}

impl ScanEngine for MockEngine {
    fn init(&mut self, license_key: &str, options: &Map<String, Value>) -> Result<()> {
        self.calls.borrow_mut().push(Call::EngineInit {
            license: license_key.into(),
            options: options.clone(),
        });
        if self.fail_init {
            return Err(DocscanError::Bridge("license rejected".into()));
        }
        Ok(())
    }

    fn start_scanning(&mut self) -> Result<()> {
        self.calls.borrow_mut().push(Call::StartScanning);
        Ok(())
    }

    fn cancel_scanning(&mut self) -> Result<()> {
        self.calls.borrow_mut().push(Call::CancelScanning);
        Ok(())
    }

    fn release_camera_in_background(&mut self) -> Result<()> {
        self.calls.borrow_mut().push(Call::ReleaseCamera);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

pub struct MockShell {
    calls: Timeline,
}

impl MockShell {
    pub fn new(calls: &Timeline) -> Self {
        Self {
            calls: Rc::clone(calls),
        }
    }
}

impl ShellBridge for MockShell {
    fn send_result(&self, outcome: Outcome, json: &str, keep_alive: bool) -> Result<()> {
        self.calls.borrow_mut().push(Call::Emit {
            outcome,
            json: json.into(),
            keep_alive,
        });
        Ok(())
    }

    fn dismiss_surface(&self) -> Result<()> {
        self.calls.borrow_mut().push(Call::Dismiss);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

pub struct MockPresenter {
    calls: Timeline,
}

impl MockPresenter {
    pub fn new(calls: &Timeline) -> Self {
        Self {
            calls: Rc::clone(calls),
        }
    }
}

impl ScanPresenter for MockPresenter {
    fn show_progress(&mut self, _title: &str, _body: &str) {
        self.calls.borrow_mut().push(Call::ShowProgress);
    }

    fn dismiss_progress(&mut self) {
        self.calls.borrow_mut().push(Call::DismissProgress);
    }

    fn show_message(&mut self, text: &str) {
        self.calls.borrow_mut().push(Call::ShowMessage(text.into()));
    }

    fn cancel_message(&mut self) {
        self.calls.borrow_mut().push(Call::CancelMessage);
    }

    fn play_scale_in(&mut self, _preview: &dyn EngineImage, animation: &ScaleIn) {
        self.calls.borrow_mut().push(Call::ScaleIn(animation.clone()));
    }

    fn play_scale_out(&mut self, _result: &dyn EngineImage, animation: &ScaleOut) {
        self.calls.borrow_mut().push(Call::ScaleOut(animation.clone()));
    }

    fn clear_scale_in(&mut self) {
        self.calls.borrow_mut().push(Call::ClearScaleIn);
    }
}

// ---------------------------------------------------------------------------
// Images and stores
// ---------------------------------------------------------------------------

/// Solid grey bitmap that records its release.
pub struct MockImage {
    name: &'static str,
    size: Size,
    calls: Timeline,
    readable: bool,
    pub releases: usize,
}

impl MockImage {
    pub fn new(name: &'static str, size: Size, calls: &Timeline) -> Self {
        Self {
            name,
            size,
            calls: Rc::clone(calls),
            readable: true,
            releases: 0,
        }
    }

    /// Image whose pixel buffer can no longer be copied out.
    pub fn unreadable(name: &'static str, size: Size, calls: &Timeline) -> Self {
        Self {
            readable: false,
            ..Self::new(name, size, calls)
        }
    }
}

impl EngineImage for MockImage {
    fn size(&self) -> Size {
        self.size
    }

    fn to_image(&self) -> Result<DynamicImage> {
        if !self.readable {
            return Err(DocscanError::ImageError("bitmap already recycled".into()));
        }
        let pixels = RgbImage::from_pixel(self.size.width, self.size.height, Rgb([128, 128, 128]));
        Ok(DynamicImage::ImageRgb8(pixels))
    }

    fn release(&mut self) {
        self.releases += 1;
        self.calls.borrow_mut().push(Call::Release(self.name));
    }
}

/// Store whose disk is always full.
pub struct FullDiskStore;

impl TempImageStore for FullDiskStore {
    fn allocate(&mut self) -> Result<PathBuf> {
        Err(DocscanError::Io(std::io::Error::other("no space left on device")))
    }
}
