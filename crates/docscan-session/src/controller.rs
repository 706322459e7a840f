// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan session controller.
//
// One controller per scan screen. The host forwards the screen lifecycle
// (`start`, `on_resume`, `on_pause`, `cancel`), the camera hooks and every
// engine callback on the UI thread; the controller decides what the user sees
// and what the shell receives.
//
// State machine:
//
//   Idle --start--> Scanning --previewSuccess--> PreviewCaptured
//   PreviewCaptured --takePictureStart--> Processing
//   PreviewCaptured | Processing --pictureFailure--> Scanning
//   PreviewCaptured | Processing --result--> Delivered (cancelOnResult off)
//                                        \-> Terminated (cancelOnResult on)
//   Delivered --previewSuccess--> PreviewCaptured
//   any --fatal error | cancel--> Terminated
//
// Terminated is absorbing: later callbacks are discarded, but result images
// are still released.

use std::path::{Path, PathBuf};
use std::time::Instant;

use docscan_bridge::{CameraOpenListener, EngineImage, ScanEngine, ScanPresenter, ShellBridge};
use docscan_core::classify::{Disposition, classify, classify_fatal};
use docscan_core::error::{DocscanError, FatalError, Result};
use docscan_core::{
    EngineError, Outline, Point, ResultPayload, SessionId, SessionSettings, SessionState,
    ShellPayload, Size, ViewConfig,
};
use docscan_document::{CacheDirStore, TempImageStore, write_jpeg};
use tracing::{debug, error, info, instrument, warn};

use crate::event::{Dispatch, EngineEvent};
use crate::presentation::PresentationAdapter;
use crate::sink::ResultSink;

/// The session's collaborators, supplied by the host.
pub struct Collaborators {
    pub engine: Box<dyn ScanEngine>,
    pub shell: Box<dyn ShellBridge>,
    pub presenter: Box<dyn ScanPresenter>,
    pub store: Box<dyn TempImageStore>,
}

/// What the controller last asked of the engine, so stops are sent once.
#[derive(Debug, Default)]
struct EngineLink {
    scanning: bool,
    camera_held: bool,
}

pub struct SessionController {
    id: SessionId,
    state: SessionState,
    config: ViewConfig,
    settings: SessionSettings,
    engine: Box<dyn ScanEngine>,
    link: EngineLink,
    store: Box<dyn TempImageStore>,
    sink: ResultSink,
    presentation: PresentationAdapter,
    last_outline: Option<Outline>,
    delivered: usize,
}

impl SessionController {
    pub fn new(id: SessionId, parts: Collaborators, settings: SessionSettings) -> Self {
        let presentation = PresentationAdapter::new(parts.presenter, &settings);
        Self {
            id,
            state: SessionState::Idle,
            config: ViewConfig::default(),
            settings,
            engine: parts.engine,
            link: EngineLink::default(),
            store: parts.store,
            sink: ResultSink::new(parts.shell),
            presentation,
            last_outline: None,
            delivered: 0,
        }
    }

    /// Build a session whose results land in
    /// `<cache_base>/<cache namespace>/<session id>/`.
    pub fn open(
        engine: Box<dyn ScanEngine>,
        shell: Box<dyn ShellBridge>,
        presenter: Box<dyn ScanPresenter>,
        cache_base: &Path,
        settings: SessionSettings,
    ) -> Result<Self> {
        let id = SessionId::new();
        let store = CacheDirStore::for_session(cache_base, &settings.cache_namespace, id)?;
        let parts = Collaborators {
            engine,
            shell,
            presenter,
            store: Box::new(store),
        };
        Ok(Self::new(id, parts, settings))
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Most recent convex outline reported by the engine.
    pub fn last_outline(&self) -> Option<&Outline> {
        self.last_outline.as_ref()
    }

    /// Results emitted with the session kept open.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    // -- Lifecycle -----------------------------------------------------------

    /// Parse the view config and initialise the engine.
    ///
    /// Scanning itself starts on the first `on_resume`. On failure the error
    /// has already been reported to the shell and the session is over.
    #[instrument(skip(self, config_text, license_key), fields(session = %self.id))]
    pub fn start(&mut self, config_text: &str, license_key: &str) -> Result<()> {
        if self.state != SessionState::Idle {
            warn!(state = ?self.state, "start called twice");
            return Err(DocscanError::AlreadyStarted);
        }

        let config = match ViewConfig::parse(config_text) {
            Ok(config) => config,
            Err(fatal) => return Err(self.fail(fatal)),
        };
        debug!(
            cancel_on_result = config.cancel_on_result,
            engine_options = config.engine_options.len(),
            "view config parsed"
        );

        if let Err(err) = self.engine.init(license_key, &config.engine_options) {
            return Err(self.fail(FatalError::EngineFailure(err.to_string())));
        }

        self.config = config;
        self.state = SessionState::Scanning;
        info!("scan session started");
        Ok(())
    }

    /// The screen became visible: (re)start scanning.
    ///
    /// A capture that was in flight when the screen went away is abandoned;
    /// the engine restarts from the preview.
    #[instrument(skip(self), fields(session = %self.id, state = ?self.state))]
    pub fn on_resume(&mut self) {
        match self.state {
            SessionState::Idle | SessionState::Terminated => {
                debug!("resume ignored");
                return;
            }
            SessionState::PreviewCaptured | SessionState::Processing => {
                info!("abandoning capture interrupted by pause");
                self.presentation.dismiss_progress();
                self.presentation.clear_scale_in();
                self.state = SessionState::Scanning;
            }
            SessionState::Scanning | SessionState::Delivered => {}
        }

        if self.link.scanning {
            return;
        }
        match self.engine.start_scanning() {
            Ok(()) => {
                self.link.scanning = true;
                self.link.camera_held = true;
                debug!("scanning started");
            }
            Err(err) => {
                self.fail(FatalError::EngineFailure(err.to_string()));
            }
        }
    }

    /// The screen went to the background: stop scanning and free the camera.
    /// The session state is kept for the next resume.
    #[instrument(skip(self), fields(session = %self.id, state = ?self.state))]
    pub fn on_pause(&mut self) {
        self.halt_engine();
        self.presentation.reset_preview_hint();
    }

    /// The user backed out. Nothing is emitted.
    #[instrument(skip(self), fields(session = %self.id, state = ?self.state))]
    pub fn cancel(&mut self) {
        if self.state.is_terminated() {
            return;
        }
        self.presentation.dismiss_progress();
        self.halt_engine();
        self.sink.close();
        self.state = SessionState::Terminated;
        info!("scan session cancelled by user");
    }

    // -- Engine callbacks ----------------------------------------------------

    /// Handle one engine callback.
    #[instrument(level = "debug", skip_all, fields(session = %self.id, state = ?self.state, event = event.name()))]
    pub fn dispatch(&mut self, event: EngineEvent<'_>) -> Dispatch {
        if self.state.is_terminated() {
            if let EngineEvent::Result {
                transformed,
                full_frame,
            } = event
            {
                transformed.release();
                full_frame.release();
            }
            debug!("session terminated, event discarded");
            return Dispatch::Discarded;
        }

        match event {
            EngineEvent::PreviewSuccess(preview) => self.on_preview_success(preview),
            EngineEvent::TakePictureStart => self.on_take_picture_start(),
            EngineEvent::TakePictureError(cause) => self.on_take_picture_error(cause),
            EngineEvent::OutlineDetected {
                points,
                angles_valid,
            } => self.on_outline(points, angles_valid),
            EngineEvent::PreviewFailure(kind) => self.on_preview_failure(kind),
            EngineEvent::PictureFailure(kind) => self.on_picture_failure(kind),
            EngineEvent::Result {
                transformed,
                full_frame,
            } => self.on_result(transformed, full_frame),
            EngineEvent::WorkerError(cause) => {
                self.fail(FatalError::EngineFailure(cause));
                Dispatch::Applied
            }
        }
    }

    fn on_preview_success(&mut self, preview: &dyn EngineImage) -> Dispatch {
        if !matches!(self.state, SessionState::Scanning | SessionState::Delivered) {
            warn!(state = ?self.state, "preview success outside scanning, discarded");
            return Dispatch::Discarded;
        }

        self.presentation.reset_preview_hint();
        self.presentation.scale_in(preview, self.last_outline.as_ref());
        let text = self.settings.messages.preview_success.clone();
        self.presentation.show_message(&text);
        self.state = SessionState::PreviewCaptured;
        debug!("preview captured");
        Dispatch::Applied
    }

    fn on_take_picture_start(&mut self) -> Dispatch {
        match self.state {
            SessionState::PreviewCaptured => {
                self.presentation.show_progress();
                self.presentation.suppress_message();
                self.state = SessionState::Processing;
                Dispatch::Applied
            }
            SessionState::Processing => {
                debug!("duplicate take-picture start");
                Dispatch::Discarded
            }
            state => {
                warn!(?state, "take-picture start without a preview, discarded");
                Dispatch::Discarded
            }
        }
    }

    fn on_take_picture_error(&mut self, cause: String) -> Dispatch {
        if !self.state.is_capturing() {
            warn!(state = ?self.state, %cause, "capture error outside a capture, discarded");
            return Dispatch::Discarded;
        }
        self.fail(FatalError::CaptureFailure(cause));
        Dispatch::Applied
    }

    fn on_outline(&mut self, points: &[Point], angles_valid: bool) -> Dispatch {
        match Outline::from_points(points) {
            Ok(outline) if outline.is_convex() => self.last_outline = Some(outline),
            Ok(_) => debug!(angles_valid, "non-convex outline ignored"),
            Err(err) => debug!(error = %err, "malformed outline ignored"),
        }
        Dispatch::DrawDefaultOutline
    }

    fn on_preview_failure(&mut self, kind: EngineError) -> Dispatch {
        debug!(%kind, "preview failure");
        if self.presentation.preview_failed(Instant::now()) {
            debug!("preview hint shown");
        }
        Dispatch::Applied
    }

    fn on_picture_failure(&mut self, kind: EngineError) -> Dispatch {
        if !self.state.is_capturing() {
            warn!(state = ?self.state, %kind, "picture failure outside a capture, discarded");
            return Dispatch::Discarded;
        }

        let classification = classify(kind, &self.settings.messages);
        info!(%kind, "picture rejected, waiting for the next preview");
        self.presentation.show_message(&classification.message);
        self.presentation.dismiss_progress();
        self.presentation.clear_scale_in();
        match classification.disposition {
            Disposition::Retry => self.state = SessionState::Scanning,
        }
        Dispatch::Applied
    }

    fn on_result(
        &mut self,
        transformed: &mut dyn EngineImage,
        full_frame: &mut dyn EngineImage,
    ) -> Dispatch {
        if !self.state.is_capturing() {
            warn!(state = ?self.state, "result outside a capture, images released");
            transformed.release();
            full_frame.release();
            return Dispatch::Discarded;
        }

        self.presentation.dismiss_progress();
        let text = self.settings.messages.picture_success.clone();
        self.presentation.show_message(&text);
        self.presentation.scale_out(&*transformed, self.last_outline.as_ref());

        let payload = self.persist(&*transformed);
        transformed.release();
        full_frame.release();

        let terminal = self.config.cancel_on_result;
        if let Err(err) = self.sink.emit(&ShellPayload::Result(payload), terminal) {
            error!(error = %err, "result could not be delivered to the shell");
        }

        if terminal {
            self.halt_engine();
            self.state = SessionState::Terminated;
            info!("result delivered, session closed");
        } else {
            self.delivered += 1;
            self.state = SessionState::Delivered;
            info!(delivered = self.delivered, "result delivered, session kept open");
        }
        Dispatch::Applied
    }

    // -- Internals -----------------------------------------------------------

    /// Encode the result into a fresh temp file. A failure degrades to a
    /// payload without an image path.
    fn persist(&mut self, image: &dyn EngineImage) -> ResultPayload {
        match self.write_result(image) {
            Ok(path) => ResultPayload::with_image(path.to_string_lossy().into_owned()),
            Err(err) => {
                warn!(error = %err, "result image could not be saved");
                ResultPayload::persistence_failed(self.settings.messages.image_not_saved.clone())
            }
        }
    }

    fn write_result(&mut self, image: &dyn EngineImage) -> Result<PathBuf> {
        let path = self.store.allocate()?;
        let written = image
            .to_image()
            .and_then(|pixels| write_jpeg(&pixels, &path, self.settings.jpeg_quality));
        if let Err(err) = written {
            if let Err(cleanup) = std::fs::remove_file(&path) {
                warn!(path = %path.display(), error = %cleanup, "partial result file left behind");
            }
            return Err(err);
        }
        Ok(path)
    }

    /// Report a fatal error to the shell and end the session.
    fn fail(&mut self, fatal: FatalError) -> DocscanError {
        error!(error = %fatal, "scan session failed");
        self.presentation.dismiss_progress();
        self.halt_engine();

        let message = classify_fatal(&fatal, &self.settings.messages);
        if let Err(err) = self.sink.emit(&ShellPayload::error(message), true) {
            error!(error = %err, "fatal error could not be delivered to the shell");
        }
        self.state = SessionState::Terminated;
        DocscanError::Fatal(fatal)
    }

    /// Stop scanning and free the camera, each at most once.
    fn halt_engine(&mut self) {
        if std::mem::take(&mut self.link.scanning) {
            if let Err(err) = self.engine.cancel_scanning() {
                warn!(error = %err, "engine refused to stop scanning");
            }
        }
        if std::mem::take(&mut self.link.camera_held) {
            if let Err(err) = self.engine.release_camera_in_background() {
                warn!(error = %err, "camera release failed");
            }
        }
    }
}

impl CameraOpenListener for SessionController {
    fn on_camera_opened(&mut self, preview: Size) {
        debug!(width = preview.width, height = preview.height, "camera opened");
        self.presentation.set_surface(preview);
    }

    fn on_camera_error(&mut self, cause: &str) {
        if self.state.is_terminated() {
            return;
        }
        self.fail(FatalError::CameraFailure(cause.into()));
    }
}
