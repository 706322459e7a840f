// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Temp image store: unique, writable paths for result JPEGs.
//
// Layout: `<cache base>/<namespace>/<session id>/<uuid>.jpg`. The store never
// deletes anything; whoever consumes an emitted `imagePath` owns the file.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use docscan_core::error::{DocscanError, Result};
use docscan_core::SessionId;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Number of fresh names tried before giving up on a collision.
const MAX_ALLOCATE_ATTEMPTS: usize = 3;

/// Hands out paths for result images.
pub trait TempImageStore {
    /// Reserve a new, empty file and return its absolute path.
    fn allocate(&mut self) -> Result<PathBuf>;
}

/// Store backed by a per-session directory under the cache base.
#[derive(Debug, Clone)]
pub struct CacheDirStore {
    dir: PathBuf,
}

impl CacheDirStore {
    /// Use `dir` as the store root, creating it if needed.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = std::path::absolute(dir.as_ref())?;
        std::fs::create_dir_all(&dir)?;
        info!("temp image store ready");
        Ok(Self { dir })
    }

    /// Store for one session: `<base>/<namespace>/<session id>`.
    pub fn for_session(base: &Path, namespace: &str, session: SessionId) -> Result<Self> {
        Self::open(base.join(namespace).join(session.to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TempImageStore for CacheDirStore {
    fn allocate(&mut self) -> Result<PathBuf> {
        // The OS may have evicted the cache since the store was opened.
        if !self.dir.is_dir() {
            warn!(dir = %self.dir.display(), "cache directory vanished, recreating");
            std::fs::create_dir_all(&self.dir)?;
        }

        for _ in 0..MAX_ALLOCATE_ATTEMPTS {
            let path = self.dir.join(format!("{}.jpg", Uuid::new_v4()));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => {
                    debug!(path = %path.display(), "temp image path allocated");
                    return Ok(path);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(DocscanError::Io(err)),
            }
        }

        Err(DocscanError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            "could not find a free temp image name",
        )))
    }
}
