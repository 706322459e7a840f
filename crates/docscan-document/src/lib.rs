// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-document: Where scan results land on disk.
//
// Resolves the cache base directory, hands out unique per-session file paths,
// and encodes engine bitmaps as JPEG. No image processing happens here; the
// engine has already cropped and corrected the picture.

pub mod cache_dir;
pub mod jpeg;
pub mod store;

pub use jpeg::{encode_jpeg, write_jpeg};
pub use store::{CacheDirStore, TempImageStore};
