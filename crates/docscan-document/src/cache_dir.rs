// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware cache directory resolution.

use std::path::PathBuf;

/// Return the base directory for temporary scan results.
///
/// On desktop this follows the XDG convention. On mobile the platform bridge
/// should provide the app's cache directory instead.
pub fn cache_base() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".cache");
    }
    // Last resort
    std::env::temp_dir()
}
