// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-bridge: Native platform bridge abstractions.
//
// Defines the traits the scan session uses to reach the vision engine, the
// shell's result channel and the UI toolkit, plus per-platform
// implementations. Android goes through JNI; every other target gets a stub
// so the session core builds and tests on desktop and CI.

pub mod logging;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

pub use logging::init_logging;
pub use traits::*;
