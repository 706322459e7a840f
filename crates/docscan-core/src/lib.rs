// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan: Core types, configuration and error classification shared by the
// scan session crates.

pub mod classify;
pub mod config;
pub mod error;
pub mod messages;
pub mod types;

pub use config::{SessionSettings, ViewConfig};
pub use error::{DocscanError, FatalError};
pub use messages::MessageCatalog;
pub use types::*;
