// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-session: The scan screen's state machine.
//
// Sits between a native vision engine and a web-app shell: consumes engine
// callbacks, drives the presenter, persists results through the temp image
// store and reports exactly one outcome per capture back to the shell.

pub mod controller;
pub mod event;
pub mod presentation;
pub mod sink;

#[cfg(test)]
mod mock;

pub use controller::{Collaborators, SessionController};
pub use event::{Dispatch, EngineEvent};
pub use presentation::PresentationAdapter;
pub use sink::ResultSink;
