// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result sink: the session's only way back into the shell.
//
// Emissions are synchronous, so the shell sees them in call order. A terminal
// emission closes the sink and dismisses the scan surface; anything emitted
// afterwards is refused.

use docscan_bridge::ShellBridge;
use docscan_core::error::{DocscanError, Result};
use docscan_core::ShellPayload;
use tracing::{debug, info, warn};

pub struct ResultSink {
    shell: Box<dyn ShellBridge>,
    closed: bool,
    emitted: usize,
}

impl ResultSink {
    pub fn new(shell: Box<dyn ShellBridge>) -> Self {
        Self {
            shell,
            closed: false,
            emitted: 0,
        }
    }

    /// Send `payload` to the shell. With `terminal` the sink closes and the
    /// surface is dismissed, even if delivery itself fails.
    pub fn emit(&mut self, payload: &ShellPayload, terminal: bool) -> Result<()> {
        if self.closed {
            warn!(terminal, "emission after the session closed, dropped");
            return Err(DocscanError::SessionClosed);
        }

        let json = payload.to_json()?;
        if terminal {
            self.closed = true;
        }

        let sent = self.shell.send_result(payload.outcome(), &json, !terminal);
        self.emitted += 1;
        debug!(terminal, outcome = ?payload.outcome(), "payload emitted");

        if terminal {
            info!("terminal result emitted, dismissing scan surface");
            if let Err(err) = self.shell.dismiss_surface() {
                warn!(error = %err, "scan surface could not be dismissed");
            }
        }
        sent
    }

    /// Close without emitting. Used when the user cancels.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of payloads handed to the shell so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}
