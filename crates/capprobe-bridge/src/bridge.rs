// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The bridge façade: one-shot detection, outbound sends, inbound wiring.
//
// Every send attempt produces exactly one log entry, whether or not the
// host ever answers. No failure escapes to the caller; the probe UI must
// stay responsive no matter what the transport does.

use std::sync::Arc;

use tracing::{debug, warn};

use capprobe_core::error::{CapprobeError, Result};
use capprobe_core::log::ActivityLog;
use capprobe_core::types::{LogKind, TransportMode};

use crate::command::Command;
use crate::host::{self, HostEnv, HostTransport};
use crate::router::{BridgeChannel, ResponseRouter};

/// The probe's end of the host bridge.
///
/// Holds the mode detected at init (terminal: it never changes without a
/// full restart), the active transport handle, the inbound router, and the
/// shared activity log.
pub struct NativeBridge {
    mode: TransportMode,
    transport: Option<Arc<dyn HostTransport>>,
    router: Arc<ResponseRouter>,
    log: Arc<ActivityLog>,
}

impl NativeBridge {
    /// Inspect the environment once and wire up the inbound channels.
    ///
    /// The log-appending subscribers are installed on both channels
    /// regardless of the detected mode: a host may attach its handle after
    /// this check runs, and its payloads must not be lost to an unwired
    /// router. One status entry records the detection outcome.
    pub fn init(env: &HostEnv, log: Arc<ActivityLog>) -> Self {
        let (mode, transport) = host::detect(env);
        let router = Arc::new(ResponseRouter::new());

        for channel in [BridgeChannel::Response, BridgeChannel::Data] {
            let log = Arc::clone(&log);
            router.subscribe(channel, move |event| {
                let tag = match event.channel {
                    BridgeChannel::Response => "Native response",
                    BridgeChannel::Data => "Native data",
                };
                // Delivery happened even when the payload was opaque text,
                // so inbound entries are always `Success`.
                log.append(LogKind::Success, format!("{tag}: {}", event.message));
            });
        }

        match mode {
            TransportMode::PrimaryBridge => {
                log.append(LogKind::Success, "Native bridge detected");
            }
            TransportMode::LegacyBridge => {
                log.append(LogKind::Success, "Legacy bridge detected");
            }
            TransportMode::NoBridge => {
                warn!("running without a host bridge");
                log.append(
                    LogKind::Warning,
                    "No native bridge found - running standalone",
                );
            }
        }

        Self {
            mode,
            transport,
            router,
            log,
        }
    }

    /// The transport mode detected at init.
    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// Handle the embedding host holds to deliver inbound payloads.
    pub fn router(&self) -> Arc<ResponseRouter> {
        Arc::clone(&self.router)
    }

    pub fn log(&self) -> Arc<ActivityLog> {
        Arc::clone(&self.log)
    }

    /// Encode and transmit a command, recording the outcome.
    ///
    /// Fire-and-forget: there is no pending state and no retry. Exactly one
    /// entry is appended per attempt, `Info` when the payload was handed to
    /// the transport, `Error` when no transport exists or the
    /// encode/transmit step failed.
    pub fn send(&self, cmd: &Command) {
        match self.dispatch(cmd) {
            Ok(()) => {
                debug!(action = cmd.action(), mode = ?self.mode, "command sent");
                let note = match self.mode {
                    TransportMode::LegacyBridge => {
                        format!("Sent via legacy bridge: {}", cmd.action())
                    }
                    _ => format!("Sent: {}", cmd.action()),
                };
                self.log.append(LogKind::Info, note);
            }
            Err(CapprobeError::NoTransport) => {
                self.log.append(LogKind::Error, "No native bridge available");
            }
            Err(e) => {
                warn!(action = cmd.action(), error = %e, "send failed");
                self.log
                    .append(LogKind::Error, format!("Error sending command: {e}"));
            }
        }
    }

    /// The fallible encode/transmit step, kept separate so `send` stays a
    /// pure consumer of its result.
    fn dispatch(&self, cmd: &Command) -> Result<()> {
        let transport = self
            .transport
            .as_ref()
            .ok_or(CapprobeError::NoTransport)?;
        let payload = cmd.wire_payload(self.mode)?;
        transport.post_message(&payload)
    }
}
