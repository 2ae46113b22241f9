// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Capprobe bridge harness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which messaging surface the host embedding environment exposes.
///
/// Determined exactly once when the bridge initialises and immutable for the
/// rest of the process lifetime. A host that attaches its handle later still
/// gets its payloads routed (the callback channels are registered regardless
/// of mode), but outbound sends stay in the detected mode until restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    /// The newer bridge shape: every command is a JSON envelope.
    PrimaryBridge,
    /// The older bridge shape with a narrower, partly string-based surface.
    LegacyBridge,
    /// No host bridge present. Sends are no-ops that report the absence.
    NoBridge,
}

impl TransportMode {
    /// Human-readable name for status display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PrimaryBridge => "native bridge",
            Self::LegacyBridge => "legacy bridge",
            Self::NoBridge => "no bridge",
        }
    }

    /// Whether a host transport is available at all.
    pub fn is_connected(&self) -> bool {
        !matches!(self, Self::NoBridge)
    }
}

/// Severity/flavour tag on an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Info,
    Success,
    Warning,
    Error,
}

impl LogKind {
    /// Uppercase label for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// A single timestamped record of a command sent or a payload received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub kind: LogKind,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_mode_connectivity() {
        assert!(TransportMode::PrimaryBridge.is_connected());
        assert!(TransportMode::LegacyBridge.is_connected());
        assert!(!TransportMode::NoBridge.is_connected());
    }

    #[test]
    fn log_kind_labels_are_uppercase() {
        for kind in [
            LogKind::Info,
            LogKind::Success,
            LogKind::Warning,
            LogKind::Error,
        ] {
            let label = kind.label();
            assert_eq!(label, label.to_ascii_uppercase());
        }
    }
}
