// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host environment inspection and the transport boundary.
//
// The embedding host leaves at most two markers behind: a primary bridge
// handle and a legacy bridge handle. Classification order is fixed (primary
// wins over legacy) and runs exactly once per bridge lifetime.

use std::sync::Arc;

use tracing::info;

use capprobe_core::error::Result;
use capprobe_core::types::TransportMode;

/// The single-argument send operation both bridge shapes expose.
///
/// Implementations are provided by the embedding host (or a stand-in such
/// as the app crate's simulated host). Sends are fire-and-forget: a
/// successful return means the payload was handed over, not that the host
/// will ever respond.
pub trait HostTransport: Send + Sync {
    /// Hand one wire payload to the host.
    fn post_message(&self, payload: &str) -> Result<()>;

    /// Short transport name for log output.
    fn name(&self) -> &'static str;
}

/// Snapshot of the bridge markers the host environment exposes.
///
/// The probe only reads these handles; it never installs them. Absence of
/// both is a valid state, not a failure.
#[derive(Clone, Default)]
pub struct HostEnv {
    primary: Option<Arc<dyn HostTransport>>,
    legacy: Option<Arc<dyn HostTransport>>,
}

impl HostEnv {
    /// Environment with neither marker present.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_primary(transport: Arc<dyn HostTransport>) -> Self {
        Self {
            primary: Some(transport),
            legacy: None,
        }
    }

    pub fn with_legacy(transport: Arc<dyn HostTransport>) -> Self {
        Self {
            primary: None,
            legacy: Some(transport),
        }
    }

    /// Both markers present. Detection still prefers the primary handle.
    pub fn with_both(primary: Arc<dyn HostTransport>, legacy: Arc<dyn HostTransport>) -> Self {
        Self {
            primary: Some(primary),
            legacy: Some(legacy),
        }
    }
}

/// Classify the environment into exactly one transport mode.
///
/// Returns the mode and the handle sends go through (`None` under
/// `NoBridge`). Deterministic: the same environment always classifies the
/// same way.
pub fn detect(env: &HostEnv) -> (TransportMode, Option<Arc<dyn HostTransport>>) {
    if let Some(primary) = &env.primary {
        info!(transport = primary.name(), "primary bridge detected");
        return (TransportMode::PrimaryBridge, Some(Arc::clone(primary)));
    }
    if let Some(legacy) = &env.legacy {
        info!(transport = legacy.name(), "legacy bridge detected");
        return (TransportMode::LegacyBridge, Some(Arc::clone(legacy)));
    }
    info!("no host bridge detected");
    (TransportMode::NoBridge, None)
}
