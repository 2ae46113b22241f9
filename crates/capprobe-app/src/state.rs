// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Probe-level state: connection banner and shared log handle.

use std::sync::Arc;

use capprobe_core::types::TransportMode;
use capprobe_core::{ActivityLog, AppConfig};

use crate::services::app_services::AppServices;

/// What the status banner says about the host connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// The primary (JSON-envelope) bridge is attached.
    ConnectedPrimary,
    /// Only the legacy bridge is attached.
    ConnectedLegacy,
    /// No host bridge — sends will be reported as unavailable.
    Standalone,
}

impl ConnectionStatus {
    pub fn banner(&self) -> &'static str {
        match self {
            Self::ConnectedPrimary => "Connected to Native App",
            Self::ConnectedLegacy => "Connected via legacy bridge",
            Self::Standalone => "Running without a host bridge",
        }
    }
}

impl From<TransportMode> for ConnectionStatus {
    fn from(mode: TransportMode) -> Self {
        match mode {
            TransportMode::PrimaryBridge => Self::ConnectedPrimary,
            TransportMode::LegacyBridge => Self::ConnectedLegacy,
            TransportMode::NoBridge => Self::Standalone,
        }
    }
}

/// Shared state for the probe run.
#[derive(Clone)]
pub struct AppState {
    pub status: ConnectionStatus,
    pub log: Arc<ActivityLog>,
    pub config: AppConfig,
}

impl AppState {
    /// Snapshot the backend services into display state.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            status: svc.mode().into(),
            log: svc.log(),
            config: svc.config(),
        }
    }
}
