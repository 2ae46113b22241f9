// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — initialises the bridge against whichever host
// environment this run has (real, simulated, or none) and owns the shared
// activity log and persisted config.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::info;

use capprobe_bridge::{HostEnv, HostTransport, NativeBridge};
use capprobe_core::error::Result;
use capprobe_core::types::TransportMode;
use capprobe_core::{ActivityLog, AppConfig};

use crate::checks;
use crate::host_sim::SimulatedHost;

use super::data_dir;

/// Shared backend services for the probe run.
///
/// All fields are cheaply cloneable (Arc-wrapped) so the struct can be
/// passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    bridge: Arc<NativeBridge>,
    log: Arc<ActivityLog>,
    config: Arc<Mutex<AppConfig>>,
    data_dir: Option<PathBuf>,
}

impl AppServices {
    /// Initialise all services. Call once at startup.
    ///
    /// Loads the persisted config (or defaults), builds the host
    /// environment the config asks for, and runs bridge detection.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        let config = load_config(&dir).unwrap_or_default();
        Ok(Self::with_config(config, Some(dir)))
    }

    /// In-memory services with default config, for when the data directory
    /// is unusable. Nothing is persisted.
    pub fn fallback() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    fn with_config(config: AppConfig, dir: Option<PathBuf>) -> Self {
        let log = Arc::new(ActivityLog::new());

        let (env, host) = if config.simulate_host {
            let host = SimulatedHost::new(
                Duration::from_millis(config.simulate_delay_ms),
                config.simulate_legacy,
            );
            let transport = Arc::clone(&host) as Arc<dyn HostTransport>;
            let env = if config.simulate_legacy {
                HostEnv::with_legacy(transport)
            } else {
                HostEnv::with_primary(transport)
            };
            (env, Some(host))
        } else {
            (HostEnv::none(), None)
        };

        let bridge = Arc::new(NativeBridge::init(&env, Arc::clone(&log)));
        if let Some(host) = host {
            host.attach_router(bridge.router());
        }

        info!(mode = bridge.mode().display_name(), "app services initialised");

        Self {
            bridge,
            log,
            config: Arc::new(Mutex::new(config)),
            data_dir: dir,
        }
    }

    // -- Bridge --------------------------------------------------------------

    pub fn mode(&self) -> TransportMode {
        self.bridge.mode()
    }

    pub fn log(&self) -> Arc<ActivityLog> {
        Arc::clone(&self.log)
    }

    /// Send every configured check through the bridge, in sweep order.
    /// Returns the number of commands sent.
    pub fn run_sweep(&self) -> usize {
        let sweep = checks::full_sweep(&self.config());
        for cmd in &sweep {
            self.bridge.send(cmd);
        }
        sweep.len()
    }

    // -- Config persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Update and persist the config (no-op persist in fallback mode).
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().expect("config lock poisoned") = config.clone();
        match &self.data_dir {
            Some(dir) => persist_config(dir, config),
            None => Ok(()),
        }
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &std::path::Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

fn persist_config(data_dir: &std::path::Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
