// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capprobe — Core types, errors, and the activity log shared across all crates.

pub mod config;
pub mod error;
pub mod log;
pub mod types;

pub use config::AppConfig;
pub use error::CapprobeError;
pub use log::ActivityLog;
pub use types::*;
