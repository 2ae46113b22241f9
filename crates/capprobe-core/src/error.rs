// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Capprobe.

use thiserror::Error;

/// Top-level error type for all Capprobe operations.
#[derive(Debug, Error)]
pub enum CapprobeError {
    // -- Bridge transport --
    #[error("no host bridge available")]
    NoTransport,

    #[error("transport send failed: {0}")]
    Transport(String),

    #[error("command encoding failed: {0}")]
    Encode(String),

    // -- Config / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CapprobeError>;
