// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capprobe — Host bridge protocol.
//
// The embedding host may expose one of two incompatible messaging surfaces
// (or none at all). This crate detects which one is present, encodes typed
// commands into the wire shape that surface understands, and routes the
// host's asynchronous callbacks into the shared activity log.
//
// Sends are fire-and-forget and responses carry no correlation id, so the
// two directions are independent streams; the activity log is the only
// place they meet.

pub mod bridge;
pub mod command;
pub mod host;
pub mod router;

pub use bridge::NativeBridge;
pub use command::{Command, PhotoParams, PhotoSource};
pub use host::{HostEnv, HostTransport};
pub use router::{BridgeChannel, HostPayload, ResponseRouter, RouterEvent};
