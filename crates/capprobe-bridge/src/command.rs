// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The command vocabulary and its wire encodings.
//
// Both bridge shapes accept a single string argument. The primary bridge
// takes a JSON envelope `{"action": ..., "params": {...}}` for every
// command; the legacy bridge takes the same envelope except for the
// location action, which it only understands as the bare token
// "getLocation". That asymmetry is a compatibility shim carried from the
// shipped native hosts, not a general rule.

use serde::Serialize;
use serde_json::{Value, json};

use capprobe_core::error::{CapprobeError, Result};
use capprobe_core::types::TransportMode;

/// Where a captured photo comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSource {
    Camera,
    Gallery,
}

/// Parameters for the capture-photo action.
#[derive(Debug, Clone)]
pub struct PhotoParams {
    /// JPEG quality, 0.0–1.0.
    pub quality: f64,
    pub max_width: u32,
    pub max_height: u32,
    pub source: PhotoSource,
}

/// Every command the probe can send to the host, with its typed parameters.
///
/// The vocabulary is closed: the native hosts dispatch on the action string,
/// so an unknown action is silently dropped on the other side.
#[derive(Debug, Clone)]
pub enum Command {
    GetLocation,
    CapturePhoto(PhotoParams),
    ScanQr,
    ScanBarcode,
    MakeCall { number: String },
    GetCallLogs { days: u32 },
    ShowToast { message: String },
    GetContacts,
    UploadFile { base64: String, filename: String },
    DownloadFile { url: String, filename: String },
    GetDeviceInfo,
    GetNetworkStatus,
    StorageSet { key: String, value: Value },
    StorageGet { key: String },
}

impl Command {
    /// Wire action name, as the native hosts dispatch on it.
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetLocation => "GET_LOCATION",
            Self::CapturePhoto(_) => "CAPTURE_PHOTO",
            Self::ScanQr => "SCAN_QR",
            Self::ScanBarcode => "SCAN_BARCODE",
            Self::MakeCall { .. } => "MAKE_CALL",
            Self::GetCallLogs { .. } => "GET_CALL_LOGS",
            Self::ShowToast { .. } => "SHOW_TOAST",
            Self::GetContacts => "GET_CONTACTS",
            Self::UploadFile { .. } => "UPLOAD_FILE",
            Self::DownloadFile { .. } => "DOWNLOAD_FILE",
            Self::GetDeviceInfo => "GET_DEVICE_INFO",
            Self::GetNetworkStatus => "GET_NETWORK_STATUS",
            Self::StorageSet { .. } => "STORAGE_SET",
            Self::StorageGet { .. } => "STORAGE_GET",
        }
    }

    /// Wire parameter object. Always a JSON object; `{}` for parameterless
    /// actions (the hosts expect the key to be present).
    pub fn params(&self) -> Value {
        match self {
            Self::GetLocation
            | Self::ScanQr
            | Self::ScanBarcode
            | Self::GetContacts
            | Self::GetDeviceInfo
            | Self::GetNetworkStatus => json!({}),
            Self::CapturePhoto(p) => json!({
                "quality": p.quality,
                "maxWidth": p.max_width,
                "maxHeight": p.max_height,
                "source": p.source,
            }),
            Self::MakeCall { number } => json!({ "number": number }),
            Self::GetCallLogs { days } => json!({ "days": days }),
            Self::ShowToast { message } => json!({ "message": message }),
            Self::UploadFile { base64, filename } => {
                json!({ "base64": base64, "filename": filename })
            }
            Self::DownloadFile { url, filename } => {
                json!({ "url": url, "filename": filename })
            }
            Self::StorageSet { key, value } => json!({ "key": key, "value": value }),
            Self::StorageGet { key } => json!({ "key": key }),
        }
    }

    /// Bare-token encoding on the legacy bridge, where one exists.
    ///
    /// Any action added to the vocabulary must decide its legacy mapping
    /// here; `None` means the legacy bridge gets the JSON envelope.
    pub fn legacy_token(&self) -> Option<&'static str> {
        match self {
            Self::GetLocation => Some("getLocation"),
            _ => None,
        }
    }

    /// Produce the string handed to the transport's send operation for the
    /// given mode.
    pub fn wire_payload(&self, mode: TransportMode) -> Result<String> {
        match mode {
            TransportMode::NoBridge => Err(CapprobeError::NoTransport),
            TransportMode::LegacyBridge => match self.legacy_token() {
                Some(token) => Ok(token.to_string()),
                None => self.envelope(),
            },
            TransportMode::PrimaryBridge => self.envelope(),
        }
    }

    /// Compact JSON envelope `{"action": ..., "params": {...}}`.
    fn envelope(&self) -> Result<String> {
        #[derive(Serialize)]
        struct WireEnvelope<'a> {
            action: &'a str,
            params: Value,
        }

        serde_json::to_string(&WireEnvelope {
            action: self.action(),
            params: self.params(),
        })
        .map_err(|e| CapprobeError::Encode(e.to_string()))
    }
}
