// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Simulated host for standalone runs.
//
// Stands in for the native side when the probe runs outside a real host
// embedding, so the full send/route/log loop is observable end to end.
// Replies go through the router on a later task turn, never from inside
// `post_message`, matching the timing of real hosts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use tracing::{debug, warn};

use capprobe_bridge::{HostTransport, ResponseRouter};
use capprobe_core::error::{CapprobeError, Result};

/// A native host stand-in that answers every known action with a canned
/// reply, keeps a small in-memory store for the storage checks, and pushes
/// one unsolicited data event when asked for network status.
pub struct SimulatedHost {
    router: Mutex<Option<Arc<ResponseRouter>>>,
    storage: Mutex<HashMap<String, Value>>,
    delay: Duration,
    legacy: bool,
}

impl SimulatedHost {
    pub fn new(delay: Duration, legacy: bool) -> Arc<Self> {
        Arc::new(Self {
            router: Mutex::new(None),
            storage: Mutex::new(HashMap::new()),
            delay,
            legacy,
        })
    }

    /// Hand the host the router it delivers replies through. Until this is
    /// called, inbound payloads are acknowledged but dropped.
    pub fn attach_router(&self, router: Arc<ResponseRouter>) {
        *self.router.lock().unwrap_or_else(|e| e.into_inner()) = Some(router);
    }

    fn router(&self) -> Option<Arc<ResponseRouter>> {
        self.router.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Decode a wire payload into its action name, accepting both shapes:
    /// the legacy bare token and the JSON envelope.
    fn decode_action(payload: &str) -> Option<(String, Value)> {
        if payload == "getLocation" {
            return Some(("GET_LOCATION".into(), json!({})));
        }
        let envelope: Value = serde_json::from_str(payload).ok()?;
        let action = envelope.get("action")?.as_str()?.to_string();
        let params = envelope.get("params").cloned().unwrap_or_else(|| json!({}));
        Some((action, params))
    }

    /// Build the reply for one action, updating host-side state as a real
    /// device would.
    fn reply_for(&self, action: &str, params: &Value) -> Value {
        match action {
            "GET_LOCATION" => json!({
                "action": action, "status": "ok",
                "latitude": 51.5074, "longitude": -0.1278, "accuracy": 12.5,
            }),
            "CAPTURE_PHOTO" => json!({
                "action": action, "status": "ok",
                "uri": "content://capprobe/photo/1",
                "source": params["source"],
            }),
            "SCAN_QR" => json!({
                "action": action, "status": "ok",
                "text": "https://example.com/item/42",
            }),
            "SCAN_BARCODE" => json!({
                "action": action, "status": "ok",
                "format": "EAN-13", "text": "4006381333931",
            }),
            "MAKE_CALL" => json!({ "action": action, "status": "ok" }),
            "GET_CALL_LOGS" => json!({
                "action": action, "status": "ok",
                "entries": [
                    { "number": "+15551234567", "direction": "outgoing", "seconds": 42 },
                ],
            }),
            "SHOW_TOAST" => json!({ "action": action, "status": "ok" }),
            "GET_CONTACTS" => json!({
                "action": action, "status": "ok",
                "contacts": [{ "name": "Ada Lovelace", "number": "+442079460000" }],
            }),
            "UPLOAD_FILE" => json!({
                "action": action, "status": "ok",
                "filename": params["filename"],
            }),
            "DOWNLOAD_FILE" => json!({
                "action": action, "status": "ok",
                "path": format!("/sdcard/Download/{}", params["filename"].as_str().unwrap_or("file")),
            }),
            "GET_DEVICE_INFO" => json!({
                "action": action, "status": "ok",
                "model": "Pixel 8", "os": "Android 15",
            }),
            "GET_NETWORK_STATUS" => json!({
                "action": action, "status": "ok",
                "type": "wifi", "online": true,
            }),
            "STORAGE_SET" => {
                if let Some(key) = params["key"].as_str() {
                    self.storage
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .insert(key.to_string(), params["value"].clone());
                }
                json!({ "action": action, "status": "ok" })
            }
            "STORAGE_GET" => {
                let value = params["key"]
                    .as_str()
                    .and_then(|key| {
                        self.storage
                            .lock()
                            .unwrap_or_else(|e| e.into_inner())
                            .get(key)
                            .cloned()
                    })
                    .unwrap_or(Value::Null);
                json!({ "action": action, "status": "ok", "value": value })
            }
            other => json!({
                "status": "error",
                "message": format!("unknown action: {other}"),
            }),
        }
    }
}

impl HostTransport for SimulatedHost {
    fn post_message(&self, payload: &str) -> Result<()> {
        let Some((action, params)) = Self::decode_action(payload) else {
            warn!(payload, "simulated host received undecodable payload");
            return Err(CapprobeError::Transport(
                "simulated host could not decode payload".into(),
            ));
        };

        let Some(router) = self.router() else {
            debug!(action, "no router attached yet, reply dropped");
            return Ok(());
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return Err(CapprobeError::Transport(
                "simulated host needs an async runtime".into(),
            ));
        };

        let reply = self.reply_for(&action, &params).to_string();
        let push_network_event = action == "GET_NETWORK_STATUS";
        let delay = self.delay;
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            router.deliver_response(reply);
            if push_network_event {
                // One unsolicited push, the way real hosts report
                // connectivity changes outside any request.
                tokio::time::sleep(delay).await;
                router.deliver_data(json!({ "event": "NETWORK_CHANGED", "type": "wifi" }));
            }
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        if self.legacy {
            "simulated legacy host"
        } else {
            "simulated host"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_wire_shapes() {
        let (action, params) =
            SimulatedHost::decode_action("getLocation").expect("legacy token");
        assert_eq!(action, "GET_LOCATION");
        assert_eq!(params, json!({}));

        let (action, params) =
            SimulatedHost::decode_action(r#"{"action":"SCAN_QR","params":{}}"#)
                .expect("envelope");
        assert_eq!(action, "SCAN_QR");
        assert_eq!(params, json!({}));

        assert!(SimulatedHost::decode_action("garbage").is_none());
    }

    #[test]
    fn storage_round_trips_through_host_state() {
        let host = SimulatedHost::new(Duration::ZERO, false);

        let set_params = json!({ "key": "test_data", "value": { "theme": "dark" } });
        host.reply_for("STORAGE_SET", &set_params);

        let get_params = json!({ "key": "test_data" });
        let reply = host.reply_for("STORAGE_GET", &get_params);
        assert_eq!(reply["value"], json!({ "theme": "dark" }));

        let miss = host.reply_for("STORAGE_GET", &json!({ "key": "absent" }));
        assert_eq!(miss["value"], Value::Null);
    }

    #[test]
    fn unknown_action_gets_error_reply() {
        let host = SimulatedHost::new(Duration::ZERO, false);
        let reply = host.reply_for("FORMAT_DISK", &json!({}));
        assert_eq!(reply["status"], "error");
    }

    #[tokio::test]
    async fn replies_arrive_through_the_router_asynchronously() {
        use capprobe_bridge::BridgeChannel;

        let host = SimulatedHost::new(Duration::from_millis(5), false);
        let router = Arc::new(ResponseRouter::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            router.subscribe(BridgeChannel::Response, move |event| {
                seen.lock().expect("seen lock").push(event.message);
            });
        }
        host.attach_router(Arc::clone(&router));

        host.post_message(r#"{"action":"GET_DEVICE_INFO","params":{}}"#)
            .expect("post");
        // Nothing is delivered synchronously.
        assert!(seen.lock().expect("seen lock").is_empty());

        tokio::time::sleep(Duration::from_millis(50)).await;
        let seen = seen.lock().expect("seen lock");
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("GET_DEVICE_INFO"));
    }
}
