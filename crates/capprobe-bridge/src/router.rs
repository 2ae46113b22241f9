// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Response router: the two inbound callback channels the host delivers to.
//
// The host pushes payloads at arbitrary future times through one of two
// named channels: `Response` for discrete command replies, `Data` for
// unsolicited pushes. The router normalizes each payload and forwards it to
// whichever handler is currently subscribed on that channel. This boundary
// is total: a payload the router cannot parse is passed through as opaque
// text, never raised back into the host.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

/// The two named inbound channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeChannel {
    /// Discrete replies to previously sent commands.
    Response,
    /// Unsolicited pushes from the host (e.g. connectivity changes).
    Data,
}

impl BridgeChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Response => "response",
            Self::Data => "data",
        }
    }
}

/// A payload as the host hands it over: either a string (assumed to be
/// JSON-encoded) or an already-structured value.
#[derive(Debug, Clone)]
pub enum HostPayload {
    Text(String),
    Structured(Value),
}

impl From<String> for HostPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for HostPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for HostPayload {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

/// A normalized payload, tagged by the channel that delivered it.
#[derive(Debug, Clone)]
pub struct RouterEvent {
    pub channel: BridgeChannel,
    pub message: String,
}

type Handler = Arc<dyn Fn(RouterEvent) + Send + Sync>;

/// Owner of the two single-subscriber channel slots.
///
/// At most one handler is active per channel; subscribing again replaces
/// the previous handler (last writer wins, matching the global callback
/// slots the shipped native hosts install into). Handlers must not panic:
/// a panic here would unwind into the host's delivery call.
#[derive(Default)]
pub struct ResponseRouter {
    response_slot: Mutex<Option<Handler>>,
    data_slot: Mutex<Option<Handler>>,
}

impl ResponseRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the handler for a channel, replacing any previous one.
    pub fn subscribe(
        &self,
        channel: BridgeChannel,
        handler: impl Fn(RouterEvent) + Send + Sync + 'static,
    ) {
        *self.lock_slot(channel) = Some(Arc::new(handler));
        debug!(channel = channel.as_str(), "subscriber installed");
    }

    /// Remove the handler for a channel. Payloads delivered afterwards are
    /// dropped until a new handler subscribes.
    pub fn unsubscribe(&self, channel: BridgeChannel) {
        *self.lock_slot(channel) = None;
        debug!(channel = channel.as_str(), "subscriber removed");
    }

    pub fn has_subscriber(&self, channel: BridgeChannel) -> bool {
        self.lock_slot(channel).is_some()
    }

    /// Host entry point for the discrete-reply channel.
    pub fn deliver_response(&self, payload: impl Into<HostPayload>) {
        self.deliver(BridgeChannel::Response, payload.into());
    }

    /// Host entry point for the unsolicited-push channel.
    pub fn deliver_data(&self, payload: impl Into<HostPayload>) {
        self.deliver(BridgeChannel::Data, payload.into());
    }

    /// Normalize a payload and forward it to the channel's subscriber.
    ///
    /// Never returns an error: delivery order in equals forwarding order
    /// out, and an unparseable payload is forwarded as its raw text.
    pub fn deliver(&self, channel: BridgeChannel, payload: HostPayload) {
        let message = normalize(payload);
        // Clone the handle out of the slot so a handler that resubscribes
        // does not deadlock against the slot lock.
        let handler = self.lock_slot(channel).clone();
        match handler {
            Some(handler) => handler(RouterEvent { channel, message }),
            None => debug!(
                channel = channel.as_str(),
                "payload dropped, no subscriber"
            ),
        }
    }

    fn lock_slot(&self, channel: BridgeChannel) -> std::sync::MutexGuard<'_, Option<Handler>> {
        let slot = match channel {
            BridgeChannel::Response => &self.response_slot,
            BridgeChannel::Data => &self.data_slot,
        };
        slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Collapse the two inbound shapes into one log-ready message string.
fn normalize(payload: HostPayload) -> String {
    match payload {
        HostPayload::Text(text) => match serde_json::from_str::<Value>(&text) {
            Ok(value) => value.to_string(),
            // Not JSON — the raw text is the message.
            Err(_) => text,
        },
        HostPayload::Structured(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Helper: collect every event a channel forwards into a shared vec.
    fn collecting_router() -> (ResponseRouter, Arc<Mutex<Vec<RouterEvent>>>) {
        let router = ResponseRouter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for channel in [BridgeChannel::Response, BridgeChannel::Data] {
            let seen = Arc::clone(&seen);
            router.subscribe(channel, move |event| {
                seen.lock().expect("seen lock").push(event);
            });
        }
        (router, seen)
    }

    #[test]
    fn valid_json_text_normalizes_to_compact_json() {
        let (router, seen) = collecting_router();
        router.deliver_response(r#"{ "status" : "ok",  "lat": 51.5 }"#);

        let seen = seen.lock().expect("seen lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message, r#"{"lat":51.5,"status":"ok"}"#);
    }

    #[test]
    fn non_json_text_passes_through_raw() {
        let (router, seen) = collecting_router();
        router.deliver_response("PERMISSION_DENIED: camera");

        let seen = seen.lock().expect("seen lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message, "PERMISSION_DENIED: camera");
    }

    #[test]
    fn structured_payload_passes_through_as_json() {
        let (router, seen) = collecting_router();
        router.deliver_data(json!({ "network": "wifi" }));

        let seen = seen.lock().expect("seen lock");
        assert_eq!(seen[0].message, r#"{"network":"wifi"}"#);
        assert_eq!(seen[0].channel, BridgeChannel::Data);
    }

    #[test]
    fn delivery_order_is_preserved_across_channels() {
        let (router, seen) = collecting_router();
        router.deliver_response("\"first\"");
        router.deliver_data("\"second\"");
        router.deliver_response("\"third\"");

        let seen = seen.lock().expect("seen lock");
        let channels: Vec<_> = seen.iter().map(|e| e.channel).collect();
        assert_eq!(
            channels,
            [
                BridgeChannel::Response,
                BridgeChannel::Data,
                BridgeChannel::Response
            ]
        );
        let messages: Vec<_> = seen.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["\"first\"", "\"second\"", "\"third\""]);
    }

    #[test]
    fn subscribe_replaces_previous_handler() {
        let router = ResponseRouter::new();
        let first = Arc::new(Mutex::new(0u32));
        let second = Arc::new(Mutex::new(0u32));

        let counter = Arc::clone(&first);
        router.subscribe(BridgeChannel::Response, move |_| {
            *counter.lock().expect("first lock") += 1;
        });
        let counter = Arc::clone(&second);
        router.subscribe(BridgeChannel::Response, move |_| {
            *counter.lock().expect("second lock") += 1;
        });

        router.deliver_response("ignored");
        assert_eq!(*first.lock().expect("first lock"), 0);
        assert_eq!(*second.lock().expect("second lock"), 1);
    }

    #[test]
    fn unsubscribed_channel_drops_payloads_silently() {
        let (router, seen) = collecting_router();
        router.unsubscribe(BridgeChannel::Data);
        assert!(!router.has_subscriber(BridgeChannel::Data));

        router.deliver_data("dropped");
        router.deliver_response("kept");

        let seen = seen.lock().expect("seen lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message, "kept");
    }

    #[test]
    fn delivery_without_any_subscriber_does_not_panic() {
        let router = ResponseRouter::new();
        router.deliver_response("{}");
        router.deliver_data("not json");
    }
}
