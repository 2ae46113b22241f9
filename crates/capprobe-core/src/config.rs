// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Persistent settings for the diagnostic sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// JPEG quality requested from the camera (0.0–1.0).
    pub photo_quality: f64,
    /// Longest edge, in pixels, for captured/selected photos.
    pub photo_max_edge: u32,
    /// How many days of call history the call-log check requests.
    pub call_log_days: u32,
    /// Phone number dialled by the make-call check. `None` skips the check.
    pub call_number: Option<String>,
    /// Text shown by the toast check.
    pub toast_message: String,
    /// URL fetched by the download check.
    pub download_url: String,
    /// Filename the downloaded file is saved under on the device.
    pub download_filename: String,
    /// Key used by the storage set/get checks.
    pub storage_key: String,
    /// Run against the built-in simulated host when no real one is attached.
    pub simulate_host: bool,
    /// Make the simulated host expose the legacy bridge shape.
    pub simulate_legacy: bool,
    /// Delay before the simulated host delivers each reply, in milliseconds.
    pub simulate_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            photo_quality: 0.8,
            photo_max_edge: 1920,
            call_log_days: 7,
            call_number: None,
            toast_message: "Hello from Capprobe!".into(),
            download_url: "https://httpbin.org/json".into(),
            download_filename: "downloaded.json".into(),
            storage_key: "test_data".into(),
            simulate_host: true,
            simulate_legacy: false,
            simulate_delay_ms: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_json() {
        let config = AppConfig {
            call_number: Some("+441908274066".into()),
            simulate_legacy: true,
            ..AppConfig::default()
        };

        let json = serde_json::to_string(&config).expect("serialize");
        let back: AppConfig = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(back.call_number.as_deref(), Some("+441908274066"));
        assert!(back.simulate_legacy);
        assert_eq!(back.photo_max_edge, config.photo_max_edge);
    }
}
