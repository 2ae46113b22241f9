// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The capability checks — one typed command builder per probe button.

use serde_json::json;

use capprobe_bridge::{Command, PhotoParams, PhotoSource};
use capprobe_core::AppConfig;

pub fn location() -> Command {
    Command::GetLocation
}

pub fn capture_photo(config: &AppConfig) -> Command {
    photo(config, PhotoSource::Camera)
}

pub fn select_from_gallery(config: &AppConfig) -> Command {
    photo(config, PhotoSource::Gallery)
}

fn photo(config: &AppConfig, source: PhotoSource) -> Command {
    Command::CapturePhoto(PhotoParams {
        quality: config.photo_quality,
        max_width: config.photo_max_edge,
        max_height: config.photo_max_edge,
        source,
    })
}

pub fn scan_qr() -> Command {
    Command::ScanQr
}

pub fn scan_barcode() -> Command {
    Command::ScanBarcode
}

/// The number comes from config rather than an interactive prompt.
/// `None` means no number is configured and the check is skipped.
pub fn make_call(config: &AppConfig) -> Option<Command> {
    config.call_number.clone().map(|number| Command::MakeCall { number })
}

pub fn call_logs(config: &AppConfig) -> Command {
    Command::GetCallLogs {
        days: config.call_log_days,
    }
}

pub fn contacts() -> Command {
    Command::GetContacts
}

/// Uploads a small fixture file ("Hello World!" in base64).
pub fn upload_file() -> Command {
    Command::UploadFile {
        base64: "SGVsbG8gV29ybGQh".into(),
        filename: "test.txt".into(),
    }
}

pub fn download_file(config: &AppConfig) -> Command {
    Command::DownloadFile {
        url: config.download_url.clone(),
        filename: config.download_filename.clone(),
    }
}

pub fn storage_set(config: &AppConfig) -> Command {
    Command::StorageSet {
        key: config.storage_key.clone(),
        value: json!({
            "user": "test_user",
            "settings": { "theme": "dark", "notifications": true },
        }),
    }
}

pub fn storage_get(config: &AppConfig) -> Command {
    Command::StorageGet {
        key: config.storage_key.clone(),
    }
}

pub fn device_info() -> Command {
    Command::GetDeviceInfo
}

pub fn network_status() -> Command {
    Command::GetNetworkStatus
}

pub fn show_toast(config: &AppConfig) -> Command {
    Command::ShowToast {
        message: config.toast_message.clone(),
    }
}

/// Every check, grouped the way the probe reports them: location, camera,
/// scanner, phone, files, storage, system. The make-call check only appears
/// when a number is configured.
pub fn full_sweep(config: &AppConfig) -> Vec<Command> {
    let mut sweep = vec![
        location(),
        capture_photo(config),
        select_from_gallery(config),
        scan_qr(),
        scan_barcode(),
    ];
    if let Some(call) = make_call(config) {
        sweep.push(call);
    }
    sweep.extend([
        call_logs(config),
        contacts(),
        upload_file(),
        download_file(config),
        storage_set(config),
        storage_get(config),
        device_info(),
        network_status(),
        show_toast(config),
    ]);
    sweep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_without_call_number_skips_make_call() {
        let config = AppConfig::default();
        assert!(config.call_number.is_none());

        let actions: Vec<_> = full_sweep(&config).iter().map(|c| c.action()).collect();
        assert!(!actions.contains(&"MAKE_CALL"));
        assert_eq!(actions.len(), 14);
    }

    #[test]
    fn sweep_with_call_number_includes_make_call() {
        let config = AppConfig {
            call_number: Some("+15551234567".into()),
            ..AppConfig::default()
        };

        let actions: Vec<_> = full_sweep(&config).iter().map(|c| c.action()).collect();
        assert!(actions.contains(&"MAKE_CALL"));
        assert_eq!(actions.len(), 15);
    }

    #[test]
    fn photo_checks_differ_only_in_source() {
        let config = AppConfig::default();
        let camera = capture_photo(&config);
        let gallery = select_from_gallery(&config);

        assert_eq!(camera.action(), "CAPTURE_PHOTO");
        assert_eq!(gallery.action(), "CAPTURE_PHOTO");
        assert_eq!(camera.params()["source"], "camera");
        assert_eq!(gallery.params()["source"], "gallery");
        assert_eq!(camera.params()["quality"], gallery.params()["quality"]);
    }

    #[test]
    fn builders_take_values_from_config() {
        let config = AppConfig {
            photo_quality: 0.5,
            photo_max_edge: 800,
            call_log_days: 30,
            storage_key: "other_key".into(),
            ..AppConfig::default()
        };

        let photo = capture_photo(&config);
        assert_eq!(photo.params()["quality"], 0.5);
        assert_eq!(photo.params()["maxWidth"], 800);

        assert_eq!(call_logs(&config).params()["days"], 30);
        assert_eq!(storage_get(&config).params()["key"], "other_key");
    }

    #[test]
    fn storage_checks_share_the_same_key() {
        let config = AppConfig::default();
        let set = storage_set(&config);
        let get = storage_get(&config);
        assert_eq!(set.params()["key"], get.params()["key"]);
    }
}
