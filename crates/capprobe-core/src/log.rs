// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Append-only activity log.
//
// The log is the single piece of shared mutable state in the system. It is
// only ever appended to or cleared in full, always through the writer lock,
// so entries keep the order in which they were processed even when a
// multi-threaded host delivers callbacks concurrently.

use std::sync::Mutex;

use tracing::debug;

use crate::types::{LogEntry, LogKind};

/// Time-ordered record of every command sent and every payload received.
///
/// Cheap to share: wrap in `Arc` and clone the handle. All methods take
/// `&self`; mutation happens behind the internal lock.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry stamped with the current time.
    pub fn append(&self, kind: LogKind, message: impl Into<String>) {
        self.push(LogEntry::new(kind, message));
    }

    /// Append a pre-built entry.
    pub fn push(&self, entry: LogEntry) {
        debug!(kind = entry.kind.label(), message = %entry.message, "log entry");
        self.lock().push(entry);
    }

    /// Snapshot of all entries in append order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove every entry. Subsequent appends start a fresh sequence.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        // A poisoned lock means a panic mid-append; the Vec itself is still
        // valid, so recover the guard rather than wedging the log.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_preserve_order() {
        let log = ActivityLog::new();
        log.append(LogKind::Info, "first");
        log.append(LogKind::Success, "second");
        log.append(LogKind::Error, "third");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].message, "second");
        assert_eq!(entries[2].message, "third");
    }

    #[test]
    fn clear_then_append_still_works() {
        let log = ActivityLog::new();
        log.append(LogKind::Info, "before clear");
        log.clear();
        assert!(log.is_empty());

        log.append(LogKind::Info, "after clear");
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "after clear");
    }

    #[test]
    fn concurrent_appends_all_land() {
        use std::sync::Arc;

        let log = Arc::new(ActivityLog::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        log.append(LogKind::Info, format!("{i}-{j}"));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("writer thread panicked");
        }

        assert_eq!(log.len(), 8 * 50);
    }
}
