// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capprobe — Device-Capability Probe
//
// Entry point. Initialises logging and backend services, runs the full
// capability sweep, waits for the host's asynchronous replies, and renders
// the activity log.

mod checks;
mod host_sim;
mod services;
mod state;

use std::time::Duration;

use services::app_services::AppServices;
use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Capprobe starting");

    let svc = match AppServices::init() {
        Ok(s) => {
            tracing::info!("backend services initialised");
            s
        }
        Err(e) => {
            tracing::error!(error = %e, "persistent config unavailable, using defaults");
            AppServices::fallback()
        }
    };

    let state = AppState::new(&svc);
    println!("Status: {}", state.status.banner());
    println!();

    let sent = svc.run_sweep();
    tracing::info!(sent, "capability sweep dispatched");

    // Replies arrive asynchronously; give the host a window to answer.
    // Commands that never get a response simply have no reply entry.
    let drain = Duration::from_millis(state.config.simulate_delay_ms * 4 + 200);
    tokio::time::sleep(drain).await;

    render_log(&state);
}

/// Print the activity log, one timestamped line per entry.
fn render_log(state: &AppState) {
    println!("Activity log ({} entries):", state.log.len());
    for entry in state.log.entries() {
        println!(
            "  {}  {:<7}  {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.kind.label(),
            entry.message
        );
    }
}
