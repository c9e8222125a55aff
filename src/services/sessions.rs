//! Session sweeper: background expiry for abandoned chat sessions.
//!
//! DESIGN
//! ======
//! Visitors rarely send the unload `DELETE`, so sessions are also dropped
//! once idle past `SESSION_IDLE_TTL_SECS`. A background task checks every
//! `SESSION_SWEEP_INTERVAL_SECS`. Sessions with a send in flight are kept
//! until the reply lands.

use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::state::AppState;

const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 1800;
const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

/// Expiry knobs, loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionExpiryConfig {
    /// How long a session may go untouched before it is dropped.
    pub idle_ttl: Duration,
    /// Time between sweeps.
    pub sweep_interval: Duration,
}

impl Default for SessionExpiryConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(DEFAULT_SESSION_IDLE_TTL_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SESSION_SWEEP_INTERVAL_SECS),
        }
    }
}

impl SessionExpiryConfig {
    /// Unset, unparseable or zero values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            idle_ttl: Duration::from_secs(env_secs("SESSION_IDLE_TTL_SECS", DEFAULT_SESSION_IDLE_TTL_SECS)),
            sweep_interval: Duration::from_secs(env_secs(
                "SESSION_SWEEP_INTERVAL_SECS",
                DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
            )),
        }
    }
}

fn env_secs(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .unwrap_or(default)
}

/// Run one sweep. Returns how many sessions were dropped.
pub async fn sweep_once(state: &AppState, idle_ttl: Duration) -> usize {
    let evicted = state.evict_idle(Instant::now(), idle_ttl).await;
    if evicted > 0 {
        let remaining = state.session_count().await;
        info!(evicted, remaining, "sessions: idle sessions evicted");
    } else {
        debug!("sessions: sweep found nothing idle");
    }
    evicted
}

/// Spawn the background sweeper. Returns a handle for shutdown.
pub fn spawn_session_sweeper(state: AppState, config: SessionExpiryConfig) -> JoinHandle<()> {
    info!(
        idle_ttl_secs = config.idle_ttl.as_secs(),
        sweep_interval_secs = config.sweep_interval.as_secs(),
        "session expiry configured"
    );
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config.sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sweep_once(&state, config.idle_ttl).await;
        }
    })
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
