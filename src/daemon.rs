//! Periodic background task with signal-driven shutdown.
//!
//! The daemon spawns one tick loop that reads resolved configuration and
//! refreshes the remote layer, while the calling task blocks on SIGINT or
//! SIGTERM. Shutdown is best-effort: a tick in progress when the signal
//! arrives is aborted, not drained.

use std::{fmt, future::Future, time::Duration};

use tokio::signal;
use tracing::{info, warn};

use crate::{core::Result, resolver::ConfigResolver};

const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Lifecycle states of the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, tick loop not yet launched.
    Starting,
    /// Tick loop running, waiting for a termination signal.
    Running,
    /// Termination signal received, tick loop being aborted.
    Stopping,
    /// Tick loop aborted, ready for process exit.
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::Stopping => "stopping",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Runs a periodic task until the process receives a termination signal.
pub struct Daemon {
    resolver: ConfigResolver,
    interval: Duration,
    watch_key: String,
    remote_version_key: String,
}

impl Daemon {
    /// Creates a daemon printing `watch_key` on every tick and
    /// `remote_version_key` after each successful remote refresh.
    pub fn new(resolver: ConfigResolver, watch_key: &str, remote_version_key: &str) -> Self {
        Self {
            resolver,
            interval: DEFAULT_TICK_INTERVAL,
            watch_key: watch_key.to_string(),
            remote_version_key: remote_version_key.to_string(),
        }
    }

    /// Overrides the tick interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Launches the tick loop and blocks until SIGINT or SIGTERM.
    ///
    /// # Errors
    /// Returns error if the signal handlers cannot be installed.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Launches the tick loop and blocks until `shutdown` completes.
    ///
    /// Prints the shutdown notice exactly once and aborts the tick task
    /// without waiting for an in-flight tick.
    ///
    /// # Errors
    /// Returns error if the shutdown future resolves to an error.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = std::io::Result<()>>,
    {
        info!(state = %LifecycleState::Starting, "daemon lifecycle");

        let tick = tokio::spawn(tick_loop(
            self.resolver,
            self.interval,
            self.watch_key,
            self.remote_version_key,
        ));

        info!(state = %LifecycleState::Running, "daemon lifecycle");
        println!("Daemon started. Press Ctrl+C to stop.");

        shutdown.await?;

        info!(state = %LifecycleState::Stopping, "daemon lifecycle");
        println!("Received termination signal. Exiting...");

        tick.abort();
        info!(state = %LifecycleState::Stopped, "daemon lifecycle");

        Ok(())
    }
}

/// One iteration every interval: print the designated key's resolved
/// value, attempt a remote refresh, print the remote version key. The
/// loop is not cancellable from within; termination is whole-process.
async fn tick_loop(
    resolver: ConfigResolver,
    interval: Duration,
    watch_key: String,
    remote_version_key: String,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;

        println!("Daemon task running...");
        println!("{}: {}", watch_key, resolver.get_string(&watch_key));

        match resolver.refresh_remote().await {
            Ok(()) => {
                println!(
                    "{}: {}",
                    remote_version_key,
                    resolver.get_string(&remote_version_key)
                );
            }
            Err(e) => {
                warn!("remote refresh failed: {e}");
                println!("unable to read remote config: {e}");
            }
        }
    }
}

/// Completes when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;

        tokio::select! {
            result = signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await
    }
}
