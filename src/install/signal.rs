//! Termination signals that must not leave a partial download behind.

use anyhow::Result;

/// Listeners for the signals that end the installer early.
///
/// Handlers are installed by [`ExitSignals::register`], before the download
/// starts, so a signal arriving at any point afterwards is seen.
#[cfg(unix)]
pub struct ExitSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ExitSignals {
    pub fn register() -> Result<Self> {
        use anyhow::Context;
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt()).context("Failed to listen for SIGINT")?,
            terminate: signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?,
            hangup: signal(SignalKind::hangup()).context("Failed to listen for SIGHUP")?,
        })
    }

    /// Waits for the first signal and returns the conventional exit code
    /// for it (128 + signal number).
    pub async fn recv(&mut self) -> i32 {
        tokio::select! {
            _ = self.interrupt.recv() => 130,
            _ = self.terminate.recv() => 143,
            _ = self.hangup.recv() => 129,
        }
    }
}

#[cfg(not(unix))]
pub struct ExitSignals;

#[cfg(not(unix))]
impl ExitSignals {
    pub fn register() -> Result<Self> {
        Ok(Self)
    }

    pub async fn recv(&mut self) -> i32 {
        match tokio::signal::ctrl_c().await {
            Ok(()) => 130,
            Err(_) => std::future::pending().await,
        }
    }
}
