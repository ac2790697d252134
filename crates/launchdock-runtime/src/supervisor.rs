//! Launch supervision: spawn an application and poll until its UI looks
//! ready.
//!
//! One logical flow per attempt: validate the path, hand it to the OS
//! with the working directory set to its parent, then take readiness
//! observations against a hard wall-clock deadline. The caller stays
//! responsive because every pause is a non-blocking `tokio::time::sleep`.

use launchdock_core::{LaunchObserver, LaunchOutcome, LaunchState, ProbeStatus, ReadinessProbe};
use std::path::Path;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::probes::NativeProbe;

/// Tunables for one launch attempt.
///
/// Defaults match the desktop launcher's behavior: a 60 second deadline,
/// observations every 250ms, and a 200ms settle after a window appears.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Hard wall-clock deadline for the whole readiness wait, computed
    /// once at launch start and never reset by activity.
    pub readiness_timeout: Duration,
    /// Pause between readiness observations.
    pub poll_interval: Duration,
    /// Delay after a window appears, letting rendering stabilize.
    pub settle_delay: Duration,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            readiness_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(250),
            settle_delay: Duration::from_millis(200),
        }
    }
}

/// Supervises a single launch attempt: validate, spawn, poll, report.
///
/// Stateless across attempts. Each launch owns its child handle
/// exclusively and drops it on every exit path; dropping never kills the
/// child, because the launcher does not supervise beyond launch.
#[derive(Debug, Clone, Default)]
pub struct LaunchSupervisor {
    config: LaunchConfig,
}

impl LaunchSupervisor {
    pub const fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    /// Launch the executable at `path` and wait for it to look ready.
    ///
    /// Emits every state transition (terminal included) and at least 1Hz
    /// progress through `observer`, then returns exactly one terminal
    /// outcome. Timing out is informational, not an error: callers
    /// proceed as if ready rather than blocking the user on applications
    /// with unusual startup behavior.
    pub async fn launch(&self, path: &Path, observer: &dyn LaunchObserver) -> LaunchOutcome {
        observer.state_changed(LaunchState::Validating);
        if path.as_os_str().is_empty() || !path.is_file() {
            // Local and non-fatal: the caller tells the user where to
            // obtain the missing application. No start is attempted.
            let outcome = LaunchOutcome::NotFound {
                path: (!path.as_os_str().is_empty()).then(|| path.to_path_buf()),
            };
            observer.state_changed(outcome.state());
            return outcome;
        }

        observer.state_changed(LaunchState::Starting);
        let mut command = tokio::process::Command::new(path);
        if let Some(parent) = path.parent() {
            command.current_dir(parent);
        }
        // Direct spawn, no shell indirection: the handle must stay
        // observable, and the child must outlive the launcher.
        command.kill_on_drop(false);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "process start failed");
                let outcome = LaunchOutcome::StartFailed {
                    reason: e.to_string(),
                };
                observer.state_changed(outcome.state());
                return outcome;
            }
        };

        info!(path = %path.display(), pid = ?child.id(), "process started");
        self.poll_until_ready(NativeProbe::new(child), observer).await
    }

    /// Poll `probe` until it reports readiness or the deadline passes.
    ///
    /// Public so tests and alternate platforms can drive the timeout
    /// logic with their own probes. Probe failures never surface here:
    /// implementations report `NotReady` instead, and only the deadline
    /// ends the loop.
    pub async fn poll_until_ready<P: ReadinessProbe>(
        &self,
        mut probe: P,
        observer: &dyn LaunchObserver,
    ) -> LaunchOutcome {
        observer.state_changed(LaunchState::Polling);

        let started = Instant::now();
        let deadline = started + self.config.readiness_timeout;

        loop {
            let status = probe.observe().await;
            debug!(?status, "readiness observation");
            match status {
                ProbeStatus::Exited | ProbeStatus::InputIdle => {
                    observer.state_changed(LaunchState::Ready);
                    return LaunchOutcome::Ready;
                }
                ProbeStatus::WindowShown => {
                    sleep(self.config.settle_delay).await;
                    observer.state_changed(LaunchState::Ready);
                    return LaunchOutcome::Ready;
                }
                ProbeStatus::NotReady => {}
            }

            observer.progress(started.elapsed());

            if Instant::now() >= deadline {
                observer.state_changed(LaunchState::TimedOut);
                return LaunchOutcome::TimedOut;
            }
            sleep(self.config.poll_interval).await;
        }
    }
}
