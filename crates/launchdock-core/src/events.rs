//! Launch lifecycle state machine and the observer port.
//!
//! A launch attempt moves through `Idle -> Validating -> Starting ->
//! Polling` and ends in exactly one of four terminal states. The
//! presentation layer is a pure observer of these transitions; no state
//! lives outside the attempt itself.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Phase of a single launch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchState {
    /// No attempt in flight: the rest state between attempts. The
    /// supervisor's first report for an attempt is `Validating`.
    Idle,
    /// Checking that the requested path exists.
    Validating,
    /// Handing the path to the OS.
    Starting,
    /// Waiting for a readiness signal.
    Polling,
    /// Readiness signalled (or the process exited on its own).
    Ready,
    /// Deadline passed without a signal.
    TimedOut,
    /// Nothing to launch at the requested path.
    NotFound,
    /// The OS rejected the start call.
    StartFailed,
}

impl LaunchState {
    /// Terminal states are never re-entered; no retries.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Ready | Self::TimedOut | Self::NotFound | Self::StartFailed
        )
    }
}

/// Terminal result of one launch attempt. Produced per attempt, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LaunchOutcome {
    /// The application came up (or exited immediately, which still counts
    /// as launched) before the deadline.
    Ready,
    /// No readiness signal before the deadline. Informational, not an
    /// error: callers proceed as if ready rather than blocking the user.
    TimedOut,
    /// The path was empty or pointed at nothing. User-remediable.
    NotFound {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },
    /// The OS start call failed; `reason` carries the underlying message.
    StartFailed { reason: String },
}

impl LaunchOutcome {
    /// The terminal state this outcome corresponds to.
    pub const fn state(&self) -> LaunchState {
        match self {
            Self::Ready => LaunchState::Ready,
            Self::TimedOut => LaunchState::TimedOut,
            Self::NotFound { .. } => LaunchState::NotFound,
            Self::StartFailed { .. } => LaunchState::StartFailed,
        }
    }

    /// Whether the caller should proceed as if the application is up.
    /// Timing out counts: only missing files and failed starts do not.
    pub const fn proceed_as_ready(&self) -> bool {
        matches!(self, Self::Ready | Self::TimedOut)
    }
}

/// Format elapsed wall-clock time as "mm:ss" for progress display.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Port for observing a single launch attempt.
///
/// Object-safe and fire-and-forget: methods return nothing and
/// implementations deal with their own failures. The supervisor calls
/// `state_changed` on every transition (terminal included) and
/// `progress` at one hertz or better while polling.
pub trait LaunchObserver: Send + Sync {
    /// A state transition occurred.
    fn state_changed(&self, state: LaunchState);

    /// Time elapsed since the launch began.
    fn progress(&self, elapsed: Duration);
}

/// Observer that ignores all updates; for tests and headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LaunchObserver for NoopObserver {
    fn state_changed(&self, _state: LaunchState) {}
    fn progress(&self, _elapsed: Duration) {}
}
