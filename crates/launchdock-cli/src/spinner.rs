//! Terminal busy indicator for launch progress.

use indicatif::{ProgressBar, ProgressStyle};
use launchdock_core::{LaunchObserver, LaunchState, format_elapsed};
use std::sync::Mutex;
use std::time::Duration;

/// Renders launch state as a spinner with an elapsed-time message.
///
/// The spinner appears on an attempt's first transition (the supervisor
/// reports `Validating` first; `Idle` is the machine's rest state and is
/// never emitted) and is cleared on any terminal state. The outcome
/// itself is reported by the caller.
pub struct SpinnerObserver {
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerObserver {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn create_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message("Launching…");
        pb
    }
}

impl Default for SpinnerObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchObserver for SpinnerObserver {
    fn state_changed(&self, state: LaunchState) {
        let mut guard = self.bar.lock().unwrap();
        if state.is_terminal() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        } else if state != LaunchState::Idle && guard.is_none() {
            *guard = Some(Self::create_spinner());
        }
    }

    fn progress(&self, elapsed: Duration) {
        let guard = self.bar.lock().unwrap();
        if let Some(ref pb) = *guard {
            pb.set_message(format!("Launching… elapsed {}", format_elapsed(elapsed)));
        }
    }
}
