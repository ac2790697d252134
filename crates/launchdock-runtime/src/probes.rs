//! Concrete readiness probes.
//!
//! The default probe treats a child that has already exited as ready on
//! every platform (a fire-and-forget helper still counts as launched).
//! On Windows it additionally looks for a visible top-level window owned
//! by the child and asks the input queue to go idle, the two signals
//! desktop applications actually produce. Other platforms fall back to
//! the exit signal alone; alternate probes plug in through the
//! `ReadinessProbe` port without touching the supervisor.

use async_trait::async_trait;
use launchdock_core::{ProbeStatus, ReadinessProbe};
use tokio::process::Child;
use tracing::debug;

/// How long one input-idle observation may block.
#[cfg(windows)]
const INPUT_IDLE_WINDOW: std::time::Duration = std::time::Duration::from_millis(250);

/// Default readiness probe for the current platform.
///
/// Owns the child handle exclusively for the duration of the poll; the
/// handle is dropped with the probe and the process is never killed.
pub struct NativeProbe {
    child: Child,
}

impl NativeProbe {
    pub fn new(child: Child) -> Self {
        Self { child }
    }
}

#[async_trait]
impl ReadinessProbe for NativeProbe {
    async fn observe(&mut self) -> ProbeStatus {
        match self.child.try_wait() {
            Ok(Some(status)) => {
                debug!(?status, "child exited during readiness wait");
                return ProbeStatus::Exited;
            }
            Ok(None) => {}
            Err(e) => {
                // Probe failures never end the poll; the deadline does.
                debug!(error = %e, "try_wait failed, treating as not ready");
                return ProbeStatus::NotReady;
            }
        }

        #[cfg(windows)]
        {
            if let Some(pid) = self.child.id() {
                if win::has_visible_window(pid) {
                    return ProbeStatus::WindowShown;
                }
            }
            if let Some(raw) = self.child.raw_handle() {
                if win::input_idle(raw, INPUT_IDLE_WINDOW) {
                    return ProbeStatus::InputIdle;
                }
            }
        }

        ProbeStatus::NotReady
    }
}

#[cfg(windows)]
mod win {
    //! Win32 window-handle and input-idle queries. Everything here is
    //! best-effort: any failure reads as "no signal".
    #![allow(unsafe_code)]

    use std::os::windows::io::RawHandle;
    use std::time::Duration;
    use windows::Win32::Foundation::{BOOL, HANDLE, HWND, LPARAM};
    use windows::Win32::System::Threading::WaitForInputIdle;
    use windows::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetWindowThreadProcessId, IsWindowVisible,
    };

    struct Search {
        pid: u32,
        found: bool,
    }

    unsafe extern "system" fn enum_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let search = unsafe { &mut *(lparam.0 as *mut Search) };
        let mut owner = 0u32;
        unsafe { GetWindowThreadProcessId(hwnd, Some(&mut owner)) };
        if owner == search.pid && unsafe { IsWindowVisible(hwnd) }.as_bool() {
            search.found = true;
            return BOOL(0); // stop enumerating
        }
        BOOL(1)
    }

    /// Whether the process owns a visible top-level window.
    pub(super) fn has_visible_window(pid: u32) -> bool {
        let mut search = Search { pid, found: false };
        // EnumWindows reports Err when the callback stops it early; either
        // way the answer is in `search.found`.
        let _ = unsafe {
            EnumWindows(
                Some(enum_proc),
                LPARAM(std::ptr::addr_of_mut!(search) as isize),
            )
        };
        search.found
    }

    /// Whether the process's input queue went idle within `window`.
    pub(super) fn input_idle(raw: RawHandle, window: Duration) -> bool {
        let millis = u32::try_from(window.as_millis()).unwrap_or(u32::MAX);
        let result = unsafe { WaitForInputIdle(HANDLE(raw), millis) };
        result == 0
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    // The TempDir must outlive the child so the script file is not
    // unlinked before exec.
    fn spawn_script(body: &str) -> (TempDir, Child) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        let child = tokio::process::Command::new(&path).spawn().unwrap();
        (temp, child)
    }

    #[tokio::test]
    async fn exited_child_reads_as_ready() {
        let (_temp, child) = spawn_script("exit 0");
        let mut probe = NativeProbe::new(child);
        // Give the child a moment to finish.
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert_eq!(probe.observe().await, ProbeStatus::Exited);
    }

    #[tokio::test]
    async fn running_child_reads_as_not_ready() {
        let (_temp, child) = spawn_script("sleep 5");
        let mut probe = NativeProbe::new(child);
        assert_eq!(probe.observe().await, ProbeStatus::NotReady);
        // Dropping the probe drops the handle without killing the child;
        // the script ends on its own.
    }
}
