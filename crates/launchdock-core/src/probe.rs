//! Readiness probe port.
//!
//! A freshly spawned GUI process has no formal readiness protocol; the
//! available signals (exit, a visible top-level window, an idle input
//! queue) are best-effort and platform-specific. Core owns the port and
//! `launchdock-runtime` owns the implementations, so alternate platforms
//! can supply different probes without touching the polling and timeout
//! logic.

use async_trait::async_trait;

/// One best-effort observation of a launched process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The process already exited. Degenerate but valid: a fire-and-forget
    /// helper that exits immediately still counts as launched.
    Exited,
    /// A top-level window is up. The supervisor lets rendering settle
    /// briefly before declaring readiness.
    WindowShown,
    /// The process reported an idle input queue.
    InputIdle,
    /// No readiness signal yet.
    NotReady,
}

impl ProbeStatus {
    /// Whether this observation ends the poll loop successfully.
    pub const fn is_ready(self) -> bool {
        !matches!(self, Self::NotReady)
    }
}

/// Port for taking readiness observations of a launched process.
///
/// Implementations must absorb platform failures and report `NotReady`
/// instead of erroring: only the supervisor's deadline may end the poll
/// loop.
#[async_trait]
pub trait ReadinessProbe: Send {
    /// Take one observation.
    async fn observe(&mut self) -> ProbeStatus;
}
