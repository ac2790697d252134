//! Core domain types and ports for launchdock.
//!
//! Everything here is pure by construction: resolution is a deterministic
//! function of its inputs, and all I/O (directory enumeration, process
//! control) lives behind ports implemented in `launchdock-runtime`.

pub mod domain;
pub mod events;
pub mod probe;
pub mod resolver;

// Re-export commonly used types for convenience
pub use domain::{CandidateExecutable, LogicalApplication};
pub use events::{LaunchObserver, LaunchOutcome, LaunchState, NoopObserver, format_elapsed};
pub use probe::{ProbeStatus, ReadinessProbe};
pub use resolver::{MATCH_THRESHOLD, Match, best_match, resolve};
