//! Process runtime and OS-level concerns for launchdock.
//!
//! This crate implements the ports defined in `launchdock-core`:
//! Apps-directory discovery (walk-up search, executable enumeration,
//! self-exclusion) and the launch supervisor with its native readiness
//! probes.

pub mod discovery;
pub mod probes;
pub mod supervisor;

// Re-export the discovery entry points
pub use discovery::{
    APPS_DIR_NAME, DiscoveryError, current_exe_file_name, discover, find_apps_dir, find_named_dir,
    list_candidates,
};

// Re-export the supervisor and its default probe
pub use probes::NativeProbe;
pub use supervisor::{LaunchConfig, LaunchSupervisor};
