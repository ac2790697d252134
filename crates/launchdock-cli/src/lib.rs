//! CLI surface for launchdock: argument definitions and the terminal
//! busy indicator. `main.rs` is the composition root that wires these to
//! discovery and the launch supervisor.

mod spinner;

use clap::{Parser, Subcommand};

pub use spinner::SpinnerObserver;

/// Known companion applications, matched fuzzily against the Apps
/// directory contents at startup.
pub const KNOWN_APPLICATIONS: &[&str] = &["PowerStig Converter UI", "MOF Inspector"];

/// Where to obtain a missing companion application: open the app's
/// repository, go to Releases, and download the binary from Assets.
pub const DOWNLOAD_URL: &str = "https://github.com/MrasmussenGit";

#[derive(Debug, Parser)]
#[command(
    name = "launchdock",
    version,
    about = "Finds companion applications in a sibling Apps directory and launches them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show discovery results for every known application
    List,
    /// Launch an application by display name
    Launch {
        /// Display name, e.g. "MOF Inspector" (case-insensitive)
        name: String,
        /// Seconds to wait for the application's UI before proceeding anyway
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
}
