//! CLI entry point - the composition root.
//!
//! This is the only place where discovery, the launch supervisor, and
//! the terminal presentation are wired together. Discovery runs exactly
//! once per process lifetime, before command dispatch.

use anyhow::{Context, bail};
use clap::Parser;
use launchdock_cli::{Cli, Commands, DOWNLOAD_URL, KNOWN_APPLICATIONS, SpinnerObserver};
use launchdock_core::{LaunchOutcome, LogicalApplication};
use launchdock_runtime::{
    LaunchConfig, LaunchSupervisor, current_exe_file_name, discover, find_apps_dir,
    list_candidates,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let apps = discover_applications(&start_dir)?;
    debug!(count = apps.len(), "discovery complete");

    match cli.command {
        Commands::List => {
            for app in &apps {
                match &app.resolved_path {
                    Some(path) => println!("{}  ->  {}", app.display_name, path.display()),
                    None => println!("{} (not found)", app.display_name),
                }
            }
            Ok(())
        }
        Commands::Launch { name, timeout_secs } => {
            let Some(app) = apps
                .iter()
                .find(|a| a.display_name.eq_ignore_ascii_case(&name))
            else {
                bail!(
                    "Unknown application {name:?}. Known applications: {}",
                    KNOWN_APPLICATIONS.join(", ")
                );
            };

            // An unresolved application flows through as an empty path;
            // the supervisor turns it into NotFound without a start
            // attempt.
            let path = app.resolved_path.clone().unwrap_or_default();
            let supervisor = LaunchSupervisor::new(LaunchConfig {
                readiness_timeout: Duration::from_secs(timeout_secs),
                ..LaunchConfig::default()
            });

            let observer = SpinnerObserver::new();
            let outcome = supervisor.launch(&path, &observer).await;
            report_outcome(&app.display_name, &outcome);

            if !outcome.proceed_as_ready() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Locate the Apps directory and resolve every known application once.
///
/// A missing Apps directory is not an error: every application simply
/// reports as not found, the same as an empty directory.
fn discover_applications(start_dir: &Path) -> anyhow::Result<Vec<LogicalApplication>> {
    let Some(apps_dir) = find_apps_dir(start_dir) else {
        return Ok(KNOWN_APPLICATIONS
            .iter()
            .map(|n| LogicalApplication::new(*n))
            .collect());
    };

    let own_name = current_exe_file_name();
    let candidates = list_candidates(&apps_dir, own_name.as_deref())
        .with_context(|| format!("enumerating {}", apps_dir.display()))?;
    Ok(discover(&candidates, KNOWN_APPLICATIONS))
}

/// Report a terminal outcome to the user. Success is silent.
fn report_outcome(display_name: &str, outcome: &LaunchOutcome) {
    match outcome {
        LaunchOutcome::Ready => {}
        LaunchOutcome::TimedOut => {
            eprintln!("{display_name} is taking a while to show its window; proceeding anyway.");
        }
        LaunchOutcome::NotFound { path } => {
            let shown = path
                .as_ref()
                .map_or_else(|| "(no path resolved)".to_string(), |p| p.display().to_string());
            eprintln!("{display_name} wasn't found at: {shown}");
            eprintln!();
            eprintln!("Please download the app you are missing from:");
            eprintln!("{DOWNLOAD_URL}");
            eprintln!();
            eprintln!(
                "Open the repository for the app, go to the Releases page, and download \
                 the binary from the Assets section. Place it into an 'Apps' folder next \
                 to the launcher."
            );
        }
        LaunchOutcome::StartFailed { reason } => {
            eprintln!("Failed to launch {display_name}: {reason}");
        }
    }
}
