//! Apps-directory discovery.
//!
//! Finds the "Apps" directory by walking up from the running executable's
//! location, enumerates its immediate executable files (excluding the
//! launcher's own binary), and resolves each known logical application
//! against the result. Discovery runs once per process lifetime; each
//! application's resolved path is set here at most once.

use launchdock_core::{CandidateExecutable, LogicalApplication, best_match};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Directory the companion applications are installed into, searched for
/// in every ancestor of the launcher's own location.
pub const APPS_DIR_NAME: &str = "Apps";

/// Errors that can occur while enumerating the Apps directory.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The directory listing itself failed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Walk up from `start` and return the first `Apps` child directory found.
pub fn find_apps_dir(start: &Path) -> Option<PathBuf> {
    find_named_dir(start, APPS_DIR_NAME)
}

/// Walk-up search: check `start` and each ancestor for a child directory
/// with the given name.
pub fn find_named_dir(start: &Path, name: &str) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Some(candidate);
        }
    }
    None
}

/// File name of the currently running executable, for self-exclusion.
pub fn current_exe_file_name() -> Option<String> {
    std::env::current_exe()
        .ok()?
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

/// Enumerate the immediate (non-recursive) executable files of `dir`,
/// excluding `exclude_file_name` case-insensitively.
///
/// Entries come back sorted by file name, so repeated passes feed the
/// resolver an identical candidate order on every platform.
pub fn list_candidates(
    dir: &Path,
    exclude_file_name: Option<&str>,
) -> Result<Vec<CandidateExecutable>, DiscoveryError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(own) = exclude_file_name {
            if file_name.eq_ignore_ascii_case(own) {
                debug!(file = %file_name, "skipping the launcher's own executable");
                continue;
            }
        }
        if !is_executable(&path) {
            continue;
        }
        candidates.push(CandidateExecutable::from_path(path));
    }

    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(candidates)
}

/// Executable filter: mode bits on unix, `.exe` extension on Windows
/// (the Apps-directory convention the launcher ships under).
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).is_ok_and(|m| m.permissions().mode() & 0o111 != 0)
    }

    #[cfg(windows)]
    {
        path.extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("exe"))
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = path;
        true
    }
}

/// Resolve each known display name against the candidate list.
pub fn discover(
    candidates: &[CandidateExecutable],
    display_names: &[&str],
) -> Vec<LogicalApplication> {
    display_names
        .iter()
        .map(|name| {
            let mut app = LogicalApplication::new(*name);
            match best_match(candidates, name) {
                Some(m) => {
                    debug!(
                        app = %app.display_name,
                        path = %m.path.display(),
                        score = m.score,
                        "resolved application"
                    );
                    app.resolved_path = Some(m.path);
                    app.match_confidence = m.score;
                }
                None => warn!(app = %app.display_name, "no acceptable executable found"),
            }
            app
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    #[cfg(unix)]
    fn write_executable(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn finds_apps_dir_in_an_ancestor() {
        let temp = TempDir::new().unwrap();
        let apps = temp.path().join("Apps");
        let nested = temp.path().join("bin/x64/release");
        std::fs::create_dir_all(&apps).unwrap();
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_apps_dir(&nested), Some(apps));
    }

    #[test]
    fn missing_apps_dir_yields_none() {
        let temp = TempDir::new().unwrap();
        // No ancestor of a fresh temp dir should carry this name.
        assert_eq!(find_named_dir(temp.path(), "Apps-launchdock-none"), None);
    }

    #[test]
    fn read_dir_failure_is_reported() {
        let err = list_candidates(Path::new("/definitely/not/a/dir"), None).unwrap_err();
        assert!(matches!(err, DiscoveryError::ReadDir { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn lists_only_executable_files_sorted() {
        let temp = TempDir::new().unwrap();
        write_executable(temp.path(), "zeta-tool");
        write_executable(temp.path(), "alpha-tool");
        std::fs::write(temp.path().join("readme.txt"), "not a program").unwrap();
        std::fs::create_dir(temp.path().join("subdir")).unwrap();
        write_executable(&temp.path().join("subdir"), "nested-tool");

        let candidates = list_candidates(temp.path(), None).unwrap();
        let stems: Vec<&str> = candidates.iter().map(|c| c.stem.as_str()).collect();
        // Non-recursive, executables only, sorted by name.
        assert_eq!(stems, vec!["alpha-tool", "zeta-tool"]);
    }

    #[test]
    #[cfg(unix)]
    fn excludes_own_executable_case_insensitively() {
        let temp = TempDir::new().unwrap();
        write_executable(temp.path(), "LaunchDock");
        write_executable(temp.path(), "mof-inspector");

        let candidates = list_candidates(temp.path(), Some("launchdock")).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].stem, "mof-inspector");
    }

    #[test]
    #[cfg(unix)]
    fn discover_resolves_known_applications() {
        let temp = TempDir::new().unwrap();
        write_executable(temp.path(), "PowerStigConverterUI");
        write_executable(temp.path(), "MOF-Inspector");

        let candidates = list_candidates(temp.path(), None).unwrap();
        let apps = discover(&candidates, &["PowerStig Converter UI", "MOF Inspector"]);

        assert_eq!(apps.len(), 2);
        assert!(apps[0].is_launchable());
        assert!(apps[0].match_confidence >= 100);
        assert!(apps[1].is_launchable());
        assert_eq!(
            apps[1].resolved_path.as_ref().unwrap().file_name().unwrap(),
            "MOF-Inspector"
        );
    }

    #[test]
    fn discover_with_no_candidates_leaves_apps_unresolved() {
        let apps = discover(&[], &["PowerStig Converter UI", "MOF Inspector"]);
        assert!(apps.iter().all(|a| a.resolved_path.is_none()));
        assert!(apps.iter().all(|a| a.match_confidence == 0));
    }
}
