//! Domain types for application discovery and launch.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An executable found on disk during a discovery pass.
///
/// Ephemeral: enumerated fresh from the filesystem each pass, with no
/// identity beyond its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateExecutable {
    /// Path to the executable.
    pub path: PathBuf,
    /// File name without its extension, used for name matching.
    pub stem: String,
}

impl CandidateExecutable {
    /// Build a candidate from a path, deriving the matching stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Self { path, stem }
    }
}

/// A named external program the launcher is configured to find and start.
///
/// Created once per known application at discovery time. `resolved_path`
/// is set at most once per discovery pass; the file existed at resolution
/// time but may disappear later, so callers re-check before launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalApplication {
    /// Human-readable target name (e.g. "MOF Inspector").
    pub display_name: String,
    /// Best on-disk match, when one cleared the acceptance threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<PathBuf>,
    /// Score of the accepted match (0 when unresolved).
    pub match_confidence: i32,
}

impl LogicalApplication {
    /// Create an unresolved application entry.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            resolved_path: None,
            match_confidence: 0,
        }
    }

    /// True if a path was resolved and the file still exists on disk.
    pub fn is_launchable(&self) -> bool {
        self.resolved_path.as_deref().is_some_and(Path::exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_stem_drops_extension() {
        let c = CandidateExecutable::from_path("/apps/MOF-Inspector.exe");
        assert_eq!(c.stem, "MOF-Inspector");
        assert_eq!(c.path, PathBuf::from("/apps/MOF-Inspector.exe"));
    }

    #[test]
    fn candidate_stem_without_extension() {
        let c = CandidateExecutable::from_path("/apps/mof-inspector");
        assert_eq!(c.stem, "mof-inspector");
    }

    #[test]
    fn unresolved_application_is_not_launchable() {
        let app = LogicalApplication::new("MOF Inspector");
        assert!(app.resolved_path.is_none());
        assert_eq!(app.match_confidence, 0);
        assert!(!app.is_launchable());
    }

    #[test]
    fn resolved_path_must_still_exist_to_be_launchable() {
        let mut app = LogicalApplication::new("MOF Inspector");
        app.resolved_path = Some(PathBuf::from("/definitely/not/here.exe"));
        app.match_confidence = 100;
        assert!(!app.is_launchable());
    }

    #[test]
    fn application_serializes_camel_case() {
        let app = LogicalApplication::new("MOF Inspector");
        let json = serde_json::to_string(&app).unwrap();
        assert!(json.contains("\"displayName\":\"MOF Inspector\""));
        assert!(json.contains("\"matchConfidence\":0"));
        // Unresolved path is omitted entirely
        assert!(!json.contains("resolvedPath"));
    }
}
