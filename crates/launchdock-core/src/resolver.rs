//! Fuzzy matching of discovered executables to logical application names.
//!
//! Pure and deterministic: scoring never touches the filesystem. Callers
//! supply the candidate list (directory enumeration and self-exclusion are
//! the discovery module's job in `launchdock-runtime`).

use crate::domain::CandidateExecutable;
use std::path::PathBuf;
use tracing::debug;

/// Minimum score an accepted match must reach: one substring containment
/// hit or at least one shared token.
pub const MATCH_THRESHOLD: i32 = 10;

/// Candidate's normalized name contains the full normalized target.
const SUBSTRING_SCORE: i32 = 100;
/// Per target token also present among the candidate's tokens.
const TOKEN_SCORE: i32 = 10;
/// Candidate's first token starts with the target's first token.
const PREFIX_SCORE: i32 = 5;

/// Delimiters that separate name tokens.
const DELIMITERS: &[char] = &[' ', '.', '-', '_', '+'];

/// A candidate that cleared the acceptance threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Path of the winning candidate.
    pub path: PathBuf,
    /// Its similarity score, suitable for `LogicalApplication::match_confidence`.
    pub score: i32,
}

/// Retain only alphanumeric characters, lowercased.
///
/// "PowerStig Converter UI" becomes "powerstigconverterui".
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split on the delimiter set, discarding empty tokens, lowercasing each.
fn tokenize(s: &str) -> Vec<String> {
    s.split(DELIMITERS)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Score one candidate against the pre-normalized target.
fn score_candidate(
    candidate: &CandidateExecutable,
    target_norm: &str,
    target_tokens: &[String],
) -> i32 {
    let name_norm = normalize(&candidate.stem);
    let name_tokens = tokenize(&candidate.stem);

    let mut score = 0;

    // An empty target normalizes into every name; that must not count as
    // containment.
    if !target_norm.is_empty() && name_norm.contains(target_norm) {
        score += SUBSTRING_SCORE;
    }

    // Iterate target tokens so duplicated target tokens each count.
    let overlap = target_tokens
        .iter()
        .filter(|t| name_tokens.contains(*t))
        .count();
    score += overlap as i32 * TOKEN_SCORE;

    if let (Some(target_first), Some(name_first)) = (target_tokens.first(), name_tokens.first()) {
        if name_first.starts_with(target_first.as_str()) {
            score += PREFIX_SCORE;
        }
    }

    score
}

/// Score every candidate against a display name and keep the best.
///
/// Ties keep the earliest candidate in input order: the comparison is
/// strict, so an equal later score never displaces an earlier winner.
/// Returns `None` unless the winner reaches [`MATCH_THRESHOLD`].
pub fn best_match(candidates: &[CandidateExecutable], target_display_name: &str) -> Option<Match> {
    let target_norm = normalize(target_display_name);
    let target_tokens = tokenize(target_display_name);

    let mut best: Option<Match> = None;
    let mut best_score = i32::MIN;

    for candidate in candidates {
        let score = score_candidate(candidate, &target_norm, &target_tokens);
        debug!(candidate = %candidate.stem, target = %target_display_name, score, "scored candidate");

        if score > best_score {
            best_score = score;
            best = Some(Match {
                path: candidate.path.clone(),
                score,
            });
        }
    }

    best.filter(|m| m.score >= MATCH_THRESHOLD)
}

/// Resolve a display name to the best-matching executable path, if any
/// candidate clears the acceptance threshold.
pub fn resolve(candidates: &[CandidateExecutable], target_display_name: &str) -> Option<PathBuf> {
    best_match(candidates, target_display_name).map(|m| m.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<CandidateExecutable> {
        names
            .iter()
            .map(|n| CandidateExecutable::from_path(format!("/apps/{n}")))
            .collect()
    }

    #[test]
    fn normalize_strips_and_lowercases() {
        assert_eq!(normalize("PowerStig Converter UI"), "powerstigconverterui");
        assert_eq!(normalize("MOF-Inspector"), "mofinspector");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn tokenize_splits_on_delimiter_set() {
        assert_eq!(
            tokenize("a b.c-d_e+f"),
            vec!["a", "b", "c", "d", "e", "f"]
        );
        assert_eq!(tokenize("MOF  Inspector"), vec!["mof", "inspector"]);
        assert!(tokenize("...").is_empty());
    }

    #[test]
    fn substring_match_resolves_converter_ui() {
        let cands = candidates(&["PowerStigConverterUI.exe", "MOF-Inspector.exe"]);
        let m = best_match(&cands, "PowerStig Converter UI").unwrap();
        assert_eq!(m.path, PathBuf::from("/apps/PowerStigConverterUI.exe"));
        assert!(m.score >= 100);
    }

    #[test]
    fn substring_match_inside_longer_name() {
        // "mofinspector" is a substring of "mofinspectortool"
        let cands = candidates(&["MOFInspectorTool.exe"]);
        let m = best_match(&cands, "MOF Inspector").unwrap();
        assert!(m.score >= 100);
    }

    #[test]
    fn empty_candidate_list_is_not_found() {
        assert_eq!(resolve(&[], "PowerStig Converter UI"), None);
    }

    #[test]
    fn unrelated_candidate_scores_zero() {
        let cands = candidates(&["Unrelated.exe"]);
        assert_eq!(resolve(&cands, "Foo Bar"), None);
    }

    #[test]
    fn threshold_rejects_prefix_only_match() {
        // First-token prefix alone scores 5, below the threshold.
        let cands = candidates(&["Powerful-Unrelated-Tool.exe"]);
        assert_eq!(score_candidate(&cands[0], &normalize("Power Up"), &tokenize("Power Up")), 5);
        assert_eq!(resolve(&cands, "Power Up"), None);
    }

    #[test]
    fn single_shared_token_meets_threshold() {
        let cands = candidates(&["Inspector-Gadget.exe"]);
        let m = best_match(&cands, "Gadget Supreme").unwrap();
        assert_eq!(m.score, 10);
    }

    #[test]
    fn duplicate_target_tokens_each_count() {
        let cands = candidates(&["echo-tool.exe"]);
        // "echo" appears twice among the target tokens; both count.
        let score = score_candidate(&cands[0], &normalize("echo echo"), &tokenize("echo echo"));
        assert_eq!(score, 2 * 10 + 5);
    }

    #[test]
    fn substring_dominates_token_overlap() {
        // Second candidate shares two tokens (20 + prefix 5); the first
        // contains the whole target and must win.
        let cands = candidates(&["PowerStigConverterUI.exe", "PowerStig-Converter-Extras.exe"]);
        let m = best_match(&cands, "PowerStig Converter UI").unwrap();
        assert_eq!(m.path, PathBuf::from("/apps/PowerStigConverterUI.exe"));
    }

    #[test]
    fn ties_keep_the_earlier_candidate() {
        let cands = candidates(&["MOF-First.exe", "MOF-Second.exe"]);
        let m = best_match(&cands, "MOF Viewer").unwrap();
        assert_eq!(m.path, PathBuf::from("/apps/MOF-First.exe"));
    }

    #[test]
    fn resolve_is_deterministic() {
        let cands = candidates(&["Alpha-Tool.exe", "Beta-Tool.exe", "Gamma-Tool.exe"]);
        let first = resolve(&cands, "Beta Tool");
        for _ in 0..10 {
            assert_eq!(resolve(&cands, "Beta Tool"), first);
        }
    }

    #[test]
    fn target_without_alphanumeric_content_is_not_found() {
        let cands = candidates(&["PowerStigConverterUI.exe"]);
        assert_eq!(resolve(&cands, "+++"), None);
    }
}
