#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Slugs, operation identifiers and the fixed module → group mapping.

use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

/// Module id of the back-office API in the source system.
pub const MANAGEMENT_MODULE_ID: i64 = 6660656;

/// Token used when a slug would otherwise be empty.
pub const FALLBACK_SLUG: &str = "endpoint";

/// Top-level output partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiGroup {
    /// Relay / model-facing API. Default for unknown modules.
    AiModel,
    /// Back-office management API.
    Management,
}

impl ApiGroup {
    /// Maps a source module id to its group. Unknown ids fall into [`ApiGroup::AiModel`].
    pub fn from_module_id(module_id: Option<i64>) -> Self {
        match module_id {
            Some(MANAGEMENT_MODULE_ID) => ApiGroup::Management,
            _ => ApiGroup::AiModel,
        }
    }

    /// Directory name of the group.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiGroup::AiModel => "ai-model",
            ApiGroup::Management => "management",
        }
    }
}

impl fmt::Display for ApiGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase, URL-scheme-free, hyphen-separated slug.
///
/// e.g. `GET /v1/Chat Completions` -> `get-v1-chat-completions`
pub fn slugify(input: &str) -> String {
    static SCHEME_RE: OnceLock<Regex> = OnceLock::new();
    static NON_ALNUM_RE: OnceLock<Regex> = OnceLock::new();
    let scheme_re = SCHEME_RE.get_or_init(|| Regex::new(r"https?://").expect("Invalid regex"));
    let non_alnum_re =
        NON_ALNUM_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex"));

    let lowered = input.trim().to_lowercase();
    let without_scheme = scheme_re.replace_all(&lowered, "");
    let hyphenated = non_alnum_re.replace_all(&without_scheme, "-");
    let slug = hyphenated.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Candidate operation id before de-duplication.
///
/// Uses the trimmed hint when present, else `<method>-<path>` with braces
/// stripped and slash runs collapsed.
pub fn operation_id_candidate(hint: Option<&str>, method: &str, path: &str) -> String {
    static SLASHES_RE: OnceLock<Regex> = OnceLock::new();
    let slashes_re = SLASHES_RE.get_or_init(|| Regex::new(r"/+").expect("Invalid regex"));

    let base = match hint.map(str::trim) {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => {
            let raw = format!("{}-{}", method, path).replace(['{', '}'], "");
            slashes_re.replace_all(&raw, "-").into_owned()
        }
    };
    slugify(&base)
}

/// Run-wide accumulator of operation identifiers.
///
/// The first endpoint claiming an id gets it bare; later ones are suffixed
/// with their endpoint id.
#[derive(Debug, Default)]
pub struct OperationIds {
    used: HashSet<String>,
}

impl OperationIds {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a unique id derived from `candidate`.
    pub fn claim(&mut self, candidate: &str, endpoint_id: i64) -> String {
        if self.used.insert(candidate.to_string()) {
            return candidate.to_string();
        }

        let suffixed = format!("{}-{}", candidate, endpoint_id);
        if self.used.insert(suffixed.clone()) {
            return suffixed;
        }

        // Only reachable when a hint already ends in another endpoint's id.
        let mut n = 2;
        loop {
            let next = format!("{}-{}", suffixed, n);
            if self.used.insert(next.clone()) {
                return next;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Create Chat Completion"), "create-chat-completion");
        assert_eq!(slugify("  --Hello__World--  "), "hello-world");
        assert_eq!(slugify("https://api.example.com/v1"), "api-example-com-v1");
        assert_eq!(slugify("对话"), FALLBACK_SLUG);
        assert_eq!(slugify(""), FALLBACK_SLUG);
    }

    #[test]
    fn test_candidate_from_hint() {
        assert_eq!(
            operation_id_candidate(Some("  listModels "), "get", "/v1/models"),
            "listmodels"
        );
    }

    #[test]
    fn test_candidate_from_method_and_path() {
        assert_eq!(
            operation_id_candidate(None, "get", "/users/{id}"),
            "get-users-id"
        );
        assert_eq!(
            operation_id_candidate(Some("   "), "post", "//v1//chat/completions"),
            "post-v1-chat-completions"
        );
    }

    #[test]
    fn test_claim_suffixes_duplicates() {
        let mut ids = OperationIds::new();
        assert_eq!(ids.claim("list-users", 1), "list-users");
        assert_eq!(ids.claim("list-users", 2), "list-users-2");
        assert_eq!(ids.claim("list-users", 3), "list-users-3");
        assert_eq!(ids.claim("list-users", 3), "list-users-3-2");
    }

    #[test]
    fn test_claim_never_repeats() {
        let mut ids = OperationIds::new();
        // "a-5" is taken by a hint before endpoint 5 collides on "a".
        assert_eq!(ids.claim("a-5", 1), "a-5");
        assert_eq!(ids.claim("a", 4), "a");
        assert_eq!(ids.claim("a", 5), "a-5-2");
        assert_eq!(ids.claim("a-5-2", 6), "a-5-2-6");
    }

    #[test]
    fn test_group_mapping() {
        assert_eq!(ApiGroup::from_module_id(Some(MANAGEMENT_MODULE_ID)), ApiGroup::Management);
        assert_eq!(ApiGroup::from_module_id(Some(6656265)), ApiGroup::AiModel);
        assert_eq!(ApiGroup::from_module_id(None), ApiGroup::AiModel);
        assert_eq!(ApiGroup::Management.to_string(), "management");
    }
}
