//! Repository name canonicalization
//!
//! Override keys may be written as plain names (`reposettings`), owner/name
//! pairs (`txqueuelen/reposettings`) or repository URLs
//! (`https://github.com/txqueuelen/reposettings.git`). All of them are reduced
//! to the same key so that lookups and duplicate detection agree.

use std::sync::LazyLock;

use regex::Regex;

static HOST_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:https?://)?(?:www\.)?github\.com/+").unwrap());

/// Reduce a repository identifier to its canonical `owner/name` (or `name`) form.
///
/// Stripping repeats until nothing changes, so a canonical name maps to
/// itself. The result is empty when the input names no repository at all.
pub fn canonical_repo_name(raw: &str) -> String {
    let mut name = raw.trim().to_string();
    loop {
        let stripped = strip_once(&name);
        if stripped == name {
            return name;
        }
        name = stripped;
    }
}

fn strip_once(name: &str) -> String {
    let without_host = HOST_PREFIX.replace(name.trim(), "");
    let without_slash = without_host.trim_end_matches('/');
    without_slash
        .strip_suffix(".git")
        .unwrap_or(without_slash)
        .to_string()
}
