//! Markdown release notes grouped by label.

use crate::domain::models::IssueOrPr;

/// Rendered when no group has any entry.
pub const NO_CHANGES: &str = "No changes in this release.";

/// Release note sections in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteGroup {
    Enhancements,
    BugFixes,
    Others,
}

impl NoteGroup {
    pub const ALL: [Self; 3] = [Self::Enhancements, Self::BugFixes, Self::Others];

    pub const fn heading(self) -> &'static str {
        match self {
            Self::Enhancements => "Enhancements",
            Self::BugFixes => "Bug Fixes",
            Self::Others => "Others",
        }
    }

    /// Group of an issue; the first matching group wins.
    pub fn classify(issue: &IssueOrPr) -> Self {
        if issue.has_label("enhancement") {
            Self::Enhancements
        } else if issue.has_label("bug") {
            Self::BugFixes
        } else {
            Self::Others
        }
    }
}

/// Bullet line for one issue.
pub fn bullet(issue: &IssueOrPr) -> String {
    format!("- {} (#{})", issue.title, issue.number)
}

/// Render `issues` as Markdown.
///
/// Each non-empty group becomes a `## <heading>` followed by its bullets in
/// input order. Groups are separated by a blank line and empty groups are
/// omitted.
pub fn render_release_notes(issues: &[IssueOrPr]) -> String {
    let sections: Vec<String> = NoteGroup::ALL
        .iter()
        .filter_map(|&group| {
            let bullets: Vec<String> = issues
                .iter()
                .filter(|issue| NoteGroup::classify(issue) == group)
                .map(bullet)
                .collect();
            if bullets.is_empty() {
                None
            } else {
                Some(format!("## {}\n{}", group.heading(), bullets.join("\n")))
            }
        })
        .collect();

    if sections.is_empty() {
        NO_CHANGES.to_string()
    } else {
        sections.join("\n\n")
    }
}
