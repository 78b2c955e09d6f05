use proptest::prelude::*;
use relsync::domain::models::{Commit, IssueOrPr};
use relsync::services::{extract_issue_numbers, render_release_notes, NoteGroup, NO_CHANGES};
use std::collections::BTreeSet;

fn label_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["bug", "BUG", "enhancement", "Enhancement", "docs", "chore"]),
        0..3,
    )
    .prop_map(|labels| labels.into_iter().map(str::to_string).collect())
}

fn issue_strategy() -> impl Strategy<Value = IssueOrPr> {
    (1u64..10_000, "[A-Za-z][A-Za-z ]{0,20}", label_strategy()).prop_map(|(number, title, labels)| {
        labels
            .iter()
            .fold(IssueOrPr::issue(number, title), |issue, label| issue.with_label(label.as_str()))
    })
}

proptest! {
    /// Property: every `#<digits>` token is extracted, nothing else is
    #[test]
    fn prop_extractor_finds_every_reference(
        refs in prop::collection::vec(prop::collection::vec(0u32..100_000, 0..4), 0..6),
        filler in "[a-z :()]{0,12}",
    ) {
        let commits: Vec<Commit> = refs
            .iter()
            .enumerate()
            .map(|(i, numbers)| {
                let message = numbers
                    .iter()
                    .map(|n| format!("{filler}#{n}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                Commit::new(format!("sha{i}"), message)
            })
            .collect();

        let expected: BTreeSet<i64> = refs.iter().flatten().map(|&n| i64::from(n)).collect();
        prop_assert_eq!(extract_issue_numbers(&commits), expected);
    }

    /// Property: each issue renders exactly once, under the heading of its group
    #[test]
    fn prop_formatter_places_each_issue_once(
        issues in prop::collection::vec(issue_strategy(), 0..12)
    ) {
        let notes = render_release_notes(&issues);

        if issues.is_empty() {
            prop_assert_eq!(notes, NO_CHANGES);
            return Ok(());
        }

        let bullet_count = notes.lines().filter(|line| line.starts_with("- ")).count();
        prop_assert_eq!(bullet_count, issues.len());
        prop_assert!(!notes.contains(NO_CHANGES));

        let mut current = None;
        let mut placed = Vec::new();
        for line in notes.lines() {
            if let Some(heading) = line.strip_prefix("## ") {
                current = NoteGroup::ALL.iter().copied().find(|g| g.heading() == heading);
            } else if line.starts_with("- ") {
                placed.push((line.to_string(), current));
            }
        }
        for issue in &issues {
            let bullet = format!("- {} (#{})", issue.title, issue.number);
            let group = NoteGroup::classify(issue);
            prop_assert!(placed.iter().any(|(line, g)| line == &bullet && *g == Some(group)));
        }
    }

    /// Property: headings appear in fixed order and never empty
    #[test]
    fn prop_formatter_heading_order(issues in prop::collection::vec(issue_strategy(), 1..12)) {
        let notes = render_release_notes(&issues);
        let headings: Vec<&str> = notes.lines().filter_map(|l| l.strip_prefix("## ")).collect();

        let expected: Vec<&str> = NoteGroup::ALL
            .iter()
            .filter(|g| issues.iter().any(|i| NoteGroup::classify(i) == **g))
            .map(|g| g.heading())
            .collect();
        prop_assert_eq!(headings, expected);
    }
}

#[test]
fn test_bug_and_enhancement_lands_under_enhancements_only() {
    let issue = IssueOrPr::issue(1, "Both").with_label("enhancement").with_label("bug");
    let notes = render_release_notes(&[issue]);
    assert_eq!(notes, "## Enhancements\n- Both (#1)");
}
