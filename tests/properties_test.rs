// tests/properties_test.rs
use git_release::analyzer::BumpResolver;
use git_release::domain::{BumpDecision, CommitGrammar, CommitType, TagTemplate, Version};
use proptest::prelude::*;

const NON_BUMPING: [CommitType; 9] = [
    CommitType::Docs,
    CommitType::Style,
    CommitType::Refactor,
    CommitType::Perf,
    CommitType::Test,
    CommitType::Build,
    CommitType::Ci,
    CommitType::Chore,
    CommitType::Revert,
];

fn resolve(messages: &[String]) -> BumpDecision {
    let grammar = CommitGrammar::new().unwrap();
    BumpResolver::new(&grammar).resolve(messages)
}

fn subject() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,20}"
}

fn commit_of(types: &'static [CommitType]) -> impl Strategy<Value = String> {
    (prop::sample::select(types), subject(), prop::option::of("[a-z]{1,8}")).prop_map(
        |(commit_type, subject, scope)| match scope {
            Some(scope) => format!("{}({}): {}", commit_type, scope, subject),
            None => format!("{}: {}", commit_type, subject),
        },
    )
}

fn any_commit() -> impl Strategy<Value = String> {
    commit_of(&CommitType::ALL)
}

fn breaking_commit() -> impl Strategy<Value = String> {
    (prop::sample::select(CommitType::ALL.to_vec()), subject(), any::<bool>()).prop_map(
        |(commit_type, subject, bang)| {
            if bang {
                format!("{}!: {}", commit_type, subject)
            } else {
                format!("{}: {}\n\nBREAKING CHANGE: {}", commit_type, subject, subject)
            }
        },
    )
}

/// Merge commits and free-form messages that never match the grammar
fn noise() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{0,20}".prop_map(|s| format!("Merge branch '{}'", s)),
        "[A-Z][a-z ]{0,20}",
    ]
}

proptest! {
    #[test]
    fn breaking_commit_always_major(
        mut commits in prop::collection::vec(any_commit(), 0..10),
        breaking in breaking_commit(),
        position in any::<prop::sample::Index>(),
    ) {
        let at = position.index(commits.len() + 1);
        commits.insert(at, breaking);
        prop_assert_eq!(resolve(&commits), BumpDecision::Major);
    }

    #[test]
    fn fixes_without_features_are_patch(
        mut commits in prop::collection::vec(commit_of(&NON_BUMPING), 0..10),
        fix in commit_of(&[CommitType::Fix]),
        position in any::<prop::sample::Index>(),
    ) {
        let at = position.index(commits.len() + 1);
        commits.insert(at, fix);
        prop_assert_eq!(resolve(&commits), BumpDecision::Patch);
    }

    #[test]
    fn non_bumping_types_are_none(
        commits in prop::collection::vec(commit_of(&NON_BUMPING), 0..10),
    ) {
        prop_assert_eq!(resolve(&commits), BumpDecision::None);
    }

    #[test]
    fn feature_is_at_least_minor(
        mut commits in prop::collection::vec(any_commit(), 0..10),
        feat in commit_of(&[CommitType::Feat]),
        position in any::<prop::sample::Index>(),
    ) {
        let at = position.index(commits.len() + 1);
        commits.insert(at, feat);
        prop_assert!(resolve(&commits) >= BumpDecision::Minor);
    }

    #[test]
    fn noise_never_changes_the_bump(
        commits in prop::collection::vec(any_commit(), 0..8),
        extra in prop::collection::vec((noise(), any::<prop::sample::Index>()), 0..6),
    ) {
        let expected = resolve(&commits);
        let mut noisy = commits.clone();
        for (message, position) in extra {
            let at = position.index(noisy.len() + 1);
            noisy.insert(at, message);
        }
        prop_assert_eq!(resolve(&noisy), expected);
    }

    #[test]
    fn bump_never_lowers_the_version(
        major in 0u64..1000,
        minor in 0u64..1000,
        patch in 0u64..1000,
        decision in prop::sample::select(vec![
            BumpDecision::Patch,
            BumpDecision::Minor,
            BumpDecision::Major,
        ]),
    ) {
        let current = Version::new(major, minor, patch);
        prop_assert!(current.bump(decision).unwrap() > current);
    }

    #[test]
    fn default_tag_round_trips(
        major in 0u64..10_000,
        minor in 0u64..10_000,
        patch in 0u64..10_000,
        pre in prop::option::of("[a-z][a-z0-9]{0,5}(\\.[1-9][0-9]{0,3})?"),
    ) {
        let mut version = Version::new(major, minor, patch);
        if let Some(pre) = &pre {
            version = version.with_prerelease(pre).unwrap();
        }
        let tag = TagTemplate::default().format(&version);
        prop_assert_eq!(Version::parse(&tag).unwrap(), version);
    }
}
