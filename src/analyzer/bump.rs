use crate::domain::{BumpDecision, CommitGrammar, CommitRecord, CommitType, ParsedCommit};
use std::ops::ControlFlow;
use tracing::debug;

/// Bump implied by a single commit on its own
pub fn commit_bump(commit: &CommitRecord) -> BumpDecision {
    if commit.breaking {
        return BumpDecision::Major;
    }
    match commit.commit_type {
        CommitType::Feat => BumpDecision::Minor,
        CommitType::Fix => BumpDecision::Patch,
        _ => BumpDecision::None,
    }
}

/// Reduces a commit range to one bump decision
pub struct BumpResolver<'g> {
    grammar: &'g CommitGrammar,
}

impl<'g> BumpResolver<'g> {
    pub fn new(grammar: &'g CommitGrammar) -> Self {
        BumpResolver { grammar }
    }

    /// Bump contributed by one raw message; merges and non-conforming
    /// messages contribute nothing
    pub fn message_bump(&self, message: &str) -> BumpDecision {
        match self.grammar.parse(message) {
            ParsedCommit::Conventional(record) => commit_bump(&record),
            ParsedCommit::Merge => BumpDecision::None,
            ParsedCommit::Unrecognized { first_line } => {
                debug!(commit = %first_line, "ignoring non-conventional commit for bump");
                BumpDecision::None
            }
        }
    }

    /// Fold the messages into a decision, stopping at the first breaking change
    pub fn resolve<S: AsRef<str>>(&self, messages: &[S]) -> BumpDecision {
        let folded = messages
            .iter()
            .try_fold(BumpDecision::None, |decision, message| {
                let next = decision.join(self.message_bump(message.as_ref()));
                if next == BumpDecision::Major {
                    ControlFlow::Break(next)
                } else {
                    ControlFlow::Continue(next)
                }
            });

        let decision = match folded {
            ControlFlow::Break(d) | ControlFlow::Continue(d) => d,
        };
        debug!(commits = messages.len(), %decision, "resolved version bump");
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(messages: &[&str]) -> BumpDecision {
        let grammar = CommitGrammar::new().unwrap();
        BumpResolver::new(&grammar).resolve(messages)
    }

    #[test]
    fn test_resolve_major() {
        assert_eq!(
            resolve(&["feat: new feature", "fix(api)!: breaking change"]),
            BumpDecision::Major
        );
    }

    #[test]
    fn test_resolve_minor() {
        assert_eq!(
            resolve(&["feat: new feature", "fix: bug fix"]),
            BumpDecision::Minor
        );
    }

    #[test]
    fn test_resolve_fix_after_feat_keeps_minor() {
        assert_eq!(
            resolve(&["fix: bug fix", "feat: new feature", "fix: another"]),
            BumpDecision::Minor
        );
    }

    #[test]
    fn test_resolve_patch() {
        assert_eq!(
            resolve(&["fix: bug fix", "refactor: code cleanup", "perf: faster"]),
            BumpDecision::Patch
        );
    }

    #[test]
    fn test_resolve_none_for_non_bumping_types() {
        assert_eq!(
            resolve(&[
                "docs: update readme",
                "chore: update deps",
                "style: format code",
                "test: add tests",
                "refactor: extract module",
                "perf: cache results",
                "build: bump toolchain",
                "ci: cache cargo",
                "revert: undo thing",
            ]),
            BumpDecision::None
        );
    }

    #[test]
    fn test_resolve_empty() {
        assert_eq!(resolve(&[]), BumpDecision::None);
        assert_eq!(resolve(&[""]), BumpDecision::None);
    }

    #[test]
    fn test_resolve_breaking_change_via_footer() {
        assert_eq!(
            resolve(&["docs: rename API field\n\nBREAKING CHANGE: field changed from X to Y"]),
            BumpDecision::Major
        );
    }

    #[test]
    fn test_resolve_ignores_merges_and_non_conventional() {
        assert_eq!(
            resolve(&[
                "Merge branch 'feat: sneaky' into main",
                "Updated stuff",
                "feat add thing without colon",
                "fix: real fix",
            ]),
            BumpDecision::Patch
        );
    }

    #[test]
    fn test_resolve_non_conventional_breaking_marker_ignored() {
        // Only commits that follow the grammar are scored
        assert_eq!(
            resolve(&["Rewrite everything\n\nBREAKING CHANGE: all of it"]),
            BumpDecision::None
        );
    }

    #[test]
    fn test_resolve_major_release_scenario() {
        assert_eq!(
            resolve(&[
                "feat(core)!: rewrite core engine",
                "feat(auth): add oauth2",
                "fix: various bugs",
            ]),
            BumpDecision::Major
        );
    }

    #[test]
    fn test_resolve_accepts_owned_strings() {
        let grammar = CommitGrammar::new().unwrap();
        let messages = vec!["feat(api): add endpoint".to_string()];
        assert_eq!(
            BumpResolver::new(&grammar).resolve(&messages),
            BumpDecision::Minor
        );
    }

    #[test]
    fn test_commit_bump_breaking_overrides_type() {
        let grammar = CommitGrammar::new().unwrap();
        let ParsedCommit::Conventional(record) = grammar.parse("chore!: drop node 14") else {
            panic!("expected conventional commit");
        };
        assert_eq!(commit_bump(&record), BumpDecision::Major);
    }
}
