//! Command-line surface: argument definitions and workflow orchestration

pub mod orchestration;

pub use orchestration::{run_release_workflow, NextRelease, ReleasePlan, ReleaseRequest};

#[derive(clap::Parser, Debug, Clone, PartialEq)]
#[command(
    name = "git-release",
    about = "Compute the next version and changelog from conventional commits",
    long_about = "Compute the next version and changelog from conventional commits.\n\n\
                  Commit messages are read from stdin as NUL-separated records, newest first:\n\n  \
                  git log -z --format=%B v1.2.3..HEAD | git-release --branch main --tags \"$(git tag -l)\""
)]
pub struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, help = "Branch being released")]
    pub branch: String,

    #[arg(long, default_value = "", help = "Existing tag names, whitespace separated")]
    pub tags: String,

    #[arg(long = "pre-release", help = "Enable pre-release versioning based on branch name")]
    pub pre_release: bool,

    #[arg(long, value_name = "VERSION", help = "Release exactly this version")]
    pub set_version: Option<String>,

    #[arg(long, value_name = "VERSION", help = "Current version instead of the highest tag")]
    pub current_version: Option<String>,

    #[arg(
        long,
        value_name = "TEMPLATE",
        help = "Tag template with {{.Major}}, {{.Minor}}, {{.Patch}}, {{.Prerelease}}"
    )]
    pub tag_format: Option<String>,

    #[arg(long, help = "Only print the next tag name")]
    pub next_version_only: bool,

    #[arg(long, help = "Prepend release notes to the changelog file")]
    pub output_changelog: bool,

    #[arg(long, help = "Preview what would happen without writing anything")]
    pub dry_run: bool,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,
}

/// Split stdin produced by `git log -z --format=%B` into commit messages
pub fn split_commit_records(input: &str) -> Vec<String> {
    input
        .split('\0')
        .map(str::trim)
        .filter(|record| !record.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_commit_records() {
        let input = "feat: a\n\nbody\n\0fix: b\n\0\0  \0";
        assert_eq!(
            split_commit_records(input),
            vec!["feat: a\n\nbody".to_string(), "fix: b".to_string()]
        );
    }

    #[test]
    fn test_split_commit_records_empty() {
        assert!(split_commit_records("").is_empty());
    }
}
