//! Main release workflow orchestration logic
//!
//! Ties the engine together without touching git or the filesystem: the
//! caller supplies a snapshot of commits and tags, and gets back a plan it
//! can act on (or just print, in dry-run mode). Running it twice on the same
//! input yields the same plan.

use chrono::NaiveDate;

use crate::analyzer::{BumpResolver, VersionCalculator};
use crate::changelog::{ChangelogBuilder, ChangelogSection, DEFAULT_SKIP_MARKERS};
use crate::domain::branch::DEFAULT_RELEASE_BRANCHES;
use crate::domain::{
    BranchContext, BumpDecision, CommitGrammar, CommitValidation, TagSet, TagTemplate, Version,
};
use crate::error::Result;

/// Inputs for one release calculation
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRequest {
    /// Commit messages in the range being released, newest first
    pub commits: Vec<String>,

    /// Commit checked for format; defaults to the first entry of `commits`
    pub latest_commit: Option<String>,

    /// All tag names in the repository
    pub tags: TagSet,

    /// Branch being released
    pub branch: String,

    /// Force pre-release mode even on a default branch
    pub prerelease: bool,

    /// Branches that produce final releases
    pub default_branches: Vec<String>,

    /// Explicit version that replaces the calculated one
    pub version_override: Option<String>,

    /// Current version; discovered from `tags` when absent
    pub current_version: Option<String>,

    pub tag_template: TagTemplate,

    /// Build a changelog section (release lines only)
    pub changelog: bool,

    pub changelog_date: NaiveDate,

    pub skip_markers: Vec<String>,
}

impl ReleaseRequest {
    /// Request with default template, branches and skip markers
    pub fn new(
        commits: Vec<String>,
        tags: TagSet,
        branch: impl Into<String>,
        changelog_date: NaiveDate,
    ) -> Self {
        ReleaseRequest {
            commits,
            latest_commit: None,
            tags,
            branch: branch.into(),
            prerelease: false,
            default_branches: DEFAULT_RELEASE_BRANCHES
                .iter()
                .map(|b| b.to_string())
                .collect(),
            version_override: None,
            current_version: None,
            tag_template: TagTemplate::default(),
            changelog: false,
            changelog_date,
            skip_markers: DEFAULT_SKIP_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// The release that should be cut
#[derive(Debug, Clone, PartialEq)]
pub struct NextRelease {
    pub version: Version,
    pub tag: String,
    pub prerelease: bool,
    /// Absent on pre-release lines and when every commit was filtered out
    pub changelog: Option<ChangelogSection>,
}

/// Result of the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub bump: BumpDecision,
    pub current_version: Version,
    pub validation: CommitValidation,
    /// `None` when the commits call for no bump: nothing should be tagged
    pub next: Option<NextRelease>,
}

/// Main release workflow
///
/// 1. Validate the latest commit's format (verdict only, the caller decides)
/// 2. Determine the current version
/// 3. Resolve the bump from all commits; stop if it is `none`
/// 4. Pick the regime from the branch and calculate (or accept an override)
/// 5. Render the tag and, for release lines, the changelog section
pub fn run_release_workflow(request: &ReleaseRequest) -> Result<ReleasePlan> {
    let grammar = CommitGrammar::new()?;

    let validation = request
        .latest_commit
        .as_deref()
        .or(request.commits.first().map(String::as_str))
        .map(|message| grammar.validate(message))
        .unwrap_or(CommitValidation::Valid);

    let current_version = match request.current_version.as_deref() {
        Some(raw) => Version::parse(raw)?,
        None => request.tags.current_version().unwrap_or_else(Version::zero),
    };

    let bump = BumpResolver::new(&grammar).resolve(request.commits.as_slice());
    if bump == BumpDecision::None {
        tracing::info!("no version bump needed based on commit history");
        return Ok(ReleasePlan {
            bump,
            current_version,
            validation,
            next: None,
        });
    }

    let branch = BranchContext::new(request.branch.as_str(), request.default_branches.as_slice());
    let prerelease = branch.uses_prerelease(request.prerelease);

    let calculator = VersionCalculator::new(&request.tags);
    let version = match request.version_override.as_deref() {
        Some(requested) => calculator.resolve_override(requested)?,
        None => calculator.calculate(&current_version, bump, &branch.name, prerelease)?,
    };
    let tag = request.tag_template.format(&version);

    let changelog = (request.changelog && !prerelease)
        .then(|| {
            ChangelogBuilder::new(&grammar)
                .with_skip_markers(request.skip_markers.as_slice())
                .build(request.commits.as_slice(), &tag, request.changelog_date)
        })
        .filter(|section| {
            if section.is_empty() {
                tracing::debug!(%tag, "every commit was filtered out of the changelog");
            }
            !section.is_empty()
        });

    tracing::info!(%bump, %version, %tag, prerelease, "release planned");
    Ok(ReleasePlan {
        bump,
        current_version,
        validation,
        next: Some(NextRelease {
            version,
            tag,
            prerelease,
            changelog,
        }),
    })
}
