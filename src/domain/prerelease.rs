//! Branch-scoped pre-release numbering
//!
//! A pre-release line is identified by the sanitized branch name and counts
//! up from zero: `1.4.0-feature-X.0`, `1.5.0-feature-X.1`, ...
//! Tags belonging to a line look like `v<major>.<minor>.<patch>-<branch>.<N>`.

use crate::domain::version::Version;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;

/// Replace every character outside `[a-zA-Z0-9-]` with `-`
///
/// # Examples
/// ```
/// use git_release::domain::prerelease::sanitize_branch;
/// assert_eq!(sanitize_branch("feature/X"), "feature-X");
/// assert_eq!(sanitize_branch("fix_login.v2"), "fix-login-v2");
/// ```
pub fn sanitize_branch(branch: &str) -> String {
    branch
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Pre-release identifier with its iteration counter, e.g. "feature-X.3"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    /// The sanitized branch name
    pub identifier: String,
    pub iteration: u64,
}

impl PreRelease {
    pub fn new(identifier: impl Into<String>, iteration: u64) -> Self {
        PreRelease {
            identifier: identifier.into(),
            iteration,
        }
    }

    /// First pre-release of a branch line (iteration 0)
    pub fn first_for_branch(branch: &str) -> Self {
        PreRelease::new(sanitize_branch(branch), 0)
    }

    /// Same line, iteration incremented by one
    pub fn next(&self) -> Result<Self> {
        let iteration = self.iteration.checked_add(1).ok_or_else(|| {
            ReleaseError::version(format!("pre-release counter exhausted for {}", self))
        })?;
        Ok(PreRelease {
            identifier: self.identifier.clone(),
            iteration,
        })
    }

    /// Attach this identifier to `base`, failing if semver rejects it
    pub fn apply_to(&self, base: &Version) -> Result<Version> {
        base.base().with_prerelease(&self.to_string())
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.identifier, self.iteration)
    }
}

/// Matcher for the tags of one branch's pre-release line
#[derive(Debug, Clone)]
pub struct BranchPrereleasePattern {
    identifier: String,
    regex: Regex,
}

impl BranchPrereleasePattern {
    /// Build the matcher for `branch` (sanitized before use)
    pub fn new(branch: &str) -> Result<Self> {
        let identifier = sanitize_branch(branch);
        let pattern = format!(r"^v\d+\.\d+\.\d+-{}\.(\d+)$", regex::escape(&identifier));
        Ok(BranchPrereleasePattern {
            identifier,
            regex: Regex::new(&pattern)?,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Version and counter of `tag` when it belongs to this line
    ///
    /// Tags that look right but are not valid semver (e.g. a counter with a
    /// leading zero) are rejected.
    pub fn match_tag(&self, tag: &str) -> Option<(Version, PreRelease)> {
        let captures = self.regex.captures(tag)?;
        let iteration = captures.get(1)?.as_str().parse::<u64>().ok()?;
        let version = Version::parse(tag).ok()?;
        Some((version, PreRelease::new(self.identifier.clone(), iteration)))
    }
}
