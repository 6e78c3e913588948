use crate::domain::{BranchPrereleasePattern, BumpDecision, PreRelease, TagSet, Version};
use crate::error::{ReleaseError, Result};
use tracing::debug;

/// Applies a bump decision to the current version
///
/// Works purely on the tag snapshot it was built with; it never looks
/// anything up while calculating.
pub struct VersionCalculator<'t> {
    tags: &'t TagSet,
}

impl<'t> VersionCalculator<'t> {
    pub fn new(tags: &'t TagSet) -> Self {
        VersionCalculator { tags }
    }

    /// Compute the next version
    ///
    /// Release regime: bump `current` (a `none` decision bumps the patch).
    /// Pre-release regime: continue the branch's line from its highest tag, or
    /// start a new line at the latest release without bumping.
    pub fn calculate(
        &self,
        current: &Version,
        bump: BumpDecision,
        branch: &str,
        prerelease: bool,
    ) -> Result<Version> {
        if !prerelease {
            let decision = match bump {
                BumpDecision::None => BumpDecision::Patch,
                other => other,
            };
            let next = current.bump(decision)?;
            debug!(%current, %decision, %next, "release version calculated");
            return Ok(next);
        }

        let pattern = BranchPrereleasePattern::new(branch)?;
        match self.tags.highest_branch_prerelease(&pattern) {
            Some((highest, line)) => {
                debug!(%highest, iteration = line.iteration, "continuing pre-release line");
                let next = line.next()?.apply_to(&highest.base().bump(bump)?)?;
                debug!(%bump, %next, "pre-release version calculated");
                Ok(next)
            }
            None => {
                let base = self.tags.latest_release().unwrap_or_else(Version::zero);
                let next = PreRelease::first_for_branch(branch).apply_to(&base)?;
                debug!(%base, %next, "starting pre-release line from latest release");
                Ok(next)
            }
        }
    }

    /// Validate an explicitly requested version
    ///
    /// A leading `v` is optional. Fails when the string is not semver or when
    /// `v<version>` is already tagged.
    pub fn resolve_override(&self, requested: &str) -> Result<Version> {
        let version = Version::parse(requested)?;
        let tag = format!("v{}", version);
        if self.tags.contains(&tag) {
            return Err(ReleaseError::TagExists(tag));
        }
        Ok(version)
    }
}
