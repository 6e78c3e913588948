use crate::error::{ReleaseError, Result};
use semver::Prerelease;
use std::fmt;

/// Semantic version representation
///
/// Field order matters: the derived ordering compares major, minor, patch and
/// then the pre-release, where `semver::Prerelease` already ranks an empty
/// pre-release above any non-empty one and compares numeric identifiers
/// numerically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
        }
    }

    /// The 0.0.0 baseline used when no history exists
    pub fn zero() -> Self {
        Version::new(0, 0, 0)
    }

    /// Parse a version string, tolerating a single leading `v` or `V`
    /// (e.g., "v1.2.3-rc.1" -> Version(1,2,3,"rc.1")). Build metadata is dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let parsed = semver::Version::parse(clean)
            .map_err(|e| ReleaseError::invalid_version(input, e))?;
        Ok(Version::from(parsed))
    }

    /// Attach a pre-release identifier, replacing any existing one
    pub fn with_prerelease(mut self, identifier: &str) -> Result<Self> {
        if identifier.is_empty() {
            return Err(ReleaseError::version("Empty pre-release identifier"));
        }
        self.pre = Prerelease::new(identifier).map_err(|source| {
            ReleaseError::InvalidPrerelease {
                identifier: identifier.to_string(),
                source,
            }
        })?;
        Ok(self)
    }

    /// The major.minor.patch part with the pre-release stripped
    pub fn base(&self) -> Self {
        Version::new(self.major, self.minor, self.patch)
    }

    pub fn prerelease(&self) -> Option<&str> {
        if self.pre.is_empty() {
            None
        } else {
            Some(self.pre.as_str())
        }
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Bump version according to the decision
    ///
    /// Always yields a release version: the pre-release is cleared.
    /// `BumpDecision::None` leaves major.minor.patch untouched.
    /// Fails when the bumped component would exceed `u64::MAX`.
    pub fn bump(&self, decision: BumpDecision) -> Result<Self> {
        let overflow =
            || ReleaseError::version(format!("cannot apply {} bump to {}", decision, self));
        let next = match decision {
            BumpDecision::Major => {
                Version::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            BumpDecision::Minor => Version::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            BumpDecision::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            BumpDecision::None => self.base(),
        };
        Ok(next)
    }
}

impl From<semver::Version> for Version {
    fn from(v: semver::Version) -> Self {
        Version {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            pre: v.pre,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}

/// Version bump decision, totally ordered none < patch < minor < major
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BumpDecision {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpDecision {
    /// Least upper bound of two decisions. Raising is the only direction.
    pub fn join(self, other: BumpDecision) -> BumpDecision {
        self.max(other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpDecision::None => "none",
            BumpDecision::Patch => "patch",
            BumpDecision::Minor => "minor",
            BumpDecision::Major => "major",
        }
    }
}

impl fmt::Display for BumpDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
