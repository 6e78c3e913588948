use crate::domain::prerelease::{BranchPrereleasePattern, PreRelease};
use crate::domain::version::Version;
use tracing::debug;

/// Tag template used when none is configured
pub const DEFAULT_TAG_TEMPLATE: &str = "v{{.Major}}.{{.Minor}}.{{.Patch}}{{.Prerelease}}";

/// Tag naming template (e.g., "v{{.Major}}.{{.Minor}}.{{.Patch}}{{.Prerelease}}")
///
/// Placeholders other than the four known ones are left verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTemplate {
    pub template: String,
}

impl TagTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        TagTemplate {
            template: template.into(),
        }
    }

    /// Render a version into a tag name
    ///
    /// `{{.Prerelease}}` expands to `-<prerelease>` or to nothing for releases.
    pub fn format(&self, version: &Version) -> String {
        let prerelease = version
            .prerelease()
            .map(|pre| format!("-{}", pre))
            .unwrap_or_default();

        self.template
            .replace("{{.Major}}", &version.major.to_string())
            .replace("{{.Minor}}", &version.minor.to_string())
            .replace("{{.Patch}}", &version.patch.to_string())
            .replace("{{.Prerelease}}", &prerelease)
    }
}

impl Default for TagTemplate {
    fn default() -> Self {
        TagTemplate::new(DEFAULT_TAG_TEMPLATE)
    }
}

/// Immutable snapshot of the repository's tag names
///
/// Only `v`-prefixed tags take part in version discovery; anything that does
/// not parse as semver is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    names: Vec<String>,
}

impl TagSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Split whitespace-separated output such as `git tag -l`
    pub fn from_whitespace(text: &str) -> Self {
        TagSet::new(text.split_whitespace())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.names.iter().any(|name| name == tag)
    }

    fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.names.iter().filter_map(|name| {
            let tag = name.trim();
            if !tag.starts_with('v') {
                return None;
            }
            match Version::parse(tag) {
                Ok(version) => Some(version),
                Err(e) => {
                    debug!(tag, error = %e, "skipping tag that is not a semantic version");
                    None
                }
            }
        })
    }

    /// Highest version among all tags, pre-releases included
    pub fn current_version(&self) -> Option<Version> {
        self.versions().max()
    }

    /// Highest version among tags without a pre-release
    pub fn latest_release(&self) -> Option<Version> {
        self.versions().filter(|v| !v.is_prerelease()).max()
    }

    /// Tag of the given line with the highest counter
    ///
    /// Equal counters are broken by version precedence so the result does not
    /// depend on tag order.
    pub fn highest_branch_prerelease(
        &self,
        pattern: &BranchPrereleasePattern,
    ) -> Option<(Version, PreRelease)> {
        self.names
            .iter()
            .filter_map(|name| pattern.match_tag(name.trim()))
            .max_by(|(va, pa), (vb, pb)| {
                pa.iteration
                    .cmp(&pb.iteration)
                    .then_with(|| va.cmp(vb))
            })
    }
}
