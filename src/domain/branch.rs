use crate::domain::prerelease::sanitize_branch;

/// Branch names treated as release branches when nothing is configured
pub const DEFAULT_RELEASE_BRANCHES: [&str; 2] = ["main", "master"];

/// Represents the branch being released with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_default: bool,
}

impl BranchContext {
    /// Create a branch context, checking `name` against the default branches
    pub fn new<S: AsRef<str>>(name: impl Into<String>, default_branches: &[S]) -> Self {
        let name = name.into();
        let is_default = default_branches.iter().any(|b| b.as_ref() == name);
        BranchContext { name, is_default }
    }

    /// Create a branch context using `main`/`master` as default branches
    pub fn with_standard_defaults(name: impl Into<String>) -> Self {
        BranchContext::new(name, &DEFAULT_RELEASE_BRANCHES)
    }

    /// Whether the release lands on a pre-release line
    ///
    /// Pre-release mode is switched on automatically for any branch that is
    /// not a default branch; `requested` can only turn it on, never off.
    pub fn uses_prerelease(&self, requested: bool) -> bool {
        requested || !self.is_default
    }

    pub fn sanitized(&self) -> String {
        sanitize_branch(&self.name)
    }
}
