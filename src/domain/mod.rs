//! Domain logic - pure release rules independent of git operations

pub mod branch;
pub mod commit;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use commit::{CommitGrammar, CommitRecord, CommitType, CommitValidation, ParsedCommit};
pub use prerelease::{BranchPrereleasePattern, PreRelease};
pub use tag::{TagSet, TagTemplate};
pub use version::{BumpDecision, Version};
