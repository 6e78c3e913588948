//! Analysis engine for determining version bumps from commits

pub mod bump;
pub mod calculator;

pub use bump::{commit_bump, BumpResolver};
pub use calculator::VersionCalculator;
