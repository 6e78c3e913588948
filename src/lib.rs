pub mod analyzer;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ui;

pub use cli::{run_release_workflow, ReleasePlan, ReleaseRequest};
pub use error::{ReleaseError, Result};
