//! User interface module - status output for the binary.

pub mod formatter;

pub use formatter::{
    display_commit_analysis, display_error, display_release_plan, display_status,
    display_success, summarize_commit,
};
