//! Pure formatting functions for UI output.
//!
//! Status lines go to stderr so stdout stays clean for `--next-version-only`
//! and changelog previews.

use console::style;

use crate::cli::orchestration::ReleasePlan;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Shorten a commit to its first line, at most `max` characters.
pub fn summarize_commit(message: &str, max: usize) -> String {
    let first_line = message.lines().next().unwrap_or("");
    if first_line.chars().count() > max {
        let truncated: String = first_line.chars().take(max).collect();
        format!("{}…", truncated)
    } else {
        first_line.to_string()
    }
}

/// Display commit analysis for a branch.
///
/// Shows the branch name and up to 10 commits from the provided list.
/// If more than 10 commits exist, displays count of remaining commits.
pub fn display_commit_analysis(commit_messages: &[String], branch_name: &str) {
    eprintln!(
        "\n{}",
        style(format!("Analyzing commits on branch '{}'", branch_name)).bold()
    );
    eprintln!(
        "{}",
        style(format!("{} commits in range:", commit_messages.len())).underlined()
    );

    for (i, message) in commit_messages.iter().take(10).enumerate() {
        eprintln!("  {}. {}", i + 1, summarize_commit(message, 60));
    }

    if commit_messages.len() > 10 {
        eprintln!("  ... and {} more commits", commit_messages.len() - 10);
    }
}

/// Display the planned release: current version, bump and next tag.
pub fn display_release_plan(plan: &ReleasePlan) {
    eprintln!("\n{}", style("Release plan:").bold());
    eprintln!("  Current: {}", style(&plan.current_version).red());
    eprintln!("  Bump:    {}", plan.bump);
    if let Some(next) = &plan.next {
        let line = if next.prerelease {
            "pre-release"
        } else {
            "release"
        };
        eprintln!("  Next:    {} ({})", style(&next.tag).green(), line);
    }
}
