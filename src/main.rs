use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_release::cli::{split_commit_records, Args};
use git_release::config;
use git_release::domain::{CommitValidation, TagSet, TagTemplate};
use git_release::{run_release_workflow, ReleaseRequest};
use git_release::ui;

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Commit messages arrive on stdin; an interactive terminal means there are none.
fn read_commits() -> Result<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }

    let mut input = String::new();
    stdin
        .lock()
        .read_to_string(&mut input)
        .context("Failed to read commit messages from stdin")?;
    Ok(split_commit_records(&input))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let commits = read_commits()?;
    if !args.next_version_only {
        ui::display_commit_analysis(&commits, &args.branch);
    }

    let mut request = ReleaseRequest::new(
        commits,
        TagSet::from_whitespace(&args.tags),
        args.branch.as_str(),
        chrono::Local::now().date_naive(),
    );
    request.prerelease = args.pre_release;
    request.default_branches = config.default_branches.clone();
    request.version_override = args.set_version.clone();
    request.current_version = args.current_version.clone();
    request.tag_template = TagTemplate::new(
        args.tag_format
            .clone()
            .unwrap_or_else(|| config.tag_format.clone()),
    );
    request.changelog = args.output_changelog || config.changelog.enabled;
    request.skip_markers = config.changelog.skip_markers.clone();

    let plan = match run_release_workflow(&request) {
        Ok(plan) => plan,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if let CommitValidation::Invalid { message } = &plan.validation {
        if config.validation.require_conventional_latest {
            ui::display_error(message);
            std::process::exit(1);
        }
        tracing::warn!("latest commit does not follow the conventional format");
    }

    let Some(next) = plan.next.as_ref() else {
        if !args.next_version_only {
            ui::display_status("No version bump needed based on commit history.");
        }
        return Ok(());
    };

    if args.next_version_only {
        println!("{}", next.tag);
        return Ok(());
    }

    ui::display_release_plan(&plan);

    if let Some(section) = &next.changelog {
        let path = Path::new(&config.changelog.path);
        if args.dry_run {
            ui::display_status(&format!("Dry run: would prepend to {}", path.display()));
            print!("{}", section.render());
        } else {
            let existing = if path.exists() {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?
            } else {
                String::new()
            };
            fs::write(path, section.prepend_to(&existing))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ui::display_success(&format!("Updated {}", path.display()));
        }
    } else if request.changelog && !next.prerelease {
        ui::display_status(&format!(
            "No changelog entries for {}; {} left unchanged",
            next.tag, config.changelog.path
        ));
    }

    ui::display_success(&format!("New version: {}", next.tag));
    if !args.dry_run {
        println!("{}", next.tag);
        ui::display_status(&format!(
            "To publish: git tag {} && git push origin {}",
            next.tag, next.tag
        ));
    }

    Ok(())
}
