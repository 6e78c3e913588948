//! Changelog entry generation
//!
//! Re-scans a commit range into categorized groups and renders one Markdown
//! section per release. The heading and bullet shapes are consumed by other
//! tooling and must stay exactly as rendered here:
//!
//! ```text
//! ## v1.3.0 (2024-05-01)
//!
//! ### BREAKING CHANGES
//!
//! - **BREAKING CHANGE:** drop v1 endpoints
//!   clients must migrate to /v2
//!
//! ### Features
//!
//! - **feat:** add search
//! ```

use crate::domain::commit::{CommitGrammar, CommitType, ParsedCommit};
use chrono::NaiveDate;
use tracing::debug;

/// Markers that keep a commit out of the release notes (matched case-insensitively)
pub const DEFAULT_SKIP_MARKERS: [&str; 3] = ["[skip-ci]", "[ci skip]", "skip-checks: true"];

/// Commit types that never appear in the changelog
const HIDDEN_TYPES: [CommitType; 4] = [
    CommitType::Docs,
    CommitType::Style,
    CommitType::Test,
    CommitType::Chore,
];

/// One release's worth of categorized changelog lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSection {
    pub breaking_changes: Vec<String>,
    pub features: Vec<String>,
    pub bug_fixes: Vec<String>,
    pub other_changes: Vec<String>,
    pub header_label: String,
    pub date: NaiveDate,
}

impl ChangelogSection {
    pub fn new(header_label: impl Into<String>, date: NaiveDate) -> Self {
        ChangelogSection {
            breaking_changes: Vec::new(),
            features: Vec::new(),
            bug_fixes: Vec::new(),
            other_changes: Vec::new(),
            header_label: header_label.into(),
            date,
        }
    }

    /// True when no category received an entry
    pub fn is_empty(&self) -> bool {
        self.breaking_changes.is_empty()
            && self.features.is_empty()
            && self.bug_fixes.is_empty()
            && self.other_changes.is_empty()
    }

    /// Render the Markdown fragment; empty categories are omitted
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "## {} ({})\n\n",
            self.header_label,
            self.date.format("%Y-%m-%d")
        ));

        for (title, entries) in [
            ("BREAKING CHANGES", &self.breaking_changes),
            ("Features", &self.features),
            ("Bug Fixes", &self.bug_fixes),
            ("Other Changes", &self.other_changes),
        ] {
            if entries.is_empty() {
                continue;
            }
            out.push_str(&format!("### {}\n\n", title));
            for entry in entries {
                out.push_str(entry);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Newest entry first: the rendered fragment goes before `existing`
    pub fn prepend_to(&self, existing: &str) -> String {
        let mut content = self.render();
        content.push_str(existing);
        content
    }
}

/// Categorizes commits for the release notes
pub struct ChangelogBuilder<'g> {
    grammar: &'g CommitGrammar,
    skip_markers: Vec<String>,
}

impl<'g> ChangelogBuilder<'g> {
    pub fn new(grammar: &'g CommitGrammar) -> Self {
        ChangelogBuilder {
            grammar,
            skip_markers: DEFAULT_SKIP_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Replace the skip markers
    pub fn with_skip_markers<S: AsRef<str>>(mut self, markers: &[S]) -> Self {
        self.skip_markers = markers
            .iter()
            .map(|m| m.as_ref().to_lowercase())
            .collect();
        self
    }

    fn is_skipped(&self, message: &str) -> bool {
        let lowered = message.to_lowercase();
        self.skip_markers
            .iter()
            .any(|marker| lowered.contains(marker.as_str()))
    }

    /// Build the section for `messages`, labelled with `header_label` and `date`
    pub fn build<S: AsRef<str>>(
        &self,
        messages: &[S],
        header_label: &str,
        date: NaiveDate,
    ) -> ChangelogSection {
        let mut section = ChangelogSection::new(header_label, date);

        for message in messages {
            let message: &str = message.as_ref();
            if message.trim().is_empty() || self.is_skipped(message) {
                continue;
            }

            let record = match self.grammar.parse(message) {
                ParsedCommit::Merge => continue,
                ParsedCommit::Unrecognized { first_line } => {
                    section.other_changes.push(first_line);
                    continue;
                }
                ParsedCommit::Conventional(record) => record,
            };

            if record.breaking {
                let mut entry = format!("- **BREAKING CHANGE:** {}", record.subject);
                if let Some(note) = record.breaking_note() {
                    entry.push_str("\n  ");
                    entry.push_str(note);
                }
                section.breaking_changes.push(entry);
                continue;
            }

            let entry = format!("- **{}:** {}", record.commit_type, record.subject);
            match record.commit_type {
                CommitType::Feat => section.features.push(entry),
                CommitType::Fix => section.bug_fixes.push(entry),
                t if HIDDEN_TYPES.contains(&t) => {}
                _ => section.other_changes.push(entry),
            }
        }

        debug!(
            breaking = section.breaking_changes.len(),
            features = section.features.len(),
            fixes = section.bug_fixes.len(),
            other = section.other_changes.len(),
            "changelog categorized"
        );
        section
    }
}
