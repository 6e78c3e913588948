use crate::error::Result;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Marker in a commit message that flags an incompatible change
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE:";

/// Prefix git uses for merge commits
const MERGE_PREFIX: &str = "Merge ";

/// Conventional commit type vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    pub const ALL: [CommitType; 11] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Build,
        CommitType::Ci,
        CommitType::Chore,
        CommitType::Revert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
        }
    }
}

impl FromStr for CommitType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        CommitType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A commit message that matched the conventional commit grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub raw_message: String,
    pub commit_type: CommitType,
    pub scope: Option<String>,
    /// Set by a `!` after the type/scope or a `BREAKING CHANGE:` anywhere in the message
    pub breaking: bool,
    pub subject: String,
    pub body: Option<String>,
}

impl CommitRecord {
    /// Text following the first `BREAKING CHANGE:` marker, if the message carries one
    pub fn breaking_note(&self) -> Option<&str> {
        self.raw_message
            .split_once(BREAKING_CHANGE_MARKER)
            .map(|(_, note)| note.trim())
    }
}

/// Classification of a single commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommit {
    /// `Merge ...` commits: always valid, never scored or listed
    Merge,
    Conventional(CommitRecord),
    /// Does not follow the grammar; carries the message's first line
    Unrecognized { first_line: String },
}

/// Verdict for the designated latest-commit format check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitValidation {
    Valid,
    Invalid { message: String },
}

impl CommitValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, CommitValidation::Valid)
    }
}

/// Compiled conventional commit grammar
///
/// `<type>(<scope>)?!?: <subject>` on the first line, where a dangling `(`
/// with no closing paren is tolerated. Built once and shared by reference.
#[derive(Debug, Clone)]
pub struct CommitGrammar {
    header: Regex,
}

impl CommitGrammar {
    pub fn new() -> Result<Self> {
        let types = CommitType::ALL
            .iter()
            .map(CommitType::as_str)
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"^(?P<type>{})(?:\((?P<scope>[^()\r\n]*)\)|\()?(?P<breaking>!)?: (?P<subject>.*)$",
            types
        );
        Ok(CommitGrammar {
            header: Regex::new(&pattern)?,
        })
    }

    /// Parse a commit message according to the conventional commits grammar
    pub fn parse(&self, message: &str) -> ParsedCommit {
        let message = message.trim();
        if message.starts_with(MERGE_PREFIX) {
            return ParsedCommit::Merge;
        }

        let (first_line, rest) = match message.split_once('\n') {
            Some((first, rest)) => (first.trim_end_matches('\r'), Some(rest)),
            None => (message, None),
        };

        let Some(captures) = self.header.captures(first_line) else {
            return ParsedCommit::Unrecognized {
                first_line: first_line.to_string(),
            };
        };

        let Some(commit_type) = captures
            .name("type")
            .and_then(|m| m.as_str().parse::<CommitType>().ok())
        else {
            return ParsedCommit::Unrecognized {
                first_line: first_line.to_string(),
            };
        };

        let scope = captures
            .name("scope")
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let subject = captures
            .name("subject")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let breaking =
            captures.name("breaking").is_some() || message.contains(BREAKING_CHANGE_MARKER);
        let body = rest
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string);

        ParsedCommit::Conventional(CommitRecord {
            raw_message: message.to_string(),
            commit_type,
            scope,
            breaking,
            subject,
            body,
        })
    }

    /// Check one commit message against the grammar, producing help text on failure
    pub fn validate(&self, message: &str) -> CommitValidation {
        match self.parse(message) {
            ParsedCommit::Merge | ParsedCommit::Conventional(_) => CommitValidation::Valid,
            ParsedCommit::Unrecognized { .. } => CommitValidation::Invalid {
                message: format_error_message(message),
            },
        }
    }
}

/// Human-readable explanation of the expected commit format
pub fn format_error_message(message: &str) -> String {
    let types = CommitType::ALL
        .iter()
        .map(CommitType::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Invalid commit message format: \"{}\"\n\n\
         Please follow the Conventional Commits specification:\n\
         <type>[optional scope]: <description>\n\n\
         Available types: {}\n\n\
         Example: feat(auth): add login functionality",
        message.trim(),
        types
    )
}
