use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Version parsing error: '{input}' is not a valid semantic version: {source}")]
    InvalidVersion {
        input: String,
        #[source]
        source: semver::Error,
    },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid pre-release identifier '{identifier}': {source}")]
    InvalidPrerelease {
        identifier: String,
        #[source]
        source: semver::Error,
    },

    #[error("Tag error: version {0} already exists as a tag")]
    TagExists(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Wrap a semver parse failure together with the offending input
    pub fn invalid_version(input: impl Into<String>, source: semver::Error) -> Self {
        ReleaseError::InvalidVersion {
            input: input.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_invalid_version_keeps_input() {
        let source = semver::Version::parse("not-a-version").unwrap_err();
        let err = ReleaseError::invalid_version("not-a-version", source);
        let msg = err.to_string();
        assert!(msg.starts_with("Version parsing error"));
        assert!(msg.contains("'not-a-version'"));
    }

    #[test]
    fn test_tag_exists_message() {
        let err = ReleaseError::TagExists("v1.2.3".to_string());
        assert_eq!(
            err.to_string(),
            "Tag error: version v1.2.3 already exists as a tag"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::version("x"), "Version parsing error"),
            (ReleaseError::TagExists("x".to_string()), "Tag error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_pattern_error_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: ReleaseError = regex_err.into();
        assert!(err.to_string().starts_with("Pattern error"));
    }
}
