use crate::changelog::DEFAULT_SKIP_MARKERS;
use crate::domain::branch::DEFAULT_RELEASE_BRANCHES;
use crate::domain::tag::DEFAULT_TAG_TEMPLATE;
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "gitrelease.toml";

/// Config file looked up in the user's config directory
pub const USER_CONFIG_FILE: &str = ".gitrelease.toml";

/// Represents the complete configuration for git-release.
///
/// Contains the tag template, release branches, changelog and validation options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    #[serde(default = "default_release_branches")]
    pub default_branches: Vec<String>,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Returns the default tag template.
fn default_tag_format() -> String {
    DEFAULT_TAG_TEMPLATE.to_string()
}

/// Returns the branches that produce final releases.
fn default_release_branches() -> Vec<String> {
    DEFAULT_RELEASE_BRANCHES
        .iter()
        .map(|b| b.to_string())
        .collect()
}

/// Returns the default changelog file path.
fn default_changelog_path() -> String {
    "CHANGELOG.md".to_string()
}

/// Returns the markers that exclude a commit from the release notes.
fn default_skip_markers() -> Vec<String> {
    DEFAULT_SKIP_MARKERS.iter().map(|m| m.to_string()).collect()
}

fn default_true() -> bool {
    true
}

/// Configuration for changelog generation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_changelog_path")]
    pub path: String,

    #[serde(default = "default_skip_markers")]
    pub skip_markers: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            enabled: false,
            path: default_changelog_path(),
            skip_markers: default_skip_markers(),
        }
    }
}

/// Configuration for commit message validation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Abort when the latest commit does not follow the conventional format
    #[serde(default = "default_true")]
    pub require_conventional_latest: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            require_conventional_latest: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_format: default_tag_format(),
            default_branches: default_release_branches(),
            changelog: ChangelogConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that decode fine but cannot drive a release
    pub fn validate(&self) -> Result<()> {
        if self.tag_format.trim().is_empty() {
            return Err(ReleaseError::config("tag_format must not be empty"));
        }
        if self.changelog.enabled && self.changelog.path.trim().is_empty() {
            return Err(ReleaseError::config(
                "changelog.path must be set when the changelog is enabled",
            ));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml_str(&config_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tag_format, DEFAULT_TAG_TEMPLATE);
        assert_eq!(config.default_branches, vec!["main", "master"]);
        assert!(!config.changelog.enabled);
        assert_eq!(config.changelog.path, "CHANGELOG.md");
        assert_eq!(config.changelog.skip_markers.len(), 3);
        assert!(config.validation.require_conventional_latest);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
tag_format = "release-{{.Major}}.{{.Minor}}.{{.Patch}}"

[changelog]
enabled = true
"#,
        )
        .unwrap();
        assert_eq!(config.tag_format, "release-{{.Major}}.{{.Minor}}.{{.Patch}}");
        assert!(config.changelog.enabled);
        assert_eq!(config.changelog.path, "CHANGELOG.md");
        assert_eq!(config.default_branches, vec!["main", "master"]);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("tag_format = [").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_empty_tag_format_rejected() {
        let err = Config::from_toml_str("tag_format = \"\"").unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)));
    }

    #[test]
    fn test_enabled_changelog_needs_path() {
        let err = Config::from_toml_str("[changelog]\nenabled = true\npath = \"\"").unwrap_err();
        assert!(err.to_string().contains("changelog.path"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(load_config(Some("/definitely/not/here/gitrelease.toml")).is_err());
    }
}
