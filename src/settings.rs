//! Run settings.
//!
//! Built once from command-line flags and passed by reference into
//! [`crate::runner::run`].

use crate::core::error::SettingsError;
use crate::validation::DEFAULT_MIN_APPROVERS;
use std::path::PathBuf;

/// Default path of the configuration document.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Default directory searched for the CODEOWNERS file.
pub const DEFAULT_OWNERS_DIR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Configuration document to validate.
    pub config_path: PathBuf,
    /// Directory holding the CODEOWNERS file.
    pub owners_dir: PathBuf,
    /// Fewest distinct approvers accepted.
    pub min_approvers: usize,
}

impl Settings {
    pub fn new(config_path: impl Into<PathBuf>, owners_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            owners_dir: owners_dir.into(),
            min_approvers: DEFAULT_MIN_APPROVERS,
        }
    }

    pub fn with_min_approvers(mut self, min: usize) -> Self {
        self.min_approvers = min;
        self
    }

    /// Reject settings that cannot describe a run.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.config_path.as_os_str().is_empty() {
            return Err(SettingsError::MissingConfigPath);
        }
        if self.owners_dir.as_os_str().is_empty() {
            return Err(SettingsError::MissingOwnersDir);
        }
        if self.min_approvers == 0 {
            return Err(SettingsError::ZeroApprovers);
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH, DEFAULT_OWNERS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.config_path, PathBuf::from("config.yaml"));
        assert_eq!(settings.owners_dir, PathBuf::from("."));
        assert_eq!(settings.min_approvers, 4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_paths_rejected() {
        assert_eq!(
            Settings::new("", ".").validate(),
            Err(SettingsError::MissingConfigPath)
        );
        assert_eq!(
            Settings::new("config.yaml", "").validate(),
            Err(SettingsError::MissingOwnersDir)
        );
        assert_eq!(
            Settings::default().with_min_approvers(0).validate(),
            Err(SettingsError::ZeroApprovers)
        );
    }
}
