//! Configuration document loading.

use crate::core::error::{LoadError, LoadResult};
use crate::core::types::OrgConfig;
use log::info;
use std::path::Path;

/// Read and deserialize the configuration document at `path`.
pub fn load_config(path: impl AsRef<Path>) -> LoadResult<OrgConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = OrgConfig::from_yaml(&raw).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "loaded {} orgs with {} teams from {}",
        config.orgs.len(),
        config.team_count(),
        path.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "orgs:\n  example:\n    admins: [alice]\n    members: [bob]\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.orgs["example"].members, vec!["bob"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read configuration from"));
    }

    #[test]
    fn test_malformed_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "orgs:\n  example:\n    admins: not-a-list\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }
}
