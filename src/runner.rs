//! Single check run: load both inputs, then validate.

use crate::core::error::{CheckResult, ValidationReport};
use crate::input::{load_approvers, load_config};
use crate::settings::Settings;
use crate::validation::ValidationPipeline;
use log::debug;

/// Run the default pipeline for `settings`.
///
/// Load failures abort the run. Validation findings never do; they are all
/// returned in the report.
pub fn run(settings: &Settings) -> CheckResult<ValidationReport> {
    settings.validate()?;
    debug!("running with {:?}", settings);

    let config = load_config(&settings.config_path)?;
    let approvers = load_approvers(&settings.owners_dir, &settings.config_path)?;

    let pipeline = ValidationPipeline::default().with_min_approvers(settings.min_approvers);
    Ok(pipeline.validate(&config, &approvers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{CheckError, LoadError, SettingsError, Violation};
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
orgs:
  example:
    admins:
      - alice
      - Bob
      - carol
      - dave
    members:
      - erin
    teams:
      infra:
        privacy: closed
        maintainers: [alice]
        members: [erin]
        children:
          oncall:
            maintainers: [bob]
"#;

    fn workspace(config: &str, codeowners: &str) -> (TempDir, Settings) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), config).unwrap();
        fs::write(dir.path().join("CODEOWNERS"), codeowners).unwrap();
        let settings = Settings::new(dir.path().join("config.yaml"), dir.path());
        (dir, settings)
    }

    #[test]
    fn test_run_reports_child_team_violation() {
        let (_dir, settings) = workspace(
            CONFIG,
            "* @fallback\n/config.yaml @alice @bob @carol @dave\n",
        );
        let report = run(&settings).unwrap();
        assert_eq!(
            report.violations,
            vec![Violation::TeamPrivacy {
                org: "example".to_string(),
                team: "oncall".to_string()
            }]
        );
    }

    #[test]
    fn test_run_clean() {
        let config = CONFIG.replace("            maintainers: [bob]", "            privacy: closed\n            maintainers: [bob]");
        let (_dir, settings) = workspace(&config, "/config.yaml @alice @bob @carol @dave\n");
        let report = run(&settings).unwrap();
        assert!(report.is_success(), "{:?}", report.violations);
    }

    #[test]
    fn test_run_fails_on_missing_rule() {
        let (_dir, settings) = workspace(CONFIG, "/docs/ @alice\n");
        assert!(matches!(run(&settings), Err(CheckError::NoMatch(_))));
    }

    #[test]
    fn test_run_fails_on_bad_config() {
        let (_dir, settings) = workspace("orgs: [", "* @alice\n");
        assert!(matches!(
            run(&settings),
            Err(CheckError::Load(LoadError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_run_rejects_empty_settings() {
        let settings = Settings::new("", ".");
        assert!(matches!(
            run(&settings),
            Err(CheckError::Settings(SettingsError::MissingConfigPath))
        ));
    }
}
