//! Error types for orgcheck.
//!
//! Two families live here:
//! - fatal errors ([`CheckError`] and friends) that stop a run before any
//!   validation happens,
//! - [`Violation`]s, the non-fatal findings collected into a
//!   [`ValidationReport`].

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a check run.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    NoMatch(#[from] NoMatchError),
}

/// Invalid run settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("--config must be set")]
    MissingConfigPath,

    #[error("--owners-dir must be set")]
    MissingOwnersDir,

    #[error("--min-approvers must be at least 1")]
    ZeroApprovers,
}

/// Failures reading one of the two input files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read configuration from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot unmarshal configuration from {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no CODEOWNERS file found in {dir}")]
    OwnersMissing { dir: PathBuf },

    #[error("cannot read {path}: {source}")]
    OwnersRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {reason}")]
    OwnersSyntax {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// No CODEOWNERS rule applies to the configuration file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no matching rule found for {path} in {owners_file}")]
pub struct NoMatchError {
    pub path: String,
    pub owners_file: PathBuf,
}

/// Which identity list a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admins,
    Members,
    /// Admins and members taken together.
    AllMembers,
    Maintainers,
    Approvers,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admins => "admins",
            Role::Members => "members",
            Role::AllMembers => "admins and members",
            Role::Maintainers => "maintainers",
            Role::Approvers => "approvers",
        };
        f.write_str(name)
    }
}

/// Comma-separated identity list used inside violation messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Names(pub Vec<String>);

impl Names {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

impl FromIterator<String> for Names {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Names {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// A single consistency failure.
///
/// The `Display` output is the diagnostic printed for the finding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("users do not match in CODEOWNERS and org admins '{org}': {names}")]
    ApproversNotAdmins { org: String, names: Names },

    #[error("org admins of '{org}' missing from CODEOWNERS approvers: {names}")]
    AdminsNotApprovers { org: String, names: Names },

    #[error("Require at least {required} approvers for org '{org}', found {found}: {names}")]
    TooFewApprovers {
        org: String,
        required: usize,
        found: usize,
        names: Names,
    },

    #[error("users in both org admin and member roles for org '{org}': {names}")]
    AdminMemberOverlap { org: String, names: Names },

    #[error("duplicate {role} in org '{org}': {} duplicate names: {names}", .names.len())]
    DuplicateNames { org: String, role: Role, names: Names },

    #[error("{role} for {org} org are unsorted")]
    UnsortedList { org: String, role: Role },

    #[error("The team {team} in org {org} doesn't have the `privacy: closed` field")]
    TeamPrivacy { org: String, team: String },

    #[error("The team {team} in org {org} has non-admins listed as maintainers; these users should be in the members list instead: {names}")]
    NonAdminMaintainers {
        org: String,
        team: String,
        names: Names,
    },

    #[error("The team {team} in org {org} has users in both maintainer admin and member roles: {names}")]
    MaintainerMemberOverlap {
        org: String,
        team: String,
        names: Names,
    },

    #[error("The team {team} in org {org} has duplicate {role}: {} duplicate names: {names}", .names.len())]
    TeamDuplicates {
        org: String,
        team: String,
        role: Role,
        names: Names,
    },

    #[error("The following members of team {team} are not {org} org members: {names}")]
    NonOrgTeamMembers {
        org: String,
        team: String,
        names: Names,
    },

    #[error("The team {team} in org {org} has org admins listed as members; these users should be in the maintainers list instead, and cannot be on the members list: {names}")]
    AdminTeamMembers {
        org: String,
        team: String,
        names: Names,
    },

    #[error("The team {team} in org {org} has an unsorted list of {role}")]
    UnsortedTeamList {
        org: String,
        team: String,
        role: Role,
    },
}

impl Violation {
    /// Organization label the violation belongs to.
    pub fn org(&self) -> &str {
        match self {
            Violation::ApproversNotAdmins { org, .. }
            | Violation::AdminsNotApprovers { org, .. }
            | Violation::TooFewApprovers { org, .. }
            | Violation::AdminMemberOverlap { org, .. }
            | Violation::DuplicateNames { org, .. }
            | Violation::UnsortedList { org, .. }
            | Violation::TeamPrivacy { org, .. }
            | Violation::NonAdminMaintainers { org, .. }
            | Violation::MaintainerMemberOverlap { org, .. }
            | Violation::TeamDuplicates { org, .. }
            | Violation::NonOrgTeamMembers { org, .. }
            | Violation::AdminTeamMembers { org, .. }
            | Violation::UnsortedTeamList { org, .. } => org,
        }
    }

    /// Team the violation is about, if any.
    pub fn team(&self) -> Option<&str> {
        match self {
            Violation::TeamPrivacy { team, .. }
            | Violation::NonAdminMaintainers { team, .. }
            | Violation::MaintainerMemberOverlap { team, .. }
            | Violation::TeamDuplicates { team, .. }
            | Violation::NonOrgTeamMembers { team, .. }
            | Violation::AdminTeamMembers { team, .. }
            | Violation::UnsortedTeamList { team, .. } => Some(team),
            _ => None,
        }
    }

    /// Identities named by the violation.
    pub fn names(&self) -> &[String] {
        match self {
            Violation::ApproversNotAdmins { names, .. }
            | Violation::AdminsNotApprovers { names, .. }
            | Violation::TooFewApprovers { names, .. }
            | Violation::AdminMemberOverlap { names, .. }
            | Violation::DuplicateNames { names, .. }
            | Violation::NonAdminMaintainers { names, .. }
            | Violation::MaintainerMemberOverlap { names, .. }
            | Violation::TeamDuplicates { names, .. }
            | Violation::NonOrgTeamMembers { names, .. }
            | Violation::AdminTeamMembers { names, .. } => &names.0,
            Violation::UnsortedList { .. }
            | Violation::TeamPrivacy { .. }
            | Violation::UnsortedTeamList { .. } => &[],
        }
    }

    /// Get suggestion for fixing this violation.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            Violation::ApproversNotAdmins { .. } | Violation::AdminsNotApprovers { .. } => Some(
                "Keep the CODEOWNERS rule for the config file identical to the org admins"
                    .to_string(),
            ),
            Violation::TooFewApprovers { required, .. } => Some(format!(
                "Add admins until at least {} distinct approvers exist",
                required
            )),
            Violation::UnsortedList { role, .. } | Violation::UnsortedTeamList { role, .. } => {
                Some(format!("Sort the {} list case-insensitively", role))
            }
            Violation::TeamPrivacy { .. } => Some("Add `privacy: closed` to the team".to_string()),
            Violation::NonAdminMaintainers { .. } => {
                Some("Move these users to the team members list".to_string())
            }
            Violation::AdminTeamMembers { .. } => {
                Some("Move these users to the team maintainers list".to_string())
            }
            Violation::NonOrgTeamMembers { .. } => {
                Some("Add these users to the org members list first".to_string())
            }
            _ => None,
        }
    }
}

/// Result type alias for check runs.
pub type CheckResult<T> = Result<T, CheckError>;

/// Result type alias for loading inputs.
pub type LoadResult<T> = Result<T, LoadError>;

// ============================================================================
// Validation Report
// ============================================================================

/// Everything a validation run found.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Whether validation passed without violations.
    pub success: bool,
    pub violations: Vec<Violation>,
    /// Non-failing observations.
    pub warnings: Vec<ValidationWarning>,
    /// Time taken for validation in milliseconds.
    pub duration_ms: u64,
}

/// Non-fatal validation warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub message: String,
    /// Organization that triggered the warning, if applicable.
    pub org: Option<String>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.org {
            Some(org) => write!(f, "{} (org {})", self.message, org),
            None => f.write_str(&self.message),
        }
    }
}

impl ValidationReport {
    /// Create a new empty report (success).
    pub fn new() -> Self {
        Self {
            success: true,
            violations: Vec::new(),
            warnings: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn add_violation(&mut self, violation: Violation) {
        self.success = false;
        self.violations.push(violation);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        if self.success {
            if self.warnings.is_empty() {
                format!("✓ Configuration is consistent ({} ms)", self.duration_ms)
            } else {
                format!(
                    "✓ Configuration is consistent with {} warning(s) ({} ms)",
                    self.warnings.len(),
                    self.duration_ms
                )
            }
        } else {
            format!(
                "✗ Validation failed with {} violation(s) in {} ms",
                self.violations.len(),
                self.duration_ms
            )
        }
    }

    /// Warning messages with suggestions, one entry per warning.
    pub fn detailed_warnings(&self) -> Vec<String> {
        self.warnings
            .iter()
            .map(|warning| {
                let mut msg = warning.to_string();
                if let Some(fix) = &warning.suggestion {
                    msg.push_str(&format!("\n   → Suggestion: {}", fix));
                }
                msg
            })
            .collect()
    }

    /// Violation messages with suggestions, one entry per violation.
    pub fn detailed_violations(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|violation| {
                let mut msg = violation.to_string();
                if let Some(fix) = violation.suggested_fix() {
                    msg.push_str(&format!("\n   → Suggestion: {}", fix));
                }
                msg
            })
            .collect()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
