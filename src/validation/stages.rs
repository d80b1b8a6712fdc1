//! Individual validation stages.
//!
//! Each stage checks for a specific category of violations in one
//! organization.

use crate::core::context::{OrgScope, TeamScope};
use crate::core::error::{Role, ValidationWarning, Violation};
use crate::core::types::{Privacy, Team};
use crate::validation::names::{difference, find_duplicates, intersection, is_sorted, normalize_all};
use indexmap::IndexMap;

/// Trait for validation stages.
pub trait ValidationStage: Send + Sync {
    /// Name of this validation stage.
    fn name(&self) -> &str;

    /// Validate one organization.
    ///
    /// Returns Ok with warnings, or Err with every violation found.
    fn validate(&self, scope: &OrgScope<'_>) -> Result<Vec<ValidationWarning>, Vec<Violation>>;
}

fn finish(
    warnings: Vec<ValidationWarning>,
    violations: Vec<Violation>,
) -> Result<Vec<ValidationWarning>, Vec<Violation>> {
    if violations.is_empty() {
        Ok(warnings)
    } else {
        Err(violations)
    }
}

/// Approver validation - reconciles CODEOWNERS with the org admins.
///
/// Verifies:
/// - Every approver is an org admin
/// - Every org admin is an approver
/// - There are enough distinct approvers
/// - No approver is listed twice
pub struct ApproverValidation;

impl ValidationStage for ApproverValidation {
    fn name(&self) -> &str {
        "Approver Validation"
    }

    fn validate(&self, scope: &OrgScope<'_>) -> Result<Vec<ValidationWarning>, Vec<Violation>> {
        let mut violations = Vec::new();
        let org = scope.label.to_string();
        let approvers = scope.approver_set();

        let extra = difference(&approvers, &scope.admins);
        if !extra.is_empty() {
            violations.push(Violation::ApproversNotAdmins {
                org: org.clone(),
                names: extra.into_iter().collect(),
            });
        }

        let unapproved = difference(&scope.admins, &approvers);
        if !unapproved.is_empty() {
            violations.push(Violation::AdminsNotApprovers {
                org: org.clone(),
                names: unapproved.into_iter().collect(),
            });
        }

        if approvers.len() < scope.min_approvers {
            violations.push(Violation::TooFewApprovers {
                org: org.clone(),
                required: scope.min_approvers,
                found: approvers.len(),
                names: approvers.iter().cloned().collect(),
            });
        }

        let dups = find_duplicates(&scope.approvers.owners);
        if !dups.is_empty() {
            violations.push(Violation::DuplicateNames {
                org,
                role: Role::Approvers,
                names: dups.into_iter().collect(),
            });
        }

        finish(Vec::new(), violations)
    }
}

/// Membership validation - checks the org admin and member lists.
///
/// Verifies:
/// - No user is both admin and member
/// - No duplicates in admins, members, or both lists taken together
pub struct MembershipValidation;

impl ValidationStage for MembershipValidation {
    fn name(&self) -> &str {
        "Membership Validation"
    }

    fn validate(&self, scope: &OrgScope<'_>) -> Result<Vec<ValidationWarning>, Vec<Violation>> {
        let mut violations = Vec::new();
        let org = scope.label;

        let both = intersection(&scope.admins, &scope.members);
        if !both.is_empty() {
            violations.push(Violation::AdminMemberOverlap {
                org: org.to_string(),
                names: both.into_iter().collect(),
            });
        }

        let everyone: Vec<&String> = scope.org.admins.iter().chain(&scope.org.members).collect();
        let lists = [
            (Role::Admins, find_duplicates(&scope.org.admins)),
            (Role::Members, find_duplicates(&scope.org.members)),
            (Role::AllMembers, find_duplicates(&everyone)),
        ];
        for (role, dups) in lists {
            if !dups.is_empty() {
                violations.push(Violation::DuplicateNames {
                    org: org.to_string(),
                    role,
                    names: dups.into_iter().collect(),
                });
            }
        }

        finish(Vec::new(), violations)
    }
}

/// Ordering validation - org admin and member lists must be sorted.
pub struct OrderingValidation;

impl ValidationStage for OrderingValidation {
    fn name(&self) -> &str {
        "Ordering Validation"
    }

    fn validate(&self, scope: &OrgScope<'_>) -> Result<Vec<ValidationWarning>, Vec<Violation>> {
        let mut violations = Vec::new();

        for (role, list) in [(Role::Admins, &scope.org.admins), (Role::Members, &scope.org.members)] {
            if !is_sorted(list) {
                violations.push(Violation::UnsortedList {
                    org: scope.label.to_string(),
                    role,
                });
            }
        }

        finish(Vec::new(), violations)
    }
}

/// Team validation - walks the whole team tree of an organization.
///
/// Every team, at any depth, is checked against the same org-level admin
/// and member sets. A valid parent never hides violations in its children.
pub struct TeamValidation;

impl ValidationStage for TeamValidation {
    fn name(&self) -> &str {
        "Team Validation"
    }

    fn validate(&self, scope: &OrgScope<'_>) -> Result<Vec<ValidationWarning>, Vec<Violation>> {
        let mut violations = Vec::new();
        let mut warnings = Vec::new();
        check_teams(&scope.org.teams, scope.team_scope(), &mut violations, &mut warnings);
        finish(warnings, violations)
    }
}

/// Check `teams` and, recursively, their children.
pub fn check_teams(
    teams: &IndexMap<String, Team>,
    scope: TeamScope<'_>,
    violations: &mut Vec<Violation>,
    warnings: &mut Vec<ValidationWarning>,
) {
    for (name, team) in teams {
        violations.extend(check_team(name, team, scope));

        if team.maintainers.is_empty() {
            warnings.push(ValidationWarning {
                message: format!("Team {} has no maintainers", name),
                org: Some(scope.org.to_string()),
                suggestion: Some("Add an org admin as maintainer".to_string()),
            });
        }

        check_teams(&team.children, scope, violations, warnings);
    }
}

/// Violations of a single team, ignoring its children.
pub fn check_team(name: &str, team: &Team, scope: TeamScope<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    let org = || scope.org.to_string();
    let team_name = || name.to_string();

    let maintainers = normalize_all(&team.maintainers);
    let members = normalize_all(&team.members);

    if team.privacy != Some(Privacy::Closed) {
        violations.push(Violation::TeamPrivacy {
            org: org(),
            team: team_name(),
        });
    }

    let non_admins = difference(&maintainers, scope.admins);
    if !non_admins.is_empty() {
        violations.push(Violation::NonAdminMaintainers {
            org: org(),
            team: team_name(),
            names: non_admins.into_iter().collect(),
        });
    }

    let both = intersection(&maintainers, &members);
    if !both.is_empty() {
        violations.push(Violation::MaintainerMemberOverlap {
            org: org(),
            team: team_name(),
            names: both.into_iter().collect(),
        });
    }

    for (role, list) in [(Role::Maintainers, &team.maintainers), (Role::Members, &team.members)] {
        let dups = find_duplicates(list);
        if !dups.is_empty() {
            violations.push(Violation::TeamDuplicates {
                org: org(),
                team: team_name(),
                role,
                names: dups.into_iter().collect(),
            });
        }
    }

    let missing = difference(&members, scope.org_members);
    if !missing.is_empty() {
        violations.push(Violation::NonOrgTeamMembers {
            org: org(),
            team: team_name(),
            names: missing.into_iter().collect(),
        });
    }

    let admin_members = intersection(&members, scope.admins);
    if !admin_members.is_empty() {
        violations.push(Violation::AdminTeamMembers {
            org: org(),
            team: team_name(),
            names: admin_members.into_iter().collect(),
        });
    }

    for (role, list) in [(Role::Maintainers, &team.maintainers), (Role::Members, &team.members)] {
        if !is_sorted(list) {
            violations.push(Violation::UnsortedTeamList {
                org: org(),
                team: team_name(),
                role,
            });
        }
    }

    violations
}
