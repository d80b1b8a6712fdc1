//! Per-organization validation context.
//!
//! The normalized identity sets are computed once per organization and
//! shared by every stage, including the recursive team checks.

use crate::core::types::Organization;
use crate::input::owners::Approvers;
use crate::validation::names::{normalize_all, NameSet};

/// Everything a stage needs to check one organization.
#[derive(Debug, Clone)]
pub struct OrgScope<'a> {
    /// Name used in diagnostics.
    pub label: &'a str,
    pub org: &'a Organization,
    pub approvers: &'a Approvers,
    /// Minimum number of distinct approvers.
    pub min_approvers: usize,
    pub admins: NameSet,
    pub members: NameSet,
    /// Admins and members together.
    pub org_members: NameSet,
}

impl<'a> OrgScope<'a> {
    pub fn new(
        key: &'a str,
        org: &'a Organization,
        approvers: &'a Approvers,
        min_approvers: usize,
    ) -> Self {
        let admins = normalize_all(&org.admins);
        let members = normalize_all(&org.members);
        let org_members = admins.union(&members).cloned().collect();

        Self {
            label: org.label(key),
            org,
            approvers,
            min_approvers,
            admins,
            members,
            org_members,
        }
    }

    /// Normalized approver set.
    pub fn approver_set(&self) -> NameSet {
        normalize_all(&self.approvers.owners)
    }

    /// The part of the scope passed down through the team tree.
    pub fn team_scope(&self) -> TeamScope<'_> {
        TeamScope {
            org: self.label,
            admins: &self.admins,
            org_members: &self.org_members,
        }
    }
}

/// Organization context handed unchanged to every team at every depth.
#[derive(Debug, Clone, Copy)]
pub struct TeamScope<'a> {
    pub org: &'a str,
    pub admins: &'a NameSet,
    pub org_members: &'a NameSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_normalizes_sets() {
        let org = Organization {
            admins: vec!["@Alice".to_string(), "bob".to_string()],
            members: vec!["Carol".to_string()],
            ..Default::default()
        };
        let approvers = Approvers::new("config.yaml", vec!["@alice".to_string()]);
        let scope = OrgScope::new("example", &org, &approvers, 4);

        assert_eq!(scope.label, "example");
        assert!(scope.admins.contains("alice"));
        assert!(scope.members.contains("carol"));
        assert_eq!(scope.org_members.len(), 3);
        assert_eq!(scope.approver_set().len(), 1);

        let teams = scope.team_scope();
        assert_eq!(teams.org, "example");
        assert!(teams.org_members.contains("bob"));
    }
}
