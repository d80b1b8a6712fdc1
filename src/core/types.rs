//! Configuration document types.
//!
//! The document is a tree: organizations own teams, and teams own nested
//! child teams. Mappings use [`IndexMap`] so diagnostics follow the order in
//! which entries appear in the file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgConfig {
    /// Organizations keyed by their login.
    #[serde(default)]
    pub orgs: IndexMap<String, Organization>,
}

impl OrgConfig {
    /// Deserialize from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Whether the document declares no organizations.
    pub fn is_empty(&self) -> bool {
        self.orgs.is_empty()
    }

    /// Total number of teams across all organizations, nested teams included.
    pub fn team_count(&self) -> usize {
        self.orgs.values().map(|org| count_teams(&org.teams)).sum()
    }
}

fn count_teams(teams: &IndexMap<String, Team>) -> usize {
    teams
        .values()
        .map(|team| 1 + count_teams(&team.children))
        .sum()
}

/// A single organization entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Display name. The mapping key is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Organization owners, in file order.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Regular members, in file order.
    #[serde(default)]
    pub members: Vec<String>,
    /// Top-level teams keyed by team name.
    #[serde(default)]
    pub teams: IndexMap<String, Team>,
}

impl Organization {
    /// Name used in diagnostics: the `name` field, or `key` when it is unset.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }
}

/// A team, possibly holding nested child teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub maintainers: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,
    /// Former names of this team.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previously: Vec<String>,
    /// Repository name to permission level.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub repos: IndexMap<String, String>,
    #[serde(default)]
    pub children: IndexMap<String, Team>,
}

/// Team visibility.
///
/// Any value other than `closed` or `secret` is kept verbatim in
/// [`Privacy::Unknown`] so it can be reported instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Privacy {
    /// Visible to every organization member.
    Closed,
    /// Visible only to team members and owners.
    Secret,
    /// Unrecognized value.
    Unknown(String),
}

impl Privacy {
    pub fn as_str(&self) -> &str {
        match self {
            Privacy::Closed => "closed",
            Privacy::Secret => "secret",
            Privacy::Unknown(other) => other,
        }
    }
}

impl From<String> for Privacy {
    fn from(value: String) -> Self {
        match value.as_str() {
            "closed" => Privacy::Closed,
            "secret" => Privacy::Secret,
            _ => Privacy::Unknown(value),
        }
    }
}

impl From<Privacy> for String {
    fn from(privacy: Privacy) -> Self {
        privacy.as_str().to_string()
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
