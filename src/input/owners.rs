//! CODEOWNERS parsing and path matching.
//!
//! Rules are `pattern owner...` lines. Patterns follow the gitignore-style
//! conventions GitHub uses for CODEOWNERS, and the last matching rule wins.

use crate::core::error::{LoadError, LoadResult, NoMatchError};
use glob::{MatchOptions, Pattern};
use log::{debug, info};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Locations searched for the rule file, relative to the owners directory.
pub const CODEOWNERS_LOCATIONS: [&str; 3] = ["CODEOWNERS", ".github/CODEOWNERS", "docs/CODEOWNERS"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// An owner listed on a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    /// `@login`
    User(String),
    /// `@org/team-slug`
    Team { org: String, team: String },
    /// `someone@example.com`
    Email(String),
}

impl FromStr for Owner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(handle) = s.strip_prefix('@') {
            return match handle.split_once('/') {
                Some((org, team)) if is_login(org) && is_team_slug(team) => Ok(Owner::Team {
                    org: org.to_string(),
                    team: team.to_string(),
                }),
                None if is_login(handle) => Ok(Owner::User(handle.to_string())),
                _ => Err(format!("invalid owner '{}'", s)),
            };
        }

        match s.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
            {
                Ok(Owner::Email(s.to_string()))
            }
            _ => Err(format!("invalid owner '{}'", s)),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::User(login) => write!(f, "@{}", login),
            Owner::Team { org, team } => write!(f, "@{}/{}", org, team),
            Owner::Email(email) => f.write_str(email),
        }
    }
}

fn is_login(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_team_slug(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || "-_.".contains(c))
}

/// Split a rule line on whitespace not preceded by a backslash.
///
/// Tokens keep their escapes; [`OwnerPattern::new`] resolves them.
fn split_unescaped(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
            start.get_or_insert(i);
        } else if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(&line[s..i]);
            }
        } else {
            start.get_or_insert(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&line[s..]);
    }
    tokens
}

/// Resolve `\x` escapes into glob syntax. Escaped glob metacharacters
/// become single-character classes so they match literally.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(e @ ('*' | '?' | '[' | ']')) => {
                out.push('[');
                out.push(e);
                out.push(']');
            }
            Some(e) => out.push(e),
            None => out.push('\\'),
        }
    }
    out
}

/// A compiled CODEOWNERS path pattern.
#[derive(Debug, Clone)]
pub struct OwnerPattern {
    raw: String,
    glob: Pattern,
    /// Only matches from the repository root.
    anchored: bool,
    /// Trailing `/`: only directories match.
    dir_only: bool,
    /// Final `*` component: only direct children match, never a subtree.
    leaf_only: bool,
}

impl OwnerPattern {
    pub fn new(raw: &str) -> Result<Self, String> {
        if raw.starts_with('!') {
            return Err(format!("negated pattern '{}' is not supported", raw));
        }
        let literal = unescape(raw);

        let dir_only = literal.ends_with('/');
        let trimmed = literal.trim_end_matches('/');
        let anchored = trimmed.starts_with('/') || trimmed.trim_start_matches('/').contains('/');
        let mut body = trimmed.trim_start_matches('/');
        if body.is_empty() {
            body = "**";
        }
        let leaf_only = body == "*" || body.ends_with("/*");

        let glob = Pattern::new(body).map_err(|e| format!("invalid pattern '{}': {}", raw, e))?;

        Ok(Self {
            raw: raw.to_string(),
            glob,
            anchored,
            dir_only,
            leaf_only,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern applies to the repository-relative file `path`.
    pub fn matches(&self, path: &str) -> bool {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let starts = if self.anchored { 0..1.min(segments.len()) } else { 0..segments.len() };

        for start in starts {
            for end in (start + 1)..=segments.len() {
                let is_dir = end < segments.len();
                if is_dir && self.leaf_only {
                    continue;
                }
                if !is_dir && self.dir_only {
                    continue;
                }
                let candidate = segments[start..end].join("/");
                if self.glob.matches_with(&candidate, MATCH_OPTIONS) {
                    return true;
                }
            }
        }
        false
    }
}

/// One line of the rule file.
#[derive(Debug, Clone)]
pub struct OwnerRule {
    /// 1-based line number.
    pub line: usize,
    pub pattern: OwnerPattern,
    pub owners: Vec<Owner>,
}

/// A parsed rule file.
#[derive(Debug, Clone)]
pub struct CodeOwners {
    path: PathBuf,
    rules: Vec<OwnerRule>,
}

impl CodeOwners {
    /// Parse rule file text. `path` is only used in error messages.
    pub fn parse(text: &str, path: impl Into<PathBuf>) -> LoadResult<Self> {
        let path = path.into();
        let mut rules = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = split_unescaped(line).into_iter();
            let Some(raw_pattern) = tokens.next() else {
                continue;
            };
            let syntax = |reason: String| LoadError::OwnersSyntax {
                path: path.clone(),
                line: line_no,
                reason,
            };

            let pattern = OwnerPattern::new(raw_pattern).map_err(syntax)?;
            let owners = tokens
                .take_while(|t| !t.starts_with('#'))
                .map(|t| t.parse::<Owner>().map_err(syntax))
                .collect::<LoadResult<Vec<_>>>()?;

            rules.push(OwnerRule {
                line: line_no,
                pattern,
                owners,
            });
        }

        Ok(Self { path, rules })
    }

    /// Locate and parse the rule file inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> LoadResult<Self> {
        let dir = dir.as_ref();
        let path = CODEOWNERS_LOCATIONS
            .iter()
            .map(|loc| dir.join(loc))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| LoadError::OwnersMissing {
                dir: dir.to_path_buf(),
            })?;

        let text = std::fs::read_to_string(&path).map_err(|source| LoadError::OwnersRead {
            path: path.clone(),
            source,
        })?;
        let owners = Self::parse(&text, path)?;
        debug!("parsed {} CODEOWNERS rules from {}", owners.len(), owners.path.display());
        Ok(owners)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule that decides ownership of `path`: the last one matching it.
    pub fn matching_rule(&self, path: &str) -> Option<&OwnerRule> {
        self.rules.iter().rev().find(|rule| rule.pattern.matches(path))
    }

    /// Owners of `path`, or an error when no rule covers it.
    pub fn approvers_for(&self, path: &str) -> Result<Approvers, NoMatchError> {
        let rule = self.matching_rule(path).ok_or_else(|| NoMatchError {
            path: path.to_string(),
            owners_file: self.path.clone(),
        })?;
        debug!(
            "{} owned by rule '{}' on line {}",
            path,
            rule.pattern.as_str(),
            rule.line
        );
        Ok(Approvers::new(
            path,
            rule.owners.iter().map(Owner::to_string).collect(),
        ))
    }
}

/// Owners that must approve changes to the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approvers {
    /// Repository-relative path the owners were resolved for.
    pub path: String,
    /// Owners in rule order, rendered as they appear in the file.
    pub owners: Vec<String>,
}

impl Approvers {
    pub fn new(path: impl Into<String>, owners: Vec<String>) -> Self {
        Self {
            path: path.into(),
            owners,
        }
    }
}

/// Repository-relative form of `config_path` used for rule matching.
///
/// Paths below `owners_dir` are made relative to it; `.` components are
/// dropped and separators become `/`.
pub fn repo_relative_path(config_path: &Path, owners_dir: &Path) -> String {
    let relative = config_path.strip_prefix(owners_dir).unwrap_or(config_path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Load the rule file from `owners_dir` and resolve the approvers of
/// `config_path`.
pub fn load_approvers(
    owners_dir: impl AsRef<Path>,
    config_path: impl AsRef<Path>,
) -> crate::core::error::CheckResult<Approvers> {
    let owners_dir = owners_dir.as_ref();
    let codeowners = CodeOwners::from_dir(owners_dir)?;
    let path = repo_relative_path(config_path.as_ref(), owners_dir);
    let approvers = codeowners.approvers_for(&path)?;
    info!(
        "loaded {} approvers for {} from {}",
        approvers.owners.len(),
        approvers.path,
        codeowners.path().display()
    );
    Ok(approvers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CheckError;
    use std::fs;
    use tempfile::TempDir;

    const RULES: &str = "\
# Default owners
*                   @fallback

/config.yaml        @alice @Bob @carol @dave   # org admins
docs/               docs@example.com
/tools/*            @org/tooling
*.md                @writers
";

    fn pattern(raw: &str) -> OwnerPattern {
        OwnerPattern::new(raw).unwrap()
    }

    #[test]
    fn test_parse_owners() {
        assert_eq!("@alice".parse::<Owner>(), Ok(Owner::User("alice".to_string())));
        assert_eq!(
            "@kubernetes/sig-node".parse::<Owner>(),
            Ok(Owner::Team {
                org: "kubernetes".to_string(),
                team: "sig-node".to_string()
            })
        );
        assert_eq!(
            "a@example.com".parse::<Owner>(),
            Ok(Owner::Email("a@example.com".to_string()))
        );
        assert!("alice".parse::<Owner>().is_err());
        assert!("@".parse::<Owner>().is_err());
        assert!("@a/b/c".parse::<Owner>().is_err());
    }

    #[test]
    fn test_owner_display_round_trips() {
        for raw in ["@alice", "@org/team", "x@example.org"] {
            assert_eq!(raw.parse::<Owner>().unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_unanchored_pattern_matches_any_depth() {
        let p = pattern("config.yaml");
        assert!(p.matches("config.yaml"));
        assert!(p.matches("org/config.yaml"));
        assert!(!p.matches("config.yml"));
    }

    #[test]
    fn test_anchored_pattern() {
        let p = pattern("/config.yaml");
        assert!(p.matches("config.yaml"));
        assert!(!p.matches("org/config.yaml"));

        let p = pattern("config/org.yaml");
        assert!(p.matches("config/org.yaml"));
        assert!(!p.matches("nested/config/org.yaml"));
    }

    #[test]
    fn test_directory_patterns() {
        let p = pattern("docs/");
        assert!(p.matches("docs/readme.md"));
        assert!(p.matches("a/docs/deep/file"));
        assert!(!p.matches("docs"));

        let p = pattern("/build");
        assert!(p.matches("build/output/log"));
    }

    #[test]
    fn test_star_patterns() {
        let p = pattern("*.yaml");
        assert!(p.matches("config.yaml"));
        assert!(p.matches("a/b/config.yaml"));

        let p = pattern("/tools/*");
        assert!(p.matches("tools/run.sh"));
        assert!(!p.matches("tools/nested/run.sh"));

        let p = pattern("/tools/**");
        assert!(p.matches("tools/nested/run.sh"));
    }

    #[test]
    fn test_negation_is_rejected() {
        assert!(OwnerPattern::new("!secret").is_err());
    }

    #[test]
    fn test_last_matching_rule_wins() {
        let owners = CodeOwners::parse(RULES, "CODEOWNERS").unwrap();
        assert_eq!(owners.len(), 5);

        let rule = owners.matching_rule("config.yaml").unwrap();
        assert_eq!(rule.line, 4);
        assert_eq!(rule.owners.len(), 4);

        assert_eq!(owners.matching_rule("README.md").unwrap().line, 7);
        assert_eq!(owners.matching_rule("src/main.rs").unwrap().line, 2);
    }

    #[test]
    fn test_inline_comment_ends_owner_list() {
        let owners = CodeOwners::parse(RULES, "CODEOWNERS").unwrap();
        let approvers = owners.approvers_for("config.yaml").unwrap();
        assert_eq!(approvers.owners, vec!["@alice", "@Bob", "@carol", "@dave"]);
    }

    #[test]
    fn test_escaped_space_stays_in_pattern() {
        let owners = CodeOwners::parse("my\\ file.yaml @alice\n", "CODEOWNERS").unwrap();
        let approvers = owners.approvers_for("orgs/my file.yaml").unwrap();
        assert_eq!(approvers.owners, vec!["@alice"]);
        assert!(owners.matching_rule("my").is_none());
        assert!(owners.matching_rule("file.yaml").is_none());
    }

    #[test]
    fn test_escaped_characters_match_literally() {
        let owners = CodeOwners::parse("\\#notes.md @alice\nlit\\*.md @bob\n", "CODEOWNERS").unwrap();
        assert_eq!(owners.approvers_for("#notes.md").unwrap().owners, vec!["@alice"]);
        assert_eq!(owners.approvers_for("lit*.md").unwrap().owners, vec!["@bob"]);
        assert!(owners.matching_rule("literal.md").is_none());
    }

    #[test]
    fn test_split_unescaped() {
        assert_eq!(split_unescaped("a\\ b  @x\t@y"), vec!["a\\ b", "@x", "@y"]);
        assert_eq!(split_unescaped("trailing\\"), vec!["trailing\\"]);
        assert!(split_unescaped("   ").is_empty());
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = CodeOwners::parse("*.rs @ok\n*.go not-an-owner\n", "CODEOWNERS").unwrap_err();
        match err {
            LoadError::OwnersSyntax { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("not-an-owner"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rule_without_owners() {
        let owners = CodeOwners::parse("/config.yaml\n", "CODEOWNERS").unwrap();
        let approvers = owners.approvers_for("config.yaml").unwrap();
        assert!(approvers.owners.is_empty());
    }

    #[test]
    fn test_no_matching_rule() {
        let owners = CodeOwners::parse("/docs/ @alice\n", "CODEOWNERS").unwrap();
        let err = owners.approvers_for("config.yaml").unwrap_err();
        assert_eq!(err.path, "config.yaml");
    }

    #[test]
    fn test_repo_relative_path() {
        assert_eq!(
            repo_relative_path(Path::new("./config.yaml"), Path::new(".")),
            "config.yaml"
        );
        assert_eq!(
            repo_relative_path(Path::new("repo/config/org.yaml"), Path::new("repo")),
            "config/org.yaml"
        );
        assert_eq!(
            repo_relative_path(Path::new("config.yaml"), Path::new("elsewhere")),
            "config.yaml"
        );
    }

    #[test]
    fn test_load_approvers_from_github_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".github")).unwrap();
        fs::write(dir.path().join(".github/CODEOWNERS"), RULES).unwrap();

        let config = dir.path().join("config.yaml");
        let approvers = load_approvers(dir.path(), &config).unwrap();
        assert_eq!(approvers.path, "config.yaml");
        assert_eq!(approvers.owners.len(), 4);
    }

    #[test]
    fn test_load_approvers_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_approvers(dir.path(), "config.yaml").unwrap_err();
        assert!(matches!(err, CheckError::Load(LoadError::OwnersMissing { .. })));
    }

    #[test]
    fn test_load_approvers_no_match() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CODEOWNERS"), "/docs/ @alice\n").unwrap();
        let err = load_approvers(dir.path(), "config.yaml").unwrap_err();
        assert!(matches!(err, CheckError::NoMatch(_)));
    }
}
