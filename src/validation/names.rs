//! Login name helpers shared by every validation stage.

use std::collections::BTreeSet;

/// Set of normalized logins. Ordered so diagnostics are deterministic.
pub type NameSet = BTreeSet<String>;

/// Canonical form of a login.
///
/// Leading whitespace and `@` markers and trailing whitespace are dropped,
/// then the result is lowercased. `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(login: &str) -> String {
    login
        .trim_start_matches(|c: char| c == '@' || c.is_whitespace())
        .trim_end()
        .to_lowercase()
}

/// Normalize every entry into a set.
pub fn normalize_all<S: AsRef<str>>(logins: &[S]) -> NameSet {
    logins.iter().map(|l| normalize(l.as_ref())).collect()
}

/// Every normalized login that occurs more than once in `logins`.
///
/// Each duplicate is reported once, regardless of how often it repeats or
/// where it appears.
pub fn find_duplicates<S: AsRef<str>>(logins: &[S]) -> Vec<String> {
    let mut seen = NameSet::new();
    let mut dups = NameSet::new();
    for login in logins {
        let name = normalize(login.as_ref());
        if !seen.insert(name.clone()) {
            dups.insert(name);
        }
    }
    dups.into_iter().collect()
}

/// Whether `logins` is in non-decreasing order, ignoring case.
///
/// Only case is folded; whitespace and `@` prefixes still take part in the
/// comparison.
pub fn is_sorted<S: AsRef<str>>(logins: &[S]) -> bool {
    let lowered: Vec<String> = logins.iter().map(|l| l.as_ref().to_lowercase()).collect();
    lowered.windows(2).all(|pair| pair[0] <= pair[1])
}

/// Sorted `a \ b`.
pub fn difference(a: &NameSet, b: &NameSet) -> Vec<String> {
    a.difference(b).cloned().collect()
}

/// Sorted `a ∩ b`.
pub fn intersection(a: &NameSet, b: &NameSet) -> Vec<String> {
    a.intersection(b).cloned().collect()
}
