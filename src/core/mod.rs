//! Core types for orgcheck.
//!
//! This module contains:
//! - Configuration document types (orgs, teams, privacy)
//! - Error, violation and report types
//! - The per-organization validation context

pub mod context;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use context::{OrgScope, TeamScope};
pub use error::{CheckError, LoadError, NoMatchError, ValidationReport, Violation};
pub use types::{OrgConfig, Organization, Privacy, Team};
