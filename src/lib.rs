//! # orgcheck - Organization config consistency checks
//!
//! orgcheck validates a declarative GitHub organization membership config
//! (orgs, admins, members and nested teams) and reconciles its admins with
//! the CODEOWNERS approvers of the config file itself. It is meant to run in
//! CI before the config is applied.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orgcheck::prelude::*;
//!
//! let settings = Settings::new("config.yaml", ".");
//! let report = orgcheck::run(&settings)?;
//! for violation in &report.violations {
//!     eprintln!("{}", violation);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Config document types, errors, violations and the validation context
//! - [`input`]: Loading of the config document and the CODEOWNERS rules
//! - [`validation`]: Name normalization and the multi-stage validation pipeline
//! - [`settings`]: Run settings
//! - [`runner`]: A complete load-then-validate run

#![warn(clippy::all)]

pub mod core;
pub mod input;
pub mod runner;
pub mod settings;
pub mod validation;

pub use runner::run;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use orgcheck::prelude::*;
/// ```
pub mod prelude {
    // Config document
    pub use crate::core::types::{OrgConfig, Organization, Privacy, Team};

    // Errors and findings
    pub use crate::core::error::{
        CheckError, CheckResult, LoadError, NoMatchError, Role, SettingsError, ValidationReport,
        ValidationWarning, Violation,
    };

    // Inputs
    pub use crate::input::{load_approvers, load_config, Approvers, CodeOwners, Owner};

    // Validation
    pub use crate::core::context::{OrgScope, TeamScope};
    pub use crate::validation::names::{find_duplicates, is_sorted, normalize, NameSet};
    pub use crate::validation::pipeline::ValidationPipeline;
    pub use crate::validation::stages::{
        ApproverValidation, MembershipValidation, OrderingValidation, TeamValidation,
        ValidationStage,
    };

    // Settings
    pub use crate::settings::Settings;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
