//! Validation of a loaded configuration against its approvers.
//!
//! Every stage runs against every organization and all findings are
//! collected; nothing short-circuits.

pub mod names;
pub mod pipeline;
pub mod stages;

pub use pipeline::{ValidationPipeline, DEFAULT_MIN_APPROVERS};
pub use stages::{
    ApproverValidation, MembershipValidation, OrderingValidation, TeamValidation,
    ValidationStage,
};
