//! Loading of the two run inputs: the org configuration document and the
//! CODEOWNERS rules that assign approvers to it.

pub mod config;
pub mod owners;

pub use config::load_config;
pub use owners::{load_approvers, Approvers, CodeOwners, Owner, OwnerPattern, OwnerRule};
