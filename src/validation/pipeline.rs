//! Validation pipeline implementation.

use crate::core::context::OrgScope;
use crate::core::error::{ValidationReport, ValidationWarning};
use crate::core::types::OrgConfig;
use crate::input::owners::Approvers;
use crate::validation::stages::{
    ApproverValidation, MembershipValidation, OrderingValidation, TeamValidation, ValidationStage,
};
use log::{debug, info, warn};
use std::time::Instant;

/// Fewest distinct approvers an org may have by default.
pub const DEFAULT_MIN_APPROVERS: usize = 4;

/// Multi-stage validation pipeline.
///
/// Runs every stage against every organization. Violations never stop the
/// run, so a single report lists every independent problem.
pub struct ValidationPipeline {
    stages: Vec<Box<dyn ValidationStage>>,
    min_approvers: usize,
}

impl ValidationPipeline {
    /// Create a new pipeline with the given stages.
    pub fn new(stages: Vec<Box<dyn ValidationStage>>) -> Self {
        Self {
            stages,
            min_approvers: DEFAULT_MIN_APPROVERS,
        }
    }

    /// Create the default validation pipeline with all standard stages.
    pub fn default_pipeline() -> Self {
        Self::new(vec![
            Box::new(ApproverValidation),
            Box::new(MembershipValidation),
            Box::new(OrderingValidation),
            Box::new(TeamValidation),
        ])
    }

    /// Require at least `min` distinct approvers.
    pub fn with_min_approvers(mut self, min: usize) -> Self {
        self.min_approvers = min;
        self
    }

    /// Add a custom validation stage.
    pub fn add_stage(&mut self, stage: Box<dyn ValidationStage>) {
        self.stages.push(stage);
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Validate every organization in `config` through all stages.
    pub fn validate(&self, config: &OrgConfig, approvers: &Approvers) -> ValidationReport {
        let start = Instant::now();
        let mut report = ValidationReport::new();

        if config.is_empty() {
            warn!("configuration declares no organizations");
            report.add_warning(ValidationWarning {
                message: "Configuration declares no organizations".to_string(),
                org: None,
                suggestion: Some("Add at least one entry under `orgs`".to_string()),
            });
        }

        for (key, org) in &config.orgs {
            let scope = OrgScope::new(key, org, approvers, self.min_approvers);

            for stage in &self.stages {
                match stage.validate(&scope) {
                    Ok(warnings) => {
                        debug!("{}: {} passed", scope.label, stage.name());
                        for warning in warnings {
                            report.add_warning(warning);
                        }
                    }
                    Err(violations) => {
                        debug!(
                            "{}: {} found {} violation(s)",
                            scope.label,
                            stage.name(),
                            violations.len()
                        );
                        for violation in violations {
                            report.add_violation(violation);
                        }
                    }
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!("{}", report.summary());
        report
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
