//! Domain outcomes derived from Terraform exit codes.

use serde::{Deserialize, Serialize};

/// The result of `terraform plan -detailed-exitcode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    /// Exit code `0`: the infrastructure matches the configuration.
    NoChanges,
    /// Exit code `2`: the plan contains changes.
    Changes,
}

impl PlanOutcome {
    pub const NO_CHANGES_CODE: i32 = 0;
    pub const CHANGES_CODE: i32 = 2;

    /// Map a detailed exit code to an outcome. Any other code is a failure.
    pub fn from_detailed_exit_code(code: i32) -> Option<Self> {
        match code {
            Self::NO_CHANGES_CODE => Some(Self::NoChanges),
            Self::CHANGES_CODE => Some(Self::Changes),
            _ => None,
        }
    }

    pub fn has_changes(self) -> bool {
        matches!(self, Self::Changes)
    }
}

impl From<PlanOutcome> for bool {
    fn from(outcome: PlanOutcome) -> Self {
        outcome.has_changes()
    }
}
