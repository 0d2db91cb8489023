//! Interpretation of raw process results as domain outcomes.

use crate::application::ApplicationError;
use crate::domain::{PlanOutcome, SpawnedProcessResult};
use crate::error::{TfwardError, TfwardResult};

/// Interpret the result of `terraform plan -detailed-exitcode`.
///
/// Only valid for plans run with `-detailed-exitcode`: exit code `2` is then
/// "changes present" rather than a failure. Every other non-zero exit is
/// propagated unchanged.
pub fn interpret_plan(result: TfwardResult<SpawnedProcessResult>) -> TfwardResult<PlanOutcome> {
    match result {
        Ok(result) => PlanOutcome::from_detailed_exit_code(result.code).ok_or_else(|| {
            TfwardError::Internal {
                message: format!("plan reported success with exit code {}", result.code),
            }
        }),
        Err(TfwardError::Application(ApplicationError::ProcessExit { code, .. }))
            if code == PlanOutcome::CHANGES_CODE =>
        {
            Ok(PlanOutcome::Changes)
        }
        Err(e) => Err(e),
    }
}
