//! `tfward prepare`: write a plan for the configured workspace.

use tfward_core::application::{PrepareOutcome, PrepareRequest};

use crate::{
    cli::{OutputFormat, PrepareArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub async fn execute(args: PrepareArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let lifecycle = super::lifecycle(&config)?;

    let request = PrepareRequest {
        output: args.output,
        destroy: args.destroy,
        print: args.print,
    };
    let outcome = lifecycle.prepare(request).await?;

    report(&outcome, &output)
}

fn report(outcome: &PrepareOutcome, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&summary(outcome))?;
        return Ok(());
    }

    if let Some(plan) = &outcome.rendered_plan {
        output.header("Plan:")?;
        output.print(plan)?;
    }

    output.info(&format!("Plan written to {}", outcome.output.display()))?;
    if outcome.is_deployment_needed {
        output.success("Changes detected, deployment needed")?;
    } else {
        output.success("No changes, infrastructure is up to date")?;
    }
    Ok(())
}

fn summary(outcome: &PrepareOutcome) -> serde_json::Value {
    serde_json::json!({
        "output": outcome.output.display().to_string(),
        "is_deployment_needed": outcome.is_deployment_needed,
        "plan": outcome.rendered_plan,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn summary_carries_every_field() {
        let outcome = PrepareOutcome {
            output: PathBuf::from("/infra/plan.out"),
            is_deployment_needed: true,
            rendered_plan: Some("+ bucket".into()),
        };

        let value = summary(&outcome);
        assert_eq!(value["output"], "/infra/plan.out");
        assert_eq!(value["is_deployment_needed"], true);
        assert_eq!(value["plan"], "+ bucket");
    }

    #[test]
    fn summary_without_rendered_plan_is_null() {
        let outcome = PrepareOutcome {
            output: PathBuf::from("plan.out"),
            is_deployment_needed: false,
            rendered_plan: None,
        };
        assert!(summary(&outcome)["plan"].is_null());
    }
}
