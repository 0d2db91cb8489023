//! Integration tests for tfward-core, wired to the real configuration and
//! in-memory filesystem adapters.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tfward_adapters::{LayeredConfiguration, MemoryFilesystem};
use tfward_core::{
    application::{ApplicationError, PrepareRequest},
    prelude::*,
};

/// Records invocations and plays back a fixed exit code per subcommand.
#[derive(Default)]
struct ScriptedTerraform {
    workspace: Mutex<String>,
    calls: Mutex<Vec<String>>,
    plan_code: i32,
}

impl ScriptedTerraform {
    fn new(workspace: &str, plan_code: i32) -> Self {
        Self {
            workspace: Mutex::new(workspace.into()),
            calls: Mutex::default(),
            plan_code,
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedTerraform {
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        options: &SpawnOptions,
    ) -> TfwardResult<SpawnedProcessResult> {
        assert_eq!(program, "terraform");
        self.calls.lock().unwrap().push(args.join(" "));

        let mut workspace = self.workspace.lock().unwrap();
        let stdout = match args.first().map(String::as_str) {
            Some("-version") => r#"{"terraform_version":"1.7.5"}"#.to_string(),
            Some("workspace") if args[1] == "show" => workspace.clone(),
            Some("workspace") => {
                *workspace = args.last().cloned().unwrap_or_default();
                String::new()
            }
            Some("plan") if self.plan_code != 0 => {
                return Err(ApplicationError::ProcessExit {
                    command: program.into(),
                    args: args.to_vec(),
                    code: self.plan_code,
                    stdout: None,
                    stderr: None,
                }
                .into());
            }
            Some("show") => "Plan: 1 to add, 0 to change, 0 to destroy.".to_string(),
            _ => String::new(),
        };

        Ok(SpawnedProcessResult {
            code: 0,
            stdout: options.capture.stdout.then_some(stdout),
            stderr: None,
        })
    }
}

const PROJECT: &str = r#"
[project]
name = "edge"

[terraform]
workspace = "staging"
version = "1.5"

[infrastructure.variables]
environment = '${ configuration("terraform.workspace") }'
name = '${ configuration("project.name") }'
"#;

fn lifecycle(runner: Arc<ScriptedTerraform>, fs: MemoryFilesystem) -> ProjectLifecycle {
    let config: Arc<dyn ConfigurationReader> =
        Arc::new(LayeredConfiguration::from_toml_str(PROJECT).unwrap());
    let project = PathBuf::from("/work/edge");
    let terraform = TerraformService::new(runner, config.as_ref(), Some(project.clone())).unwrap();
    ProjectLifecycle::new(terraform, Arc::new(fs), config, Some(project))
}

#[tokio::test]
async fn prepare_renders_variables_and_restores_workspace() {
    let runner = Arc::new(ScriptedTerraform::new("default", 2));

    let outcome = lifecycle(runner.clone(), MemoryFilesystem::new())
        .prepare(PrepareRequest {
            output: Some("/work/edge/plan.out".into()),
            print: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(outcome.is_deployment_needed);
    assert_eq!(
        outcome.rendered_plan.as_deref(),
        Some("Plan: 1 to add, 0 to change, 0 to destroy.")
    );
    assert_eq!(
        runner.calls(),
        vec![
            "-version -json",
            "init -input=false",
            "workspace show",
            "workspace select -or-create=true staging",
            "plan -input=false -out=/work/edge/plan.out -detailed-exitcode -var environment=staging -var name=edge",
            "workspace select default",
            "show /work/edge/plan.out",
        ]
    );
}

#[tokio::test]
async fn deploy_removes_the_applied_plan() {
    let runner = Arc::new(ScriptedTerraform::new("staging", 0));
    let fs = MemoryFilesystem::new().with_file("/work/edge/plan.out", "binary plan");

    lifecycle(runner.clone(), fs.clone())
        .deploy(Path::new("/work/edge/plan.out"))
        .await
        .unwrap();

    assert!(!fs.exists(Path::new("/work/edge/plan.out")));
    assert!(
        runner
            .calls()
            .contains(&"apply -input=false /work/edge/plan.out".to_string())
    );
    assert!(!runner.calls().iter().any(|c| c.starts_with("workspace select")));
}

#[tokio::test]
async fn forced_init_clears_terraform_directory() {
    let runner = Arc::new(ScriptedTerraform::new("default", 0));
    let fs = MemoryFilesystem::new()
        .with_file("/work/edge/.terraform/terraform.tfstate", "{}")
        .with_file("/work/edge/main.tf", "");

    lifecycle(runner.clone(), fs.clone()).init(true).await.unwrap();

    assert!(!fs.exists(Path::new("/work/edge/.terraform")));
    assert!(fs.exists(Path::new("/work/edge/main.tf")));
    assert_eq!(runner.calls(), vec!["-version -json", "init -input=false"]);
}

#[tokio::test]
async fn plan_errors_surface_after_restoring() {
    let runner = Arc::new(ScriptedTerraform::new("default", 1));

    let err = lifecycle(runner.clone(), MemoryFilesystem::new())
        .prepare(PrepareRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), Some(1));
    assert_eq!(runner.calls().last().map(String::as_str), Some("workspace select default"));
}
