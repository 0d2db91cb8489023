//! Workspace-scoped operations.
//!
//! [`TerraformService::wrap_workspace_operation`] runs an operation with the
//! right Terraform workspace selected and switches back to the previously
//! selected workspace afterwards, whether the operation succeeded, failed or
//! panicked. If the operation is dropped while running, the previous
//! workspace is selected again by a task on the current Tokio runtime.
//!
//! The active workspace is process-wide state of the Terraform project:
//! callers must not run two workspace operations concurrently against the
//! same project directory.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::future::{BoxFuture, FutureExt};
use tokio::runtime::Handle;
use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ConfigurationError, TerraformService},
    domain::{InitOptions, SelectOptions, SpawnOptions, WorkspaceName},
    error::TfwardResult,
};

/// Options for [`TerraformService::wrap_workspace_operation`].
#[derive(Debug, Clone, Default)]
pub struct WorkspaceOperationOptions {
    /// Workspace to select instead of the configured default.
    pub workspace: Option<WorkspaceName>,
    /// Create the workspace if it does not exist yet.
    pub create_workspace_if_needed: bool,
    /// Skip `terraform init`.
    pub skip_init: bool,
    /// Passed to every Terraform command run by the wrapper.
    pub spawn: SpawnOptions,
}

impl TerraformService {
    /// Run `operation` in the default workspace.
    pub async fn run_in_default_workspace<T, F, Fut>(&self, operation: F) -> TfwardResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = TfwardResult<T>>,
    {
        self.wrap_workspace_operation(WorkspaceOperationOptions::default(), operation)
            .await
    }

    /// Initialize Terraform, select the workspace, run `operation`, and
    /// select the previous workspace again.
    ///
    /// No workspace is selected (and none restored) when the target is
    /// already active. If restoring fails, the returned
    /// `ApplicationError::RestorationFailed` also carries the operation's
    /// own error, if any.
    #[instrument(skip_all, fields(workspace))]
    pub async fn wrap_workspace_operation<T, F, Fut>(
        &self,
        options: WorkspaceOperationOptions,
        operation: F,
    ) -> TfwardResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = TfwardResult<T>>,
    {
        let WorkspaceOperationOptions {
            workspace,
            create_workspace_if_needed,
            skip_init,
            spawn,
        } = options;

        let target = workspace
            .or_else(|| self.default_workspace().cloned())
            .ok_or(ConfigurationError::WorkspaceNotConfigured)?;
        tracing::Span::current().record("workspace", target.as_str());

        if !skip_init {
            self.init(InitOptions::default(), spawn.clone()).await?;
        }

        let current = self.workspace_show(spawn.clone()).await?;
        let restore = if current == target.as_str() {
            debug!("Terraform workspace '{}' is already configured.", target);
            None
        } else {
            debug!(
                "Changing Terraform workspace from '{}' to '{}'.",
                current, target
            );
            self.workspace_select(
                &target,
                SelectOptions {
                    or_create: create_workspace_if_needed,
                },
                spawn.clone(),
            )
            .await?;
            // An empty `workspace show` leaves nothing to go back to.
            WorkspaceName::new(current).ok()
        };

        let mut guard = restore.as_ref().map(|previous| RestoreGuard {
            workspace: previous.clone(),
            restore: Some(self.detached_workspace_select(previous, spawn.clone())),
        });

        let outcome = AssertUnwindSafe(async move { operation().await })
            .catch_unwind()
            .await;

        let Some(previous) = restore else {
            return outcome.unwrap_or_else(|payload| panic::resume_unwind(payload));
        };

        debug!("Switching back to Terraform workspace '{}'.", previous);
        let restored = self
            .workspace_select(&previous, SelectOptions::default(), spawn)
            .await;
        if let Some(guard) = guard.as_mut() {
            guard.disarm();
        }

        let result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                if let Err(restore_error) = &restored {
                    warn!(
                        error = %restore_error,
                        workspace = %previous,
                        "Failed to restore Terraform workspace after a panic"
                    );
                }
                panic::resume_unwind(payload)
            }
        };

        match restored {
            Ok(()) => result,
            Err(restore_error) => {
                warn!(
                    error = %restore_error,
                    workspace = %previous,
                    "Failed to restore Terraform workspace"
                );
                Err(ApplicationError::RestorationFailed {
                    workspace: previous.to_string(),
                    source: Box::new(restore_error),
                    operation_error: result.err().map(Box::new),
                }
                .into())
            }
        }
    }
}

/// Selects the previous workspace in the background when a workspace
/// operation is dropped before it could restore it.
struct RestoreGuard {
    workspace: WorkspaceName,
    restore: Option<BoxFuture<'static, TfwardResult<()>>>,
}

impl RestoreGuard {
    fn disarm(&mut self) {
        self.restore = None;
    }
}

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        let Some(restore) = self.restore.take() else {
            return;
        };
        let workspace = self.workspace.to_string();

        match Handle::try_current() {
            Ok(handle) => {
                warn!(
                    workspace = %workspace,
                    "Workspace operation cancelled, restoring Terraform workspace in the background"
                );
                handle.spawn(async move {
                    if let Err(error) = restore.await {
                        warn!(
                            %error,
                            workspace = %workspace,
                            "Failed to restore Terraform workspace"
                        );
                    }
                });
            }
            Err(_) => warn!(
                workspace = %workspace,
                "Workspace operation cancelled outside a Tokio runtime, Terraform workspace left selected"
            ),
        }
    }
}
