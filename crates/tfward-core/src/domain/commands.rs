//! Terraform command construction.
//!
//! Pure functions mapping each logical operation to the subcommand, its
//! ordered argument list, and the spawn options it must run with. Nothing in
//! here performs I/O.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::domain::spawn::{Capture, LogLevel, Logging, SpawnOptions, StreamLogging};
use crate::domain::value_objects::WorkspaceName;

/// A fully described Terraform invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The subcommand (first argument) passed to `terraform`.
    pub command: String,
    /// Arguments placed after the subcommand.
    pub args: Vec<String>,
    pub options: SpawnOptions,
}

impl Invocation {
    fn new(command: &str, args: Vec<String>, options: SpawnOptions) -> Self {
        Self {
            command: command.to_string(),
            args,
            options,
        }
    }

    /// The complete argument vector, subcommand first.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.command.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// Options for `terraform init`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Fetch the latest provider versions allowed by the constraints.
    pub upgrade: bool,
}

/// Options for `terraform workspace select`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    pub or_create: bool,
}

/// Options for `terraform plan`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Plan the destruction of every managed resource.
    pub destroy: bool,
    /// Variables forwarded as `-var name=value`, in insertion order.
    pub variables: IndexMap<String, String>,
}

/// Options for `terraform fmt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FmtOptions {
    pub check: bool,
    pub recursive: bool,
    /// Files or directories, appended verbatim.
    pub targets: Vec<PathBuf>,
}

pub fn init(opts: InitOptions, options: SpawnOptions) -> Invocation {
    let mut args = vec!["-input=false".to_string()];
    if opts.upgrade {
        args.push("-upgrade".into());
    }
    Invocation::new("init", args, options)
}

/// `terraform -version -json`, used by the version gate.
pub fn version_probe(options: SpawnOptions) -> Invocation {
    let options = SpawnOptions {
        capture: Capture {
            stdout: true,
            ..options.capture
        },
        logging: Logging::all(LogLevel::Debug),
        ..options
    };
    Invocation::new("-version", vec!["-json".into()], options)
}

/// `terraform workspace show`. Stdout is always captured and kept out of the
/// normal log unless the caller asks otherwise.
pub fn workspace_show(options: SpawnOptions) -> Invocation {
    let logging = if options.logging.is_unset() {
        Logging::streams(StreamLogging::Suppressed, StreamLogging::Level(LogLevel::Debug))
    } else {
        options.logging
    };
    let options = SpawnOptions {
        capture: Capture {
            stdout: true,
            ..options.capture
        },
        logging,
        ..options
    };
    Invocation::new("workspace", vec!["show".into()], options)
}

pub fn workspace_select(
    workspace: &WorkspaceName,
    opts: SelectOptions,
    options: SpawnOptions,
) -> Invocation {
    let mut args = vec!["select".to_string()];
    if opts.or_create {
        args.push("-or-create=true".into());
    }
    args.push(workspace.to_string());
    Invocation::new("workspace", args, options)
}

/// `terraform plan` with `-detailed-exitcode`, which the plan outcome
/// interpretation relies on.
pub fn plan(out: &Path, opts: &PlanOptions, options: SpawnOptions) -> Invocation {
    let mut args = vec![
        "-input=false".to_string(),
        format!("-out={}", out.display()),
        "-detailed-exitcode".to_string(),
    ];
    if opts.destroy {
        args.push("-destroy".into());
    }
    for (name, value) in &opts.variables {
        args.push("-var".into());
        args.push(format!("{name}={value}"));
    }
    Invocation::new("plan", args, options)
}

pub fn apply(plan: &Path, options: SpawnOptions) -> Invocation {
    Invocation::new(
        "apply",
        vec!["-input=false".into(), plan.display().to_string()],
        options,
    )
}

/// `terraform show <plan>`. Both streams are captured whatever the caller
/// passed; logging is silenced unless explicitly requested.
pub fn show(path: &Path, options: SpawnOptions) -> Invocation {
    let logging = if options.logging.is_unset() {
        Logging::suppressed()
    } else {
        options.logging
    };
    let options = SpawnOptions {
        capture: Capture::both(),
        logging,
        ..options
    };
    Invocation::new("show", vec![path.display().to_string()], options)
}

pub fn validate(options: SpawnOptions) -> Invocation {
    Invocation::new("validate", Vec::new(), options)
}

pub fn fmt(opts: &FmtOptions, options: SpawnOptions) -> Invocation {
    let mut args = Vec::new();
    if opts.check {
        args.push("-check".to_string());
    }
    if opts.recursive {
        args.push("-recursive".to_string());
    }
    args.extend(opts.targets.iter().map(|t| t.display().to_string()));
    Invocation::new("fmt", args, options)
}
