//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "tfward",
    bin_name = "tfward",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Supervised Terraform runs",
    long_about = "tfward runs Terraform for a project: it checks the installed \
                  version, selects the configured workspace for the duration of \
                  an operation, and switches back afterwards.",
    after_help = "EXAMPLES:\n\
        \x20 tfward init\n\
        \x20 tfward prepare --output plan.out --print\n\
        \x20 tfward deploy plan.out\n\
        \x20 tfward -C infra/network lint",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize Terraform for the project.
    #[command(
        about = "Run terraform init",
        after_help = "EXAMPLES:\n\
            \x20 tfward init\n\
            \x20 tfward init --force   # remove .terraform first"
    )]
    Init(InitArgs),

    /// Upgrade providers and modules within the configured constraints.
    #[command(
        name = "dependencies-update",
        visible_alias = "deps",
        about = "Run terraform init -upgrade"
    )]
    DependenciesUpdate,

    /// Validate the configuration and check its formatting.
    #[command(about = "Run terraform validate and terraform fmt -check")]
    Lint,

    /// Write a plan for the configured workspace.
    #[command(
        visible_alias = "plan",
        about = "Plan a deployment",
        after_help = "EXAMPLES:\n\
            \x20 tfward prepare\n\
            \x20 tfward prepare --output out/plan.out --print\n\
            \x20 tfward prepare --destroy"
    )]
    Prepare(PrepareArgs),

    /// Apply a plan written by `prepare`.
    #[command(
        visible_alias = "apply",
        about = "Apply a plan",
        after_help = "EXAMPLES:\n\
            \x20 tfward deploy plan.out"
    )]
    Deploy(DeployArgs),

    /// Inspect Terraform workspaces.
    #[command(about = "Workspace commands", subcommand)]
    Workspace(WorkspaceCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tfward completions bash > ~/.local/share/bash-completion/completions/tfward\n\
            \x20 tfward completions zsh  > ~/.zfunc/_tfward\n\
            \x20 tfward completions fish > ~/.config/fish/completions/tfward.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the merged configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 tfward config get terraform.workspace\n\
            \x20 tfward config list\n\
            \x20 tfward config path"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `tfward init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the `.terraform` directory before initializing.
    #[arg(short = 'f', long = "force", help = "Remove .terraform before init")]
    pub force: bool,
}

// ── prepare ───────────────────────────────────────────────────────────────────

/// Arguments for `tfward prepare`.
#[derive(Debug, Args)]
pub struct PrepareArgs {
    /// Where to write the plan.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Plan file to write (default: plan.out)"
    )]
    pub output: Option<PathBuf>,

    /// Plan the destruction of every resource.
    #[arg(long = "destroy", help = "Plan a destroy")]
    pub destroy: bool,

    /// Print the plan when it has changes.
    #[arg(short = 'p', long = "print", help = "Print the plan if it has changes")]
    pub print: bool,
}

// ── deploy ────────────────────────────────────────────────────────────────────

/// Arguments for `tfward deploy`.
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Plan file written by `tfward prepare`. Deleted once applied.
    #[arg(value_name = "PLAN", help = "Plan file to apply")]
    pub plan: PathBuf,
}

// ── workspace subcommands ─────────────────────────────────────────────────────

/// Subcommands for `tfward workspace`.
#[derive(Debug, Subcommand)]
pub enum WorkspaceCommands {
    /// Print the currently selected workspace.
    Show,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `tfward completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `tfward config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `terraform.workspace`.
        key: String,
    },
    /// Print the merged configuration.
    List,
    /// Print the configuration files that were read.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_prepare_command() {
        let cli = Cli::parse_from([
            "tfward",
            "prepare",
            "--output",
            "out.plan",
            "--destroy",
            "--print",
        ]);
        match cli.command {
            Commands::Prepare(args) => {
                assert_eq!(args.output, Some(PathBuf::from("out.plan")));
                assert!(args.destroy);
                assert!(args.print);
            }
            other => panic!("expected Prepare, got {other:?}"),
        }
    }

    #[test]
    fn plan_alias() {
        let cli = Cli::parse_from(["tfward", "plan"]);
        assert!(matches!(cli.command, Commands::Prepare(_)));
    }

    #[test]
    fn deploy_requires_a_plan() {
        assert!(Cli::try_parse_from(["tfward", "deploy"]).is_err());

        let cli = Cli::parse_from(["tfward", "deploy", "plan.out"]);
        assert!(matches!(cli.command, Commands::Deploy(DeployArgs { ref plan }) if plan == &PathBuf::from("plan.out")));
    }

    #[test]
    fn global_project_after_subcommand() {
        let cli = Cli::parse_from(["tfward", "lint", "-C", "infra"]);
        assert_eq!(cli.global.project, Some(PathBuf::from("infra")));
        assert!(matches!(cli.command, Commands::Lint));
    }

    #[test]
    fn dependencies_update_name() {
        let cli = Cli::parse_from(["tfward", "dependencies-update"]);
        assert!(matches!(cli.command, Commands::DependenciesUpdate));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["tfward", "--quiet", "--verbose", "lint"]);
        assert!(result.is_err());
    }
}
