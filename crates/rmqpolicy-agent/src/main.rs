//! rmqpolicy: apply, clear, and inspect RabbitMQ policies from a policy file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use rmqpolicy_agent::commands::{self, BatchSummary};
use rmqpolicy_agent::ctl::{Rabbitmqctl, SystemRunner};
use rmqpolicy_agent::host::{DpkgVersionProbe, HookStatus, LogStatus};
use rmqpolicy_core::error::{PolicyError, Result};
use rmqpolicy_core::{PolicyHost, StatusReporter};

#[derive(Parser, Debug)]
#[command(name = "rmqpolicy", version, about)]
struct Cli {
    /// Report blocked status through `status-set` instead of the log.
    #[arg(long, global = true)]
    hook_status: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create or update every policy in the file.
    Apply(FileArgs),
    /// Remove every policy in the file.
    Clear(FileArgs),
    /// Print the set_policy commands without running them.
    Render(FileArgs),
    /// Print the policies currently on the broker as JSON.
    List,
}

#[derive(clap::Args, Debug)]
struct FileArgs {
    /// Policy file (YAML or JSON).
    path: PathBuf,

    /// JSON list of additional entries, merged after the file's.
    #[arg(long)]
    relation: Option<PathBuf>,
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!(code = e.code().as_str(), "{e}");
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` when some policies were not applied or cleared.
fn run(cli: Cli) -> Result<bool> {
    let runner = SystemRunner;
    let versions = DpkgVersionProbe::new(SystemRunner);
    let hook = HookStatus::new(SystemRunner);
    let status: &dyn StatusReporter = if cli.hook_status { &hook } else { &LogStatus };
    let host = PolicyHost::new(&runner, status, &versions);
    let ctl = Rabbitmqctl::new(&runner, &versions);

    match cli.command {
        Commands::Apply(args) => {
            let policies = load(&args, &ctl)?;
            Ok(report("applied", commands::apply_all(&policies, &host)))
        }
        Commands::Clear(args) => {
            let policies = load(&args, &ctl)?;
            Ok(report("cleared", commands::clear_all(&policies, &host)))
        }
        Commands::Render(args) => {
            let policies = load(&args, &ctl)?;
            for argv in commands::render_all(&policies)? {
                println!("{}", argv.join(" "));
            }
            Ok(true)
        }
        Commands::List => {
            let listed = ctl.list_policies();
            let out = serde_json::to_string_pretty(&listed)
                .map_err(|e| PolicyError::Internal(format!("encode policies: {e}")))?;
            println!("{out}");
            Ok(true)
        }
    }
}

fn load(args: &FileArgs, ctl: &Rabbitmqctl<'_>) -> Result<Vec<rmqpolicy_core::Policy>> {
    let relation = args
        .relation
        .as_ref()
        .map(|path| {
            std::fs::read_to_string(path).map_err(|e| {
                PolicyError::Config(format!("read {} failed: {e}", path.display()))
            })
        })
        .transpose()?;
    commands::load_policies(&args.path, relation.as_deref(), ctl)
}

fn report(verb: &str, summary: BatchSummary) -> bool {
    tracing::info!(
        succeeded = summary.succeeded,
        not_applied = summary.not_applied,
        "{verb} policies"
    );
    summary.not_applied == 0
}
