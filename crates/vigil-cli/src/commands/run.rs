//! The `vigil run` subcommand.
//!
//! Verifies both declarations and, only on a grant, runs the gated
//! command, exiting with its status. The summary goes to stderr so the
//! gated command owns stdout.

use std::process::{self, Command};

use clap::Args;
use color_eyre::eyre::{Result, WrapErr, eyre};
use vigil_gate::{Gate, GateConfig};

use super::DocumentArgs;

/// Arguments for `vigil run`.
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub documents: DocumentArgs,

    /// Verify and report only; do not launch the command.
    #[arg(long)]
    pub dry_run: bool,

    /// The gated command and its arguments (after `--`).
    #[arg(
        last = true,
        value_name = "COMMAND",
        required_unless_present = "dry_run"
    )]
    pub command: Vec<String>,
}

/// Execute the run command.
pub fn execute(args: RunArgs, config: GateConfig) -> Result<()> {
    let gate = Gate::new(config);
    let admission = gate.admit(&args.documents.into_request(args.dry_run));

    eprint!("{}", admission.summary);

    if !admission.result.is_granted() {
        eprintln!("Identity verification failed; not launching.");
        process::exit(1);
    }

    if !admission.proceed {
        println!("Dry-run mode: verification successful, not launching.");
        return Ok(());
    }

    let Some((program, rest)) = args.command.split_first() else {
        return Err(eyre!("no command given to run"));
    };

    tracing::info!(program = %program, args = rest.len(), "launching gated command");
    let status = Command::new(program)
        .args(rest)
        .status()
        .wrap_err_with(|| format!("failed to launch `{program}`"))?;

    if !status.success() {
        let code = status.code().unwrap_or(1);
        tracing::warn!(exit_code = code, "gated command exited with error");
        process::exit(code);
    }

    Ok(())
}
