//! The `vigil verify` subcommand.
//!
//! Verifies both declarations, prints the audit summary, and exits
//! non-zero on rejection. Nothing is launched.

use std::process;

use clap::Args;
use color_eyre::eyre::Result;
use vigil_gate::{Gate, GateConfig, summary};

use super::DocumentArgs;

/// Arguments for `vigil verify`.
#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub documents: DocumentArgs,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the verify command.
pub fn execute(args: VerifyArgs, config: GateConfig) -> Result<()> {
    let gate = Gate::new(config);
    let admission = gate.admit(&args.documents.into_request(true));

    if args.json {
        let mut report = summary::to_json(&admission.result);
        report["documents"] = serde_json::json!({
            "identity": admission.identity_path.display().to_string(),
            "consent": admission.consent_path.display().to_string(),
        });
        report["config"] = serde_json::json!(
            gate.config()
                .origin
                .as_ref()
                .map(|path| path.display().to_string())
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", admission.summary);
    }

    if !admission.result.is_granted() {
        process::exit(1);
    }

    Ok(())
}
