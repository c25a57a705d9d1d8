//! CLI subcommands.

use std::path::PathBuf;

use clap::Args;
use vigil_gate::GateRequest;

#[expect(
    unreachable_pub,
    reason = "binary crate, pub inside private module is fine"
)]
pub mod init;
#[expect(
    unreachable_pub,
    reason = "binary crate, pub inside private module is fine"
)]
pub mod run;
#[expect(
    unreachable_pub,
    reason = "binary crate, pub inside private module is fine"
)]
pub mod verify;

/// Declaration path overrides shared by `verify` and `run`.
#[derive(Args)]
pub(crate) struct DocumentArgs {
    /// Path to the identity declaration (default: identity.txt).
    #[arg(long, value_name = "PATH")]
    pub(crate) identity: Option<PathBuf>,

    /// Path to the consent declaration (default: consent.txt).
    #[arg(long, value_name = "PATH")]
    pub(crate) consent: Option<PathBuf>,
}

impl DocumentArgs {
    pub(crate) fn into_request(self, dry_run: bool) -> GateRequest {
        GateRequest {
            identity_path: self.identity,
            consent_path: self.consent,
            dry_run,
        }
    }
}
