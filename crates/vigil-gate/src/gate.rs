//! The admission gate as seen by a caller.
//!
//! A caller builds one [`Gate`] from configuration at startup, then asks
//! it to [`admit`](Gate::admit) a [`GateRequest`]. The returned
//! [`Admission`] is binding: `proceed` is only set when every check
//! passed and the caller did not ask for a dry run.

use std::path::PathBuf;

use crate::config::GateConfig;
use crate::document::DocumentKind;
use crate::finding::AdmissionResult;
use crate::summary;
use crate::verify::Verifier;

/// One admission request.
#[derive(Debug, Clone, Default)]
pub struct GateRequest {
    /// Identity declaration; the configured default when `None`.
    pub identity_path: Option<PathBuf>,
    /// Consent declaration; the configured default when `None`.
    pub consent_path: Option<PathBuf>,
    /// Verify and report only, never proceed.
    pub dry_run: bool,
}

/// The gate's answer to a request.
#[derive(Debug, Clone)]
pub struct Admission {
    /// The decision.
    pub result: AdmissionResult,
    /// The rendered audit summary.
    pub summary: String,
    /// Whether the caller may go on to the gated action.
    pub proceed: bool,
    /// The identity path that was checked.
    pub identity_path: PathBuf,
    /// The consent path that was checked.
    pub consent_path: PathBuf,
}

/// Configuration plus a verifier built from it.
#[derive(Debug, Clone)]
pub struct Gate {
    config: GateConfig,
    verifier: Verifier,
}

impl Gate {
    /// Build a gate whose verifier judges dates against today.
    pub fn new(config: GateConfig) -> Self {
        let verifier = Verifier::new(config.policy());
        Self { config, verifier }
    }

    /// Build a gate around an existing verifier. The verifier's policy is
    /// used as-is; `config` only supplies default paths.
    pub const fn with_verifier(config: GateConfig, verifier: Verifier) -> Self {
        Self { config, verifier }
    }

    /// The configuration in effect.
    pub const fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Resolve the request's paths, verify, and render the summary.
    pub fn admit(&self, request: &GateRequest) -> Admission {
        let identity_path = self
            .config
            .document_path(DocumentKind::Identity, request.identity_path.as_deref());
        let consent_path = self
            .config
            .document_path(DocumentKind::Consent, request.consent_path.as_deref());

        tracing::debug!(
            identity = %identity_path.display(),
            consent = %consent_path.display(),
            dry_run = request.dry_run,
            "running admission gate"
        );

        let result = self.verifier.verify(&identity_path, &consent_path);
        let summary = summary::render(&result);
        let proceed = result.is_granted() && !request.dry_run;

        Admission {
            result,
            summary,
            proceed,
            identity_path,
            consent_path,
        }
    }
}
