//! The verification engine.
//!
//! The `Verifier` evaluates an identity and a consent declaration against
//! the fixed rule set and produces one [`AdmissionResult`]. Every broken
//! rule yields its own finding; nothing short-circuits except the field
//! checks of a document that could not be loaded at all.

use std::path::Path;

use chrono::NaiveDate;

use crate::document::{self, AttestationDocument, DocumentKind, Field};
use crate::error::DocumentError;
use crate::finding::{AcceptedField, AdmissionResult, Finding, Subject};
use crate::policy::{GatePolicy, normalize};

/// Evaluates declarations against a [`GatePolicy`].
///
/// Holds only immutable state, so one verifier can serve any number of
/// independent calls.
#[derive(Debug, Clone)]
pub struct Verifier {
    policy: GatePolicy,
    today: NaiveDate,
}

/// Findings and accepted values collected during one run.
#[derive(Default)]
struct Ledger {
    accepted: Vec<AcceptedField>,
    findings: Vec<Finding>,
}

impl Verifier {
    /// Create a verifier that judges dates against today's local date.
    pub fn new(policy: GatePolicy) -> Self {
        Self::with_today(policy, chrono::Local::now().date_naive())
    }

    /// Create a verifier with an explicit reference date.
    pub const fn with_today(policy: GatePolicy, today: NaiveDate) -> Self {
        Self { policy, today }
    }

    /// Load both declarations from disk and evaluate them.
    pub fn verify(&self, identity_path: &Path, consent_path: &Path) -> AdmissionResult {
        let identity = document::load(DocumentKind::Identity, identity_path);
        let consent = document::load(DocumentKind::Consent, consent_path);
        self.evaluate(identity, consent)
    }

    /// Evaluate two already-loaded parse outcomes.
    pub fn evaluate(
        &self,
        identity: Result<AttestationDocument, DocumentError>,
        consent: Result<AttestationDocument, DocumentError>,
    ) -> AdmissionResult {
        let mut ledger = Ledger::default();

        let identity = self.check_document(DocumentKind::Identity, identity, &mut ledger);
        let consent = self.check_document(DocumentKind::Consent, consent, &mut ledger);

        if let (Some(identity_name), Some(consent_name)) = (
            identity.as_ref().and_then(|v| v.name.as_deref()),
            consent.as_ref().and_then(|v| v.name.as_deref()),
        ) && normalize(identity_name) != normalize(consent_name)
        {
            ledger
                .findings
                .push(Finding::consent_mismatch(identity_name, consent_name));
        }

        let result = AdmissionResult::from_parts(ledger.accepted, ledger.findings);
        if result.is_granted() {
            tracing::info!("admission granted");
        } else {
            tracing::info!(issues = result.findings().len(), "admission rejected");
        }
        result
    }

    /// Check one document's fields, returning what the cross-document
    /// check needs, or `None` when the document itself was unavailable.
    fn check_document(
        &self,
        kind: DocumentKind,
        loaded: Result<AttestationDocument, DocumentError>,
        ledger: &mut Ledger,
    ) -> Option<Validated> {
        let doc = match loaded {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(document = %kind, path = %e.path().display(), error = %e, "declaration unavailable");
                ledger.findings.push(Finding::from_document_error(kind, &e));
                return None;
            }
        };

        let mut validated = Validated::default();
        for &field in kind.fields() {
            let Some(value) = doc.get(field) else {
                ledger.findings.push(Finding::field_missing(kind, field));
                continue;
            };

            match self.check_field(field, value) {
                Ok(()) => {
                    if field == Field::FullName {
                        validated.name = Some(value.to_owned());
                    }
                    ledger.accepted.push(AcceptedField {
                        subject: Subject::Field(kind, field),
                        value: value.to_owned(),
                    });
                }
                Err(reason) => {
                    tracing::debug!(document = %kind, field = %field, reason = %reason, "field rejected");
                    ledger.findings.push(Finding::field_invalid(kind, field, reason));
                }
            }
        }
        Some(validated)
    }

    fn check_field(&self, field: Field, value: &str) -> Result<(), String> {
        match field {
            Field::FullName => non_empty(value, "full name is empty"),
            Field::Email => check_email(value),
            Field::Date => self.check_date(value),
            Field::Acknowledgement => {
                if self.policy.accepts_acknowledgement(value) {
                    Ok(())
                } else {
                    Err(format!(
                        "acknowledgement '{value}' is not an accepted affirmative statement"
                    ))
                }
            }
            Field::Scope => non_empty(value, "scope of use is empty"),
        }
    }

    fn check_date(&self, value: &str) -> Result<(), String> {
        let Some(date) = self.policy.parse_date(value) else {
            return Err(format!(
                "date '{value}' is not parseable (expected one of: {})",
                self.policy.date_formats.join(", ")
            ));
        };
        if date > self.today {
            return Err(format!("date {date} is in the future"));
        }
        Ok(())
    }
}

/// Values from one document that later checks depend on.
#[derive(Default)]
struct Validated {
    /// `full_name`, when present and valid.
    name: Option<String>,
}

fn non_empty(value: &str, reason: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(reason.to_owned())
    } else {
        Ok(())
    }
}

fn check_email(value: &str) -> Result<(), String> {
    let Some((_, domain)) = value.split_once('@') else {
        return Err("email missing @ sign".to_owned());
    };
    if domain.trim().is_empty() {
        return Err("email has empty domain".to_owned());
    }
    Ok(())
}
