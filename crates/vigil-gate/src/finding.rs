//! Findings and the admission decision.

use std::fmt;

use serde::Serialize;

use crate::document::{DocumentKind, Field};
use crate::error::DocumentError;

/// What a finding or accepted value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    /// A whole declaration document.
    Document(DocumentKind),
    /// One field of a declaration document.
    Field(DocumentKind, Field),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(kind) => write!(f, "{kind}"),
            Self::Field(kind, field) => write!(f, "{kind}.{field}"),
        }
    }
}

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// The declaration file is absent or not a regular file.
    DocumentMissing,
    /// A required field is absent from a readable document.
    FieldMissing,
    /// A field is present but fails its rule.
    FieldInvalid,
    /// The consent declaration names a different person than the identity.
    ConsentMismatch,
    /// Any failure not covered above, such as a permissions error.
    UnexpectedFailure,
}

/// How serious a finding is. There is a single tier: every finding
/// blocks admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks admission.
    Fatal,
}

/// A single reason for rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    kind: FindingKind,
    subject: Subject,
    message: String,
}

impl Finding {
    /// A document could not be loaded.
    ///
    /// Absent files become [`FindingKind::DocumentMissing`]; anything else
    /// becomes [`FindingKind::UnexpectedFailure`].
    pub fn from_document_error(kind: DocumentKind, error: &DocumentError) -> Self {
        let finding_kind = if error.is_missing() {
            FindingKind::DocumentMissing
        } else {
            FindingKind::UnexpectedFailure
        };
        Self {
            kind: finding_kind,
            subject: Subject::Document(kind),
            message: format!("{kind} declaration unavailable: {error}"),
        }
    }

    /// A required field is absent.
    pub fn field_missing(kind: DocumentKind, field: Field) -> Self {
        Self {
            kind: FindingKind::FieldMissing,
            subject: Subject::Field(kind, field),
            message: format!("required field '{field}' is missing"),
        }
    }

    /// A field failed its rule for `reason`.
    pub fn field_invalid(kind: DocumentKind, field: Field, reason: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::FieldInvalid,
            subject: Subject::Field(kind, field),
            message: reason.into(),
        }
    }

    /// The two declarations name different people.
    pub fn consent_mismatch(identity_name: &str, consent_name: &str) -> Self {
        Self {
            kind: FindingKind::ConsentMismatch,
            subject: Subject::Field(DocumentKind::Consent, Field::FullName),
            message: format!(
                "consent is declared by '{consent_name}' but identity names '{identity_name}'"
            ),
        }
    }

    /// The failure category.
    pub const fn kind(&self) -> FindingKind {
        self.kind
    }

    /// The document or field the finding refers to.
    pub const fn subject(&self) -> Subject {
        self.subject
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Always [`Severity::Fatal`].
    pub const fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.subject, self.message)
    }
}

/// A field value that passed its rule, kept for the audit summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedField {
    /// The field that was accepted.
    pub subject: Subject,
    /// The value as it was accepted.
    pub value: String,
}

/// A non-empty, ordered list of findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    findings: Vec<Finding>,
}

impl Rejection {
    /// Wrap `findings`, or `None` if there are none.
    pub fn new(findings: Vec<Finding>) -> Option<Self> {
        if findings.is_empty() {
            None
        } else {
            Some(Self { findings })
        }
    }

    /// The findings in the order they were produced.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Number of findings; never zero.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Always `false`; present to pair with [`Rejection::len`].
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Outcome of one verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionResult {
    /// Every rule passed. Carries the accepted values in check order.
    Granted(Vec<AcceptedField>),
    /// At least one rule failed.
    Rejected(Rejection),
}

impl AdmissionResult {
    /// Build the decision from everything a run produced.
    pub fn from_parts(accepted: Vec<AcceptedField>, findings: Vec<Finding>) -> Self {
        Rejection::new(findings).map_or(Self::Granted(accepted), Self::Rejected)
    }

    /// Whether admission was granted.
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// Findings of a rejection; empty when granted.
    pub fn findings(&self) -> &[Finding] {
        match self {
            Self::Granted(_) => &[],
            Self::Rejected(rejection) => rejection.findings(),
        }
    }

    /// Accepted values of a grant; empty when rejected.
    pub fn accepted(&self) -> &[AcceptedField] {
        match self {
            Self::Granted(accepted) => accepted,
            Self::Rejected(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn subject_display_uses_dotted_names() {
        assert_eq!(Subject::Document(DocumentKind::Identity).to_string(), "identity");
        assert_eq!(
            Subject::Field(DocumentKind::Consent, Field::Acknowledgement).to_string(),
            "consent.acknowledgement"
        );
    }

    #[test]
    fn rejection_cannot_be_empty() {
        assert!(Rejection::new(Vec::new()).is_none());
        let finding = Finding::field_missing(DocumentKind::Identity, Field::Email);
        let rejection = Rejection::new(vec![finding]).expect("one finding");
        assert_eq!(rejection.len(), 1);
    }

    #[test]
    fn from_parts_picks_the_variant_by_findings() {
        let granted = AdmissionResult::from_parts(Vec::new(), Vec::new());
        assert!(granted.is_granted());
        assert!(granted.findings().is_empty());

        let rejected = AdmissionResult::from_parts(
            Vec::new(),
            vec![Finding::field_missing(DocumentKind::Consent, Field::Scope)],
        );
        assert!(!rejected.is_granted());
        assert_eq!(rejected.findings().len(), 1);
    }

    #[test]
    fn document_errors_map_to_kinds() {
        let missing = DocumentError::NotFound {
            path: PathBuf::from("identity.txt"),
        };
        let finding = Finding::from_document_error(DocumentKind::Identity, &missing);
        assert_eq!(finding.kind(), FindingKind::DocumentMissing);
        assert!(finding.message().contains("identity.txt"));

        let unreadable = DocumentError::Unreadable {
            path: PathBuf::from("consent.txt"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let finding = Finding::from_document_error(DocumentKind::Consent, &unreadable);
        assert_eq!(finding.kind(), FindingKind::UnexpectedFailure);
        assert_eq!(finding.subject(), Subject::Document(DocumentKind::Consent));
    }

    #[test]
    fn finding_display_is_bracketed_subject_and_message() {
        let finding = Finding::field_invalid(DocumentKind::Identity, Field::Email, "email missing @ sign");
        assert_eq!(finding.to_string(), "[identity.email] email missing @ sign");
    }
}
