//! Human- and machine-readable renderings of an admission decision.

use std::fmt::Write;

use crate::finding::AdmissionResult;

/// Render the audit summary shown to the operator.
///
/// A grant lists every accepted field with its value; a rejection lists
/// every finding followed by the issue count.
pub fn render(result: &AdmissionResult) -> String {
    let mut out = String::new();
    match result {
        AdmissionResult::Granted(accepted) => {
            for field in accepted {
                let _ = writeln!(out, "[OK] {}: {}", field.subject, field.value);
            }
            let _ = writeln!(out, "Verification PASSED");
        }
        AdmissionResult::Rejected(rejection) => {
            for finding in rejection.findings() {
                let _ = writeln!(out, "{finding}");
            }
            let _ = writeln!(out, "{} issue(s) found", rejection.len());
        }
    }
    out
}

/// Build a JSON report of the decision.
pub fn to_json(result: &AdmissionResult) -> serde_json::Value {
    serde_json::json!({
        "granted": result.is_granted(),
        "accepted": result.accepted().iter().map(|a| {
            serde_json::json!({
                "field": a.subject.to_string(),
                "value": a.value,
            })
        }).collect::<Vec<_>>(),
        "findings": result.findings().iter().map(|f| {
            serde_json::json!({
                "kind": f.kind(),
                "subject": f.subject().to_string(),
                "severity": f.severity(),
                "message": f.message(),
            })
        }).collect::<Vec<_>>(),
        "issue_count": result.findings().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentKind, Field};
    use crate::finding::{AcceptedField, Finding, Subject};

    fn rejected() -> AdmissionResult {
        AdmissionResult::from_parts(
            Vec::new(),
            vec![
                Finding::field_invalid(DocumentKind::Identity, Field::Email, "email missing @ sign"),
                Finding::field_missing(DocumentKind::Consent, Field::Scope),
            ],
        )
    }

    #[test]
    fn rejection_lists_every_finding_then_the_count() {
        let text = render(&rejected());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "[identity.email] email missing @ sign",
                "[consent.scope] required field 'scope' is missing",
                "2 issue(s) found",
            ]
        );
    }

    #[test]
    fn grant_lists_accepted_values() {
        let result = AdmissionResult::from_parts(
            vec![AcceptedField {
                subject: Subject::Field(DocumentKind::Identity, Field::FullName),
                value: "Jane Doe".to_owned(),
            }],
            Vec::new(),
        );
        let text = render(&result);
        assert!(text.contains("[OK] identity.full_name: Jane Doe"));
        assert!(text.ends_with("Verification PASSED\n"));
    }

    #[test]
    fn json_report_carries_kinds_and_count() {
        let json = to_json(&rejected());
        assert_eq!(json["granted"], serde_json::Value::Bool(false));
        assert_eq!(json["issue_count"], 2);
        assert_eq!(json["findings"][0]["kind"], "field_invalid");
        assert_eq!(json["findings"][0]["subject"], "identity.email");
        assert_eq!(json["findings"][1]["severity"], "fatal");
        assert!(json["accepted"].as_array().is_some_and(Vec::is_empty));
    }
}
