//! Wording and format policy applied by the verifier.
//!
//! Both the accepted acknowledgement phrasings and the accepted date
//! layouts can be overridden from configuration.

use chrono::NaiveDate;

/// Acknowledgement phrasings accepted when no configuration overrides them.
pub const DEFAULT_ACCEPTED_PHRASES: &[&str] = &[
    "I agree",
    "I consent",
    "I accept",
    "I acknowledge",
    "I agree and consent",
    "I understand and agree",
    "agreed",
    "yes",
];

/// Date layouts (chrono `strftime` syntax) accepted by default.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// The configurable part of the rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePolicy {
    /// Affirmative statements accepted in `consent.acknowledgement`.
    pub accepted_phrases: Vec<String>,
    /// Layouts tried, in order, when parsing `date` fields.
    pub date_formats: Vec<String>,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            accepted_phrases: DEFAULT_ACCEPTED_PHRASES
                .iter()
                .map(|&p| p.to_owned())
                .collect(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|&f| f.to_owned()).collect(),
        }
    }
}

impl GatePolicy {
    /// Whether `statement` matches one of the accepted phrases.
    ///
    /// Both sides are trimmed, lowercased and have internal whitespace
    /// runs collapsed before comparison.
    pub fn accepts_acknowledgement(&self, statement: &str) -> bool {
        let statement = normalize(statement);
        self.accepted_phrases
            .iter()
            .any(|phrase| normalize(phrase) == statement)
    }

    /// Parse `value` with the first configured layout that fits.
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        self.date_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
    }
}

/// Case- and whitespace-insensitive form of a free-text value.
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phrases_accept_common_wording() {
        let policy = GatePolicy::default();
        assert!(policy.accepts_acknowledgement("I agree"));
        assert!(policy.accepts_acknowledgement("  i   AGREE "));
        assert!(policy.accepts_acknowledgement("Yes"));
        assert!(!policy.accepts_acknowledgement("maybe"));
        assert!(!policy.accepts_acknowledgement("I agree, mostly"));
    }

    #[test]
    fn empty_phrase_list_accepts_nothing() {
        let policy = GatePolicy {
            accepted_phrases: Vec::new(),
            ..GatePolicy::default()
        };
        assert!(!policy.accepts_acknowledgement("I agree"));
    }

    #[test]
    fn parses_each_default_layout() {
        let policy = GatePolicy::default();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(policy.parse_date("2024-03-09"), expected);
        assert_eq!(policy.parse_date("2024/03/09"), expected);
        assert_eq!(policy.parse_date("09.03.2024"), expected);
        assert_eq!(policy.parse_date("March 9th"), None);
        assert_eq!(policy.parse_date("2024-02-30"), None);
    }

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize("  Jane \t  DOE "), "jane doe");
    }
}
