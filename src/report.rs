//! Summary of a collect-mode validation run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validator::RecordOutcome;

/// One rejected record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub index: usize,
    /// See [`crate::ValidationError::kind`]
    pub kind: String,
    /// Title or offending value the error refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub message: String,
}

/// Counts and failures for one input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub errors: Vec<ReportEntry>,
}

impl ValidationReport {
    /// Build a report from outcomes, keeping their order
    pub fn new(source: impl Into<String>, outcomes: &[RecordOutcome]) -> Self {
        let errors: Vec<ReportEntry> = outcomes
            .iter()
            .filter_map(|o| {
                o.result.as_ref().err().map(|e| ReportEntry {
                    index: o.index,
                    kind: e.kind().to_string(),
                    context: e.context().map(str::to_string),
                    message: e.message(),
                })
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            source: source.into(),
            total: outcomes.len(),
            valid: outcomes.len() - errors.len(),
            invalid: errors.len(),
            errors,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_records;
    use crate::validator::RecordValidator;

    #[test]
    fn test_report_counts_and_order() {
        let records = parse_records(
            r#"[
                {"title": "Bad sum", "author": "A", "publisher": "P", "price": 1, "isbn_10": "0306406153"},
                {"title": "Good", "author": "A", "publisher": "P", "price": 1, "isbn_10": "0306406152"},
                {"title": "No isbn", "author": "A", "publisher": "P", "price": 1}
            ]"#,
        )
        .unwrap();
        let outcomes = RecordValidator::default().validate_each(&records);
        let report = ValidationReport::new("books.json", &outcomes);

        assert_eq!(report.total, 3);
        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid, 2);
        assert!(!report.is_clean());

        assert_eq!(report.errors[0].index, 0);
        assert_eq!(report.errors[0].kind, "isbn10_format");
        assert_eq!(report.errors[0].context.as_deref(), Some("0306406153"));
        assert_eq!(report.errors[1].index, 2);
        assert_eq!(report.errors[1].kind, "missing_isbn");
        assert_eq!(report.errors[1].context.as_deref(), Some("No isbn"));
    }

    #[test]
    fn test_report_serializes() {
        let report = ValidationReport::new("empty.json", &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total"], 0);
        assert_eq!(json["source"], "empty.json");
        assert!(json["generated_at"].is_string());
        assert!(report.is_clean());
    }
}
