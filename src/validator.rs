//! Turns raw JSON records into validated [`BookRecord`]s
//!
//! Validation runs in a fixed order:
//!
//! 1. ISBN presence: at least one of `isbn_10` / `isbn_13` must be given.
//! 2. Field extraction and coercion for the required and optional fields.
//! 3. The ISBN-10 length and checksum rule, when `isbn_10` is given.
//!
//! A record either passes every step or yields a [`ValidationError`];
//! nothing is partially applied.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{ErrorPolicy, ValidationConfig};
use crate::error::{BatchError, CatalogError, ValidationError};
use crate::isbn::Isbn10;
use crate::record::{BookRecord, RawRecord};

/// Result of validating one record in collect mode
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    /// Zero-based position in the input
    pub index: usize,
    pub result: Result<BookRecord, ValidationError>,
}

impl RecordOutcome {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

/// Record validator
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    config: ValidationConfig,
}

impl RecordValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validator that lower-cases every text field before checking it
    pub fn lowercasing() -> Self {
        Self::new(ValidationConfig {
            normalize_case: true,
            ..ValidationConfig::default()
        })
    }

    /// Validate a single raw record
    pub fn validate(&self, raw: &RawRecord) -> Result<BookRecord, ValidationError> {
        if !has_value(raw, "isbn_10") && !has_value(raw, "isbn_13") {
            let title = text_of(raw.get("title")).unwrap_or_default();
            return Err(ValidationError::missing_isbn(title));
        }

        let title = self.required_text(raw, "title")?;
        if title.is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        let author = self.required_text(raw, "author")?;
        let publisher = self.required_text(raw, "publisher")?;
        let price = price_of(raw)?;
        let subtitle = self.optional_text(raw, "subtitle")?;
        let isbn_13 = self.optional_text(raw, "isbn_13")?;
        let isbn_10 = self
            .optional_text(raw, "isbn_10")?
            .map(Isbn10::parse)
            .transpose()?;

        debug!(title = %title, "record validated");

        Ok(BookRecord {
            title,
            author,
            publisher,
            price,
            isbn_10,
            isbn_13,
            subtitle,
        })
    }

    /// Validate records in order, stopping at the first invalid one
    pub fn validate_all(&self, records: &[RawRecord]) -> Result<Vec<BookRecord>, BatchError> {
        let books = records
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                self.validate(raw)
                    .map_err(|source| BatchError { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = books.len(), "validated all records");
        Ok(books)
    }

    /// Validate every record, keeping one outcome per input in input order
    pub fn validate_each(&self, records: &[RawRecord]) -> Vec<RecordOutcome> {
        let outcomes: Vec<RecordOutcome> = records
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let result = self.validate(raw);
                if let Err(e) = &result {
                    warn!(index, kind = e.kind(), "record rejected: {}", e);
                }
                RecordOutcome { index, result }
            })
            .collect();

        let valid = outcomes.iter().filter(|o| o.is_valid()).count();
        info!(
            total = outcomes.len(),
            valid,
            invalid = outcomes.len() - valid,
            "validated records"
        );
        outcomes
    }

    /// Validate under the configured [`ErrorPolicy`].
    ///
    /// `FailFast` returns the first error; `Collect` returns every outcome.
    pub fn run(&self, records: &[RawRecord]) -> Result<Vec<RecordOutcome>, BatchError> {
        match self.config.error_policy {
            ErrorPolicy::FailFast => Ok(self
                .validate_all(records)?
                .into_iter()
                .enumerate()
                .map(|(index, book)| RecordOutcome {
                    index,
                    result: Ok(book),
                })
                .collect()),
            ErrorPolicy::Collect => Ok(self.validate_each(records)),
        }
    }

    /// Validate the record at `index`
    pub fn validate_at(&self, records: &[RawRecord], index: usize) -> crate::Result<BookRecord> {
        let raw = records.get(index).ok_or(CatalogError::RecordIndex {
            index,
            len: records.len(),
        })?;
        Ok(self.validate(raw)?)
    }

    fn normalize(&self, text: String) -> String {
        if self.config.normalize_case {
            text.to_lowercase()
        } else {
            text
        }
    }

    fn optional_text(
        &self,
        raw: &RawRecord,
        field: &'static str,
    ) -> Result<Option<String>, ValidationError> {
        match raw.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => text_of(Some(value))
                .map(|t| Some(self.normalize(t)))
                .ok_or(ValidationError::InvalidField {
                    field,
                    expected: "text",
                }),
        }
    }

    fn required_text(&self, raw: &RawRecord, field: &'static str) -> Result<String, ValidationError> {
        self.optional_text(raw, field)?
            .ok_or(ValidationError::MissingField { field })
    }
}

/// Process exit code for a validation run: 0 when every record passed,
/// 1 when the run failed fast or any outcome is an error
pub fn exit_code<E>(run: &Result<Vec<RecordOutcome>, E>) -> i32 {
    match run {
        Ok(outcomes) if outcomes.iter().all(RecordOutcome::is_valid) => 0,
        _ => 1,
    }
}

/// Load `path` and validate every record, failing on the first invalid one
pub fn load_and_validate(
    path: impl AsRef<std::path::Path>,
    config: ValidationConfig,
) -> crate::Result<Vec<BookRecord>> {
    let records = crate::loader::load_records(path)?;
    Ok(RecordValidator::new(config).validate_all(&records)?)
}

fn has_value(raw: &RawRecord, field: &str) -> bool {
    !matches!(raw.get(field), None | Some(Value::Null))
}

/// Strings pass through, numbers become their decimal text and booleans
/// become `True` / `False`
fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        _ => None,
    }
}

fn price_of(raw: &RawRecord) -> Result<f64, ValidationError> {
    let invalid = ValidationError::InvalidField {
        field: "price",
        expected: "number",
    };
    match raw.get("price") {
        None | Some(Value::Null) => Err(ValidationError::MissingField { field: "price" }),
        Some(Value::Number(n)) => n.as_f64().ok_or(invalid),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid),
        Some(_) => Err(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("Expected object, got {:?}", other),
        }
    }

    fn book(extra: Value) -> RawRecord {
        let mut record = raw(json!({
            "title": "T",
            "author": "A",
            "publisher": "P",
            "price": 9.99
        }));
        record.extend(raw(extra));
        record
    }

    #[test]
    fn test_valid_isbn10_record() {
        let validator = RecordValidator::default();
        let record = validator.validate(&book(json!({"isbn_10": "0306406152"}))).unwrap();
        assert_eq!(record.title(), "T");
        assert_eq!(record.price(), 9.99);
        assert_eq!(record.isbn_10().map(Isbn10::as_str), Some("0306406152"));
        assert_eq!(record.isbn_13(), None);
        assert_eq!(record.subtitle(), None);
    }

    #[test]
    fn test_isbn13_only_is_not_checked() {
        let validator = RecordValidator::default();
        let record = validator.validate(&book(json!({"isbn_13": "not-a-real-isbn"}))).unwrap();
        assert_eq!(record.isbn_13(), Some("not-a-real-isbn"));
        assert!(record.isbn_10().is_none());
    }

    #[test]
    fn test_missing_both_isbns() {
        let validator = RecordValidator::default();
        match validator.validate(&book(json!({}))).unwrap_err() {
            ValidationError::MissingIsbn { title, .. } => assert_eq!(title, "T"),
            other => panic!("Expected MissingIsbn, got {:?}", other),
        }
    }

    #[test]
    fn test_presence_check_runs_before_field_checks() {
        // No author, publisher or price either: the ISBN error still wins
        let validator = RecordValidator::default();
        let err = validator.validate(&raw(json!({"title": "Lonely"}))).unwrap_err();
        assert_eq!(err.kind(), "missing_isbn");
        assert_eq!(err.context(), Some("Lonely"));
    }

    #[test]
    fn test_null_isbns_count_as_missing() {
        let validator = RecordValidator::default();
        let err = validator
            .validate(&book(json!({"isbn_10": null, "isbn_13": null})))
            .unwrap_err();
        assert_eq!(err.kind(), "missing_isbn");
    }

    #[test]
    fn test_bad_isbn10_is_rejected_even_with_isbn13() {
        let validator = RecordValidator::default();
        let err = validator
            .validate(&book(json!({"isbn_10": "0306406153", "isbn_13": "9780306406157"})))
            .unwrap_err();
        match err {
            ValidationError::Isbn10Format { value, .. } => assert_eq!(value, "0306406153"),
            other => panic!("Expected Isbn10Format, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field() {
        let validator = RecordValidator::default();
        let mut record = book(json!({"isbn_10": "0306406152"}));
        record.remove("publisher");
        assert_eq!(
            validator.validate(&record).unwrap_err(),
            ValidationError::MissingField { field: "publisher" }
        );
    }

    #[test]
    fn test_empty_title() {
        let validator = RecordValidator::default();
        let err = validator
            .validate(&book(json!({"title": "", "isbn_10": "0306406152"})))
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyField { field: "title" });
    }

    #[test]
    fn test_blank_title_is_kept() {
        let validator = RecordValidator::default();
        let record = validator
            .validate(&book(json!({"title": "   ", "isbn_10": "0306406152"})))
            .unwrap();
        assert_eq!(record.title(), "   ");
    }

    #[test]
    fn test_coercion() {
        let validator = RecordValidator::default();
        let err = validator
            .validate(&book(json!({"price": "12.50", "isbn_10": 306406152, "author": 42})))
            .unwrap_err();
        // 306406152 has only nine digits once the leading zero is gone
        assert_eq!(err.kind(), "isbn10_format");

        let record = validator
            .validate(&book(json!({"price": "12.50", "isbn_13": 9780306406157u64, "author": 42})))
            .unwrap();
        assert_eq!(record.price(), 12.5);
        assert_eq!(record.isbn_13(), Some("9780306406157"));
        assert_eq!(record.author(), "42");
    }

    #[test]
    fn test_booleans_are_coerced() {
        let validator = RecordValidator::default();
        let record = validator
            .validate(&book(json!({"author": true, "publisher": false, "price": true, "isbn_13": "x"})))
            .unwrap();
        assert_eq!(record.author(), "True");
        assert_eq!(record.publisher(), "False");
        assert_eq!(record.price(), 1.0);
    }

    #[test]
    fn test_invalid_types() {
        let validator = RecordValidator::default();
        let err = validator
            .validate(&book(json!({"price": [1], "isbn_10": "0306406152"})))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidField {
                field: "price",
                expected: "number"
            }
        );

        let err = validator
            .validate(&book(json!({"subtitle": {"a": 1}, "isbn_10": "0306406152"})))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidField {
                field: "subtitle",
                expected: "text"
            }
        );
    }

    #[test]
    fn test_normalize_case() {
        let validator = RecordValidator::lowercasing();
        let record = validator
            .validate(&book(json!({"title": "Dune", "isbn_10": "097522980X"})))
            .unwrap();
        assert_eq!(record.title(), "dune");
        assert_eq!(record.author(), "a");
        assert_eq!(record.isbn_10().map(Isbn10::as_str), Some("097522980x"));
    }

    #[test]
    fn test_revalidating_is_idempotent() {
        let validator = RecordValidator::default();
        let first = validator
            .validate(&book(json!({"isbn_10": "0-306-40615-2", "subtitle": "S"})))
            .unwrap();
        let second = validator.validate(&first.to_raw()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_all_stops_at_first_error() {
        let validator = RecordValidator::default();
        let records = vec![
            book(json!({"isbn_10": "0306406152"})),
            book(json!({})),
            book(json!({"isbn_10": "0306406153"})),
        ];
        let err = validator.validate_all(&records).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.source.kind(), "missing_isbn");
    }

    #[test]
    fn test_validate_each_keeps_input_order() {
        let validator = RecordValidator::default();
        let records = vec![
            book(json!({"isbn_10": "0306406153"})),
            book(json!({"isbn_10": "0306406152"})),
            book(json!({})),
        ];
        let outcomes = validator.validate_each(&records);
        let indices: Vec<usize> = outcomes.iter().map(|o| o.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(!outcomes[0].is_valid());
        assert!(outcomes[1].is_valid());
        assert!(!outcomes[2].is_valid());
    }

    #[test]
    fn test_run_follows_error_policy() {
        let records = vec![book(json!({})), book(json!({"isbn_13": "x"}))];

        let fail_fast = RecordValidator::default();
        assert_eq!(fail_fast.run(&records).unwrap_err().index, 0);

        let collect = RecordValidator::new(ValidationConfig {
            error_policy: ErrorPolicy::Collect,
            ..ValidationConfig::default()
        });
        let outcomes = collect.run(&records).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[1].is_valid());
    }

    #[test]
    fn test_validate_at_out_of_range() {
        let validator = RecordValidator::default();
        let err = validator.validate_at(&[], 2).unwrap_err();
        assert!(matches!(err, CatalogError::RecordIndex { index: 2, len: 0 }));
    }
}
