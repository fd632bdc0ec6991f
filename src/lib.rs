//! Book Catalog
//!
//! Loads a JSON file of book records and validates each one before it is
//! used.
//!
//! ## Rules
//!
//! - **Required fields**: `title` (non-empty), `author`, `publisher`, `price`
//! - **Optional fields**: `subtitle`, `isbn_10`, `isbn_13`
//! - **ISBN presence**: at least one of `isbn_10` / `isbn_13`
//! - **ISBN-10 checksum**: ten digits (or a trailing `X`) whose weighted sum
//!   is divisible by 11; separators are ignored
//!
//! ## Flow
//!
//! ```text
//! data.json ──load_records──▶ Vec<RawRecord> ──RecordValidator──▶ Vec<BookRecord>
//!                                  │                                   │
//!                           list_titles / list_keys_values       project(...)
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod isbn;
pub mod loader;
pub mod projection;
pub mod record;
pub mod report;
pub mod validator;

pub use config::{CatalogConfig, ErrorPolicy, OutputFormat, ValidationConfig};
pub use error::{BatchError, CatalogError, Result, ValidationError};
pub use isbn::Isbn10;
pub use loader::{load_records, parse_records};
pub use projection::{project, FieldSelection};
pub use record::{BookRecord, RawRecord};
pub use report::ValidationReport;
pub use validator::{exit_code, load_and_validate, RecordOutcome, RecordValidator};
