//! Book record types

use serde::Serialize;
use std::fmt;

use crate::isbn::Isbn10;

/// A record as parsed from JSON, before validation
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A validated catalog entry.
///
/// Only [`crate::RecordValidator`] can build one, and the fields are read
/// through accessors, so a `BookRecord` always satisfies the ISBN rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) publisher: String,
    pub(crate) price: f64,
    pub(crate) isbn_10: Option<Isbn10>,
    pub(crate) isbn_13: Option<String>,
    pub(crate) subtitle: Option<String>,
}

impl BookRecord {
    /// Field names in declaration order
    pub const FIELDS: [&'static str; 7] = [
        "title",
        "author",
        "publisher",
        "price",
        "isbn_10",
        "isbn_13",
        "subtitle",
    ];

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn isbn_10(&self) -> Option<&Isbn10> {
        self.isbn_10.as_ref()
    }

    pub fn isbn_13(&self) -> Option<&str> {
        self.isbn_13.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Convert back to the generic form. Absent optionals become `null`.
    pub fn to_raw(&self) -> RawRecord {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            // A struct of strings and a float always serializes to an object
            _ => RawRecord::new(),
        }
    }
}

fn write_opt(f: &mut fmt::Formatter<'_>, name: &str, value: Option<&str>) -> fmt::Result {
    match value {
        Some(v) => write!(f, " {}={:?}", name, v),
        None => write!(f, " {}=None", name),
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "title={:?} author={:?} publisher={:?} price={}",
            self.title, self.author, self.publisher, self.price
        )?;
        write_opt(f, "isbn_10", self.isbn_10.as_ref().map(Isbn10::as_str))?;
        write_opt(f, "isbn_13", self.isbn_13.as_deref())?;
        write_opt(f, "subtitle", self.subtitle.as_deref())
    }
}
