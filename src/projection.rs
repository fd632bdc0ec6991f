//! Field subsetting for validated records

use std::collections::BTreeSet;

use crate::record::{BookRecord, RawRecord};

/// Which fields of a record to keep
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldSelection {
    #[default]
    All,
    /// Keep only these fields
    Include(BTreeSet<String>),
    /// Keep everything but these fields
    Exclude(BTreeSet<String>),
}

impl FieldSelection {
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Include(fields.into_iter().map(Into::into).collect())
    }

    pub fn exclude<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exclude(fields.into_iter().map(Into::into).collect())
    }

    /// Whether `field` survives this selection
    pub fn keeps(&self, field: &str) -> bool {
        match self {
            FieldSelection::All => true,
            FieldSelection::Include(set) => set.contains(field),
            FieldSelection::Exclude(set) => !set.contains(field),
        }
    }
}

/// Project `record` onto the selected fields.
///
/// Unknown field names in the selection are ignored. Absent optional
/// fields are kept as `null`.
pub fn project(record: &BookRecord, selection: &FieldSelection) -> RawRecord {
    record
        .to_raw()
        .into_iter()
        .filter(|(key, _)| selection.keeps(key))
        .collect()
}
