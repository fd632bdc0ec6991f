//! Console listings of raw records

use serde_json::Value;
use std::io::{self, Write};

use crate::record::RawRecord;

/// Render a JSON value the way a person would type it: strings bare,
/// everything else as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

/// Print the title of every record, numbered from zero
pub fn list_titles<W: Write>(records: &[RawRecord], out: &mut W) -> io::Result<()> {
    writeln!(out, "Titles: ________________")?;
    for (num, record) in records.iter().enumerate() {
        let title = record.get("title").map(plain).unwrap_or_default();
        writeln!(out, "Title {}: {}", num, title)?;
    }
    writeln!(out)
}

/// Print every key/value pair of every record, in file order
pub fn list_keys_values<W: Write>(records: &[RawRecord], out: &mut W) -> io::Result<()> {
    writeln!(out, "Key value: ________________")?;
    for (num, record) in records.iter().enumerate() {
        writeln!(out, "Title {}", num)?;
        for (key, value) in record {
            writeln!(out, "{}:   {}", key, plain(value))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
