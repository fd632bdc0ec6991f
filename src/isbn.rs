//! ISBN-10 check digit validation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValidationError, ISBN10_CHECKSUM_MESSAGE, ISBN10_LENGTH_MESSAGE};

/// Number of significant characters in an ISBN-10
pub const ISBN10_LEN: usize = 10;

/// An ISBN-10 that passed the length and checksum rule.
///
/// Holds the text exactly as supplied, separators included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn10(String);

impl Isbn10 {
    /// Validate `value` and wrap it
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_isbn10(&value)?;
        Ok(Self(value))
    }

    /// The text as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ten significant characters, separators dropped
    pub fn compact(&self) -> String {
        significant_chars(&self.0).collect()
    }
}

/// Characters that take part in the check: digits plus `X`/`x`.
/// Everything else is silently dropped.
fn significant_chars(value: &str) -> impl Iterator<Item = char> + '_ {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'X' | 'x'))
}

fn char_value(c: char) -> u32 {
    match c {
        'X' | 'x' => 10,
        _ => c.to_digit(10).unwrap_or(0),
    }
}

/// Weighted sum `Σ (10 - i) * v_i`, or `None` if the value does not have
/// exactly ten significant characters.
pub fn weighted_sum(value: &str) -> Option<u32> {
    let chars: Vec<char> = significant_chars(value).collect();
    if chars.len() != ISBN10_LEN {
        return None;
    }

    let sum = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| (ISBN10_LEN - i) as u32 * char_value(c))
        .sum();
    Some(sum)
}

/// Check `value` against the ISBN-10 rule
pub fn validate_isbn10(value: &str) -> Result<(), ValidationError> {
    match weighted_sum(value) {
        None => Err(ValidationError::isbn10_format(value, ISBN10_LENGTH_MESSAGE)),
        Some(sum) if sum % 11 != 0 => {
            Err(ValidationError::isbn10_format(value, ISBN10_CHECKSUM_MESSAGE))
        }
        Some(_) => Ok(()),
    }
}

/// Convenience predicate over [`validate_isbn10`]
pub fn is_valid_isbn10(value: &str) -> bool {
    validate_isbn10(value).is_ok()
}

impl fmt::Display for Isbn10 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Isbn10 {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Isbn10> for String {
    fn from(isbn: Isbn10) -> Self {
        isbn.0
    }
}

impl AsRef<str> for Isbn10 {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
