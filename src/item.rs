//! A single key/value entry and its type coercions.
//!
//! Coercion is recomputed on every call; nothing parsed is cached on the
//! item. Callers that read the same value in a hot loop should keep the
//! converted result themselves.

use std::fmt;

use crate::error::{Result, TypeError};
use crate::key::{self, KeyShape};

/// Separator used between array elements when the key names none
pub const DEFAULT_SEPARATOR: u8 = b' ';

/// Characters trimmed from keys, values and array elements
pub(crate) const SPACE_CHARS: &[char] = &[' ', '\t', '\r', '\n'];

/// One parsed `key: value` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    raw_key: String,
    key: String,
    val: String,
    default_separator: u8,
}

impl Item {
    /// Build an item from a raw key token and its value text.
    ///
    /// Both are trimmed. The raw key is kept so array-ness can be read back
    /// from it on access.
    pub fn new(raw_key: &str, val: &str) -> Self {
        Self::with_separator(raw_key, val, DEFAULT_SEPARATOR)
    }

    /// Like [`Item::new`], with the separator used by `[@key]` arrays.
    pub fn with_separator(raw_key: &str, val: &str, default_separator: u8) -> Self {
        let raw_key = raw_key.trim_matches(SPACE_CHARS);
        Self {
            raw_key: raw_key.to_string(),
            key: key::normalize(raw_key).to_string(),
            val: val.trim_matches(SPACE_CHARS).to_string(),
            default_separator,
        }
    }

    /// Normalized lookup name, with composite markers stripped
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key token exactly as written, markers included
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    pub fn is_array(&self) -> bool {
        key::classify(&self.raw_key).is_array()
    }

    pub fn to_int(&self) -> Result<i64> {
        parse_int(&self.key, &self.val)
    }

    pub fn to_float(&self) -> Result<f64> {
        parse_float(&self.key, &self.val)
    }

    pub fn to_str(&self) -> &str {
        &self.val
    }

    /// Split the value on the array separator.
    ///
    /// Segments are trimmed and the ones left empty are dropped, so
    /// `"1,,2"` and `"1  2"` both give two elements.
    pub fn to_string_array(&self) -> Result<Vec<String>> {
        let separator = self.separator()? as char;

        Ok(self
            .val
            .split(separator)
            .map(|segment| segment.trim_matches(SPACE_CHARS))
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn to_int_array(&self) -> Result<Vec<i64>> {
        self.to_string_array()?
            .iter()
            .map(|element| parse_int(&self.key, element))
            .collect()
    }

    pub fn to_float_array(&self) -> Result<Vec<f64>> {
        self.to_string_array()?
            .iter()
            .map(|element| parse_float(&self.key, element))
            .collect()
    }

    fn separator(&self) -> Result<u8> {
        match key::classify(&self.raw_key) {
            KeyShape::Array { separator } => Ok(separator.unwrap_or(self.default_separator)),
            KeyShape::Malformed => Err(TypeError::BadSeparator {
                key: self.raw_key.clone(),
            }
            .into()),
            KeyShape::Plain => Err(TypeError::NotArray {
                key: self.raw_key.clone(),
            }
            .into()),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=>{}", self.key, self.val)
    }
}

fn parse_int(key: &str, text: &str) -> Result<i64> {
    text.parse::<i64>().map_err(|source| {
        TypeError::InvalidInt {
            key: key.to_string(),
            value: text.to_string(),
            source,
        }
        .into()
    })
}

fn parse_float(key: &str, text: &str) -> Result<f64> {
    text.parse::<f64>().map_err(|source| {
        TypeError::InvalidFloat {
            key: key.to_string(),
            value: text.to_string(),
            source,
        }
        .into()
    })
}
