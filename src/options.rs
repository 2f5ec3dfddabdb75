//! Parser settings, loadable from TOML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfError, Result};
use crate::item::DEFAULT_SEPARATOR;

/// Separator between a key and its value
pub const KV_SEPARATOR: char = ':';

/// Default comment marker
pub const DEFAULT_COMMENT: char = '#';

/// Settings a [`Parser`](crate::Parser) applies to one parse.
///
/// Each parser carries its own options; there is no process-wide default
/// to mutate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Element separator for `[@key]` arrays that name none
    pub separator: char,

    /// Lines starting with this character are skipped
    pub comment: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR as char,
            comment: DEFAULT_COMMENT,
        }
    }
}

impl ParseOptions {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = comment;
        self
    }

    /// Check both characters are single-byte and cannot be confused with
    /// the rest of the grammar.
    pub fn validate(&self) -> Result<()> {
        if !self.separator.is_ascii() || self.separator == KV_SEPARATOR {
            return Err(ConfError::Options {
                message: format!(
                    "separator must be an ASCII character other than '{KV_SEPARATOR}', got {:?}",
                    self.separator
                ),
            });
        }

        if !self.comment.is_ascii_punctuation() || matches!(self.comment, ':' | '[') {
            return Err(ConfError::Options {
                message: format!(
                    "comment marker must be ASCII punctuation other than ':' or '[', got {:?}",
                    self.comment
                ),
            });
        }

        Ok(())
    }

    /// Separator as the byte stored on items
    pub(crate) fn separator_byte(&self) -> u8 {
        // validate() guarantees ASCII; fall back rather than truncate.
        u8::try_from(self.separator).unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Parse and validate options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: ParseOptions = toml::from_str(content).map_err(|e| ConfError::Options {
            message: e.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Load and validate options from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfError::io(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
    }
}
