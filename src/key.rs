//! Composite-key grammar: `[@key]` and `[@key@sep]` mark array items.

/// Opens a composite key
pub const COMPOSITE_LEFT: u8 = b'[';
/// Closes a composite key
pub const COMPOSITE_RIGHT: u8 = b']';
/// Marks a composite key as an array, and introduces its separator
pub const ARRAY_TAG: u8 = b'@';

/// How a raw key token reads under the composite-key grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShape {
    /// Not a composite key at all; looked up verbatim.
    Plain,
    /// `[@key]` (separator `None`) or `[@key@sep]`.
    Array { separator: Option<u8> },
    /// Starts like an array key but the second `@` is misplaced or the
    /// inner key is empty.
    Malformed,
}

impl KeyShape {
    pub fn is_array(self) -> bool {
        matches!(self, KeyShape::Array { .. })
    }
}

/// Classify a trimmed raw key.
///
/// A composite key needs at least four bytes, `[` first, `]` last and `@`
/// at index 1. A second `@` must sit three bytes from the end, leaving
/// exactly one separator byte, and no other `@` may appear in the key.
pub fn classify(raw: &str) -> KeyShape {
    let bytes = raw.as_bytes();
    let len = bytes.len();

    if len < 4
        || bytes[0] != COMPOSITE_LEFT
        || bytes[len - 1] != COMPOSITE_RIGHT
        || bytes[1] != ARRAY_TAG
    {
        return KeyShape::Plain;
    }

    let Some(offset) = bytes[2..].iter().position(|&b| b == ARRAY_TAG) else {
        return KeyShape::Array { separator: None };
    };
    let second_tag = offset + 2;

    // '@' is ASCII, so the byte after it at len - 2 is a whole character.
    if second_tag == len - 3 && second_tag > 2 {
        return KeyShape::Array {
            separator: Some(bytes[len - 2]),
        };
    }

    KeyShape::Malformed
}

/// Strip composite markers to get the lookup name.
///
/// Plain and malformed keys come back unchanged.
pub fn normalize(raw: &str) -> &str {
    let len = raw.len();
    match classify(raw) {
        KeyShape::Array { separator: None } => &raw[2..len - 1],
        KeyShape::Array { separator: Some(_) } => &raw[2..len - 3],
        KeyShape::Plain | KeyShape::Malformed => raw,
    }
}
