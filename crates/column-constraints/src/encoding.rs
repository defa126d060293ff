//! Character encodings of column storage and of candidate values.
//!
//! Columns only ever resolve to [`Encoding::Utf8`]: any collation outside of the UTF-8 families is
//! rejected with [`ConstraintError::UnsupportedEncoding`], since guessing an encoding is exactly
//! how values get mangled on their way to the database.
//!
//! Values, on the other hand, may arrive in a handful of single byte encodings, wrapped into an
//! [`EncodedText`]. Those can be transcoded to UTF-8 before being measured or truncated.

use std::fmt;

use lazy_regex::{Lazy, Regex, lazy_regex};
use serde::{Deserialize, Serialize};

use crate::error::{ConstraintError, ConstraintResult};

/// Any collation of the UTF-8 families (`utf8_*`, `utf8mb3_*`, `utf8mb4_*`).
static UTF8_COLLATION: Lazy<Regex> = lazy_regex!(r"^utf8");

/// Collations storing at most three bytes per character.
static UTF8_MB3_COLLATION: Lazy<Regex> = lazy_regex!(r"^utf8(?:mb3)?_");

/// ISO-8859-15 positions which differ from ISO-8859-1.
const ISO_8859_15_OVERRIDES: [(u8, char); 8] = [
    (0xA4, '\u{20AC}'),
    (0xA6, '\u{0160}'),
    (0xA8, '\u{0161}'),
    (0xB4, '\u{017D}'),
    (0xB8, '\u{017E}'),
    (0xBC, '\u{0152}'),
    (0xBD, '\u{0153}'),
    (0xBE, '\u{0178}'),
];

/// A character encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Raw bytes without any character semantics.
    Binary,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1 (latin1).
    Latin1,
    /// ISO-8859-15 (latin9).
    Iso885915,
    Utf8,
}

impl Encoding {
    /// Resolves the encoding used to store a column with the given collation.
    pub fn from_collation(collation: &str) -> ConstraintResult<Self> {
        if UTF8_COLLATION.is_match(collation) {
            Ok(Self::Utf8)
        } else {
            Err(ConstraintError::UnsupportedEncoding {
                collation: collation.to_string(),
            })
        }
    }

    /// Returns the canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Binary => "ASCII-8BIT",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
            Self::Iso885915 => "ISO-8859-15",
            Self::Utf8 => "UTF-8",
        }
    }

    /// Returns whether every character of the encoding is a single byte.
    pub fn is_single_byte(&self) -> bool {
        !matches!(self, Self::Utf8)
    }

    /// Decodes a single byte into a character, if the encoding defines one.
    fn decode_byte(&self, byte: u8) -> Option<char> {
        match self {
            Self::Ascii if byte.is_ascii() => Some(char::from(byte)),
            Self::Ascii | Self::Binary | Self::Utf8 => None,
            Self::Latin1 => Some(char::from(byte)),
            Self::Iso885915 => Some(
                ISO_8859_15_OVERRIDES
                    .iter()
                    .find(|(b, _)| *b == byte)
                    .map(|(_, c)| *c)
                    .unwrap_or(char::from(byte)),
            ),
        }
    }

    /// Encodes a single character into a byte, if the encoding can represent it.
    fn encode_char(&self, ch: char) -> Option<u8> {
        match self {
            Self::Ascii if ch.is_ascii() => Some(ch as u8),
            Self::Ascii | Self::Binary | Self::Utf8 => None,
            Self::Latin1 => u8::try_from(u32::from(ch)).ok(),
            Self::Iso885915 => {
                if let Some((byte, _)) = ISO_8859_15_OVERRIDES.iter().find(|(_, c)| *c == ch) {
                    return Some(*byte);
                }
                let byte = u8::try_from(u32::from(ch)).ok()?;
                // bytes taken over by the overrides no longer map to their latin1 characters
                if ISO_8859_15_OVERRIDES.iter().any(|(b, _)| *b == byte) {
                    None
                } else {
                    Some(byte)
                }
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns whether the collation belongs to a UTF-8 family which cannot store characters outside
/// of the basic multilingual plane.
pub fn is_three_byte_utf8_collation(collation: &str) -> bool {
    UTF8_MB3_COLLATION.is_match(collation)
}

/// Text held in an encoding other than UTF-8.
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{EncodedText, Encoding};
///
/// let text = EncodedText::encode("grüße", Encoding::Latin1).unwrap();
/// assert_eq!(text.bytes().len(), 5);
/// assert_eq!(text.decode().unwrap(), "grüße");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodedText {
    encoding: Encoding,
    bytes: Vec<u8>,
}

impl EncodedText {
    /// Wraps raw bytes declared to be in the given encoding.
    pub fn new(encoding: Encoding, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            encoding,
            bytes: bytes.into(),
        }
    }

    /// Encodes a UTF-8 string into the given encoding.
    ///
    /// Fails with [`ConstraintError::Transcode`] if any character is not representable.
    pub fn encode(text: &str, encoding: Encoding) -> ConstraintResult<Self> {
        if encoding == Encoding::Utf8 {
            return Ok(Self::new(encoding, text.as_bytes()));
        }

        let bytes = text
            .chars()
            .map(|ch| encoding.encode_char(ch))
            .collect::<Option<Vec<u8>>>()
            .ok_or(ConstraintError::Transcode {
                from: Encoding::Utf8,
                to: encoding,
            })?;

        Ok(Self::new(encoding, bytes))
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Transcodes the text to UTF-8, failing if any byte has no UTF-8 counterpart.
    pub fn decode(&self) -> ConstraintResult<String> {
        let error = || ConstraintError::Transcode {
            from: self.encoding,
            to: Encoding::Utf8,
        };

        match self.encoding {
            Encoding::Utf8 | Encoding::Binary => {
                String::from_utf8(self.bytes.clone()).map_err(|_| error())
            }
            encoding => self
                .bytes
                .iter()
                .map(|byte| encoding.decode_byte(*byte))
                .collect::<Option<String>>()
                .ok_or_else(error),
        }
    }

    /// Transcodes the text to UTF-8, replacing undecodable bytes with U+FFFD.
    pub fn decode_lossy(&self) -> String {
        match self.encoding {
            Encoding::Utf8 | Encoding::Binary => String::from_utf8_lossy(&self.bytes).into_owned(),
            encoding => self
                .bytes
                .iter()
                .map(|byte| {
                    encoding
                        .decode_byte(*byte)
                        .unwrap_or(char::REPLACEMENT_CHARACTER)
                })
                .collect(),
        }
    }
}
