//! Field delimiter parsing.
//!
//! Users often cannot type a literal tab on a command line, so a delimiter
//! containing a backslash (and longer than one character) is decoded as an
//! escape sequence first. After decoding it must be exactly one ASCII
//! character, because the CSV reader works on bytes.

use std::{fmt, str::FromStr};

/// Why a delimiter argument was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DelimiterError {
    /// A backslash sequence could not be decoded.
    #[error("invalid escape sequence in delimiter '{input}': {reason}")]
    BadEscape {
        /// The delimiter as typed.
        input: String,
        /// What went wrong.
        reason: &'static str,
    },
    /// The decoded delimiter is not a single character.
    #[error("delimiter must be a single character, got '{decoded}' ({length} characters)")]
    WrongLength {
        /// The delimiter after escape decoding.
        decoded: String,
        /// Number of characters after decoding.
        length: usize,
    },
    /// The delimiter is a single character outside ASCII.
    #[error("delimiter must be an ASCII character, got '{0}'")]
    NotAscii(char),
    /// The delimiter would collide with quoting or record separators.
    #[error("delimiter cannot be {0:?}")]
    Reserved(char),
}

/// A single-byte field delimiter.
///
/// ```rust
/// use safeharbor_zip::Delimiter;
///
/// let tab: Delimiter = "\\t".parse()?;
/// assert_eq!(tab.as_byte(), b'\t');
/// # Ok::<(), safeharbor_zip::DelimiterError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Delimiter(u8);

impl Delimiter {
    pub const COMMA: Delimiter = Delimiter(b',');
    pub const TAB: Delimiter = Delimiter(b'\t');

    #[must_use]
    pub fn as_byte(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(self.0)
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::COMMA
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char().escape_default())
    }
}

impl TryFrom<char> for Delimiter {
    type Error = DelimiterError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        if !value.is_ascii() {
            return Err(DelimiterError::NotAscii(value));
        }
        if matches!(value, '"' | '\n' | '\r') {
            return Err(DelimiterError::Reserved(value));
        }
        let byte = u8::try_from(u32::from(value)).map_err(|_| DelimiterError::NotAscii(value))?;
        Ok(Delimiter(byte))
    }
}

impl FromStr for Delimiter {
    type Err = DelimiterError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let decoded = if input.contains('\\') && input.chars().count() > 1 {
            unescape(input)?
        } else {
            input.to_string()
        };

        let mut chars = decoded.chars();
        match (chars.next(), chars.next()) {
            (Some(value), None) => Delimiter::try_from(value),
            _ => Err(DelimiterError::WrongLength {
                length: decoded.chars().count(),
                decoded,
            }),
        }
    }
}

/// Decodes backslash escapes.
///
/// Supports the single-character escapes (`\t`, `\n`, `\r`, `\\`, `\'`,
/// `\"`, `\a`, `\b`, `\f`, `\v`, `\0`), octal `\ooo`, `\xHH`, `\uXXXX` and
/// `\UXXXXXXXX`. Unknown escapes are kept as written.
fn unescape(input: &str) -> Result<String, DelimiterError> {
    let bad = |reason| DelimiterError::BadEscape {
        input: input.to_string(),
        reason,
    };

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escape) = chars.next() else {
            return Err(bad("trailing backslash"));
        };
        match escape {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut code = escape.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match chars.peek().and_then(|next| next.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).ok_or_else(|| bad("octal escape out of range"))?);
            }
            'x' | 'u' | 'U' => {
                let width = match escape {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let mut code = 0_u32;
                for _ in 0..width {
                    let digit = chars
                        .next()
                        .and_then(|next| next.to_digit(16))
                        .ok_or_else(|| bad("truncated hex escape"))?;
                    code = code * 16 + digit;
                }
                out.push(char::from_u32(code).ok_or_else(|| bad("not a unicode scalar value"))?);
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Ok(out)
}
