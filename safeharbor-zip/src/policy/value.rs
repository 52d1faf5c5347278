//! Values going into and coming out of the policy engine.

use std::borrow::Cow;

use serde::Serialize;

// =============================================================================
// ZipValue - Raw inputs that may hold a ZIP code
// =============================================================================

/// A raw field value that may hold a ZIP code.
///
/// Field values read from delimited text are strings, but library callers may
/// hold numeric ZIP codes. Both are deidentified through their text form, so
/// `501_u32` is treated exactly like `"501"` (leading zeros lost by a numeric
/// representation are not recovered).
pub trait ZipValue {
    /// Returns the value as text.
    fn to_zip_text(&self) -> Cow<'_, str>;
}

impl ZipValue for str {
    fn to_zip_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl ZipValue for String {
    fn to_zip_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl ZipValue for Cow<'_, str> {
    fn to_zip_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl<T> ZipValue for &T
where
    T: ZipValue + ?Sized,
{
    fn to_zip_text(&self) -> Cow<'_, str> {
        (**self).to_zip_text()
    }
}

macro_rules! impl_zip_value_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ZipValue for $ty {
                fn to_zip_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_zip_value_numeric!(u16, u32, u64, usize, i16, i32, i64, isize);

// =============================================================================
// Deidentified - The outcome of one decision
// =============================================================================

/// Result of deidentifying a single value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Deidentified {
    /// No value was present.
    Absent,
    /// The value was empty or too short to mask; holds the trimmed input.
    Unchanged(String),
    /// Kept digits padded with the fill character; always 5 characters.
    Masked(String),
    /// The value was removed; holds the configured redaction value.
    Redacted(String),
}

impl Deidentified {
    /// Returns the output text, or `None` for [`Deidentified::Absent`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Deidentified::Absent => None,
            Deidentified::Unchanged(value)
            | Deidentified::Masked(value)
            | Deidentified::Redacted(value) => Some(value),
        }
    }

    /// Consumes the outcome and returns the output text.
    ///
    /// [`Deidentified::Absent`] becomes an empty string.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Deidentified::Absent => String::new(),
            Deidentified::Unchanged(value)
            | Deidentified::Masked(value)
            | Deidentified::Redacted(value) => value,
        }
    }

    /// Returns `true` when the value was replaced by the redaction marker.
    #[must_use]
    pub fn is_redacted(&self) -> bool {
        matches!(self, Deidentified::Redacted(_))
    }
}
