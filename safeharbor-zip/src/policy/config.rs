//! Run configuration for the policy engine.
//!
//! A [`PolicyConfig`] is built once and never changes while a file is being
//! processed. The builder methods consume and return `Self`; there are no
//! setters.

use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Length of a deidentified 5-digit ZIP code.
pub const ZIP_LENGTH: usize = 5;

/// Default marker emitted when a value must be removed entirely.
pub const DEFAULT_REDACTION_VALUE: &str = "REDACTED_HIPAA";

/// How many leading digits survive deidentification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    /// Keep two digits.
    ///
    /// Sparse prefixes are not redacted at this precision. Two digits are
    /// treated as safe for every area, although very sparse 2-digit regions
    /// could warrant a stricter rule; this is an open policy question and is
    /// left as is on purpose.
    #[serde(rename = "2")]
    Fixed2,
    /// Keep three digits; sparse prefixes are redacted.
    #[serde(rename = "3")]
    Fixed3,
    /// Keep three digits, or two for sparse prefixes. Never redacts.
    #[default]
    #[serde(rename = "smart")]
    Smart,
}

impl Precision {
    /// Returns the CLI spelling of the precision (`2`, `3` or `smart`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Fixed2 => "2",
            Precision::Fixed3 => "3",
            Precision::Smart => "smart",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown precision.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid precision '{0}': expected 2, 3 or smart")]
pub struct ParsePrecisionError(String);

impl FromStr for Precision {
    type Err = ParsePrecisionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "2" => Ok(Precision::Fixed2),
            "3" => Ok(Precision::Fixed3),
            "smart" => Ok(Precision::Smart),
            other => Err(ParsePrecisionError(other.to_string())),
        }
    }
}

/// Character used to pad suppressed digit positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillChar {
    /// Pad with `0`.
    #[default]
    #[serde(rename = "0")]
    Zero,
    /// Pad with `X`.
    #[serde(rename = "X")]
    X,
}

impl FillChar {
    /// Returns the padding character.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            FillChar::Zero => '0',
            FillChar::X => 'X',
        }
    }
}

impl fmt::Display for FillChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error returned when parsing an unsupported fill character.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid fill character '{0}': expected 0 or X")]
pub struct ParseFillCharError(String);

impl FromStr for FillChar {
    type Err = ParseFillCharError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "0" => Ok(FillChar::Zero),
            "X" => Ok(FillChar::X),
            other => Err(ParseFillCharError(other.to_string())),
        }
    }
}

/// Precision, padding and redaction marker for one run.
///
/// ```rust
/// use safeharbor_zip::{FillChar, PolicyConfig, Precision};
///
/// let config = PolicyConfig::new(Precision::Fixed3)
///     .with_fill(FillChar::X)
///     .with_redaction_value("[REMOVED]");
/// assert_eq!(config.redaction_value(), "[REMOVED]");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    precision: Precision,
    fill: FillChar,
    redaction_value: Cow<'static, str>,
}

impl PolicyConfig {
    /// Creates a configuration with `0` padding and the default redaction value.
    #[must_use]
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            fill: FillChar::default(),
            redaction_value: Cow::Borrowed(DEFAULT_REDACTION_VALUE),
        }
    }

    /// Uses a specific fill character.
    #[must_use]
    pub fn with_fill(mut self, fill: FillChar) -> Self {
        self.fill = fill;
        self
    }

    /// Uses a custom redaction value.
    #[must_use]
    pub fn with_redaction_value<V>(mut self, redaction_value: V) -> Self
    where
        V: Into<Cow<'static, str>>,
    {
        self.redaction_value = redaction_value.into();
        self
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    #[must_use]
    pub fn fill(&self) -> FillChar {
        self.fill
    }

    #[must_use]
    pub fn redaction_value(&self) -> &str {
        &self.redaction_value
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::new(Precision::default())
    }
}
