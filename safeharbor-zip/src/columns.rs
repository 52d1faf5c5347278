//! Resolving user column references against a header row.
//!
//! A reference may be an explicit index, an explicit name, or a free-form
//! token typed by a user. Tokens are matched by name first, so a column that is
//! literally called `"2"` is found by name before `"2"` is tried as an index.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::Serialize;

/// A user-supplied reference to a column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    /// Positional index into the header row. Never matched by name.
    Index(usize),
    /// Exact header name. Never interpreted as an index.
    Name(String),
    /// Free-form text: a header name, or failing that an all-digit index.
    Token(String),
}

impl ColumnRef {
    /// Wraps user text as a [`ColumnRef::Token`].
    #[must_use]
    pub fn token<S: Into<String>>(token: S) -> Self {
        ColumnRef::Token(token.into())
    }

    /// Wraps a header name as a [`ColumnRef::Name`].
    #[must_use]
    pub fn name<S: Into<String>>(name: S) -> Self {
        ColumnRef::Name(name.into())
    }
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

impl From<&str> for ColumnRef {
    fn from(token: &str) -> Self {
        ColumnRef::token(token)
    }
}

impl From<String> for ColumnRef {
    fn from(token: String) -> Self {
        ColumnRef::Token(token)
    }
}

/// Command-line text always parses as a [`ColumnRef::Token`].
impl FromStr for ColumnRef {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(ColumnRef::token(value))
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(index) => write!(f, "{index}"),
            ColumnRef::Name(text) | ColumnRef::Token(text) => f.write_str(text),
        }
    }
}

/// A header column selected for deidentification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
    /// Position of the column in the header row.
    pub index: usize,
    /// Header name of the column.
    pub name: String,
}

/// A reference that could not be resolved; it is skipped, not fatal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnWarning {
    /// A positional reference past the last header.
    #[error("Column index {index} out of range (max: {})", display_max(.max))]
    IndexOutOfRange {
        /// The requested index, as typed.
        index: String,
        /// The last valid index, or `None` for an empty header row.
        max: Option<usize>,
    },
    /// A name that matches no header.
    #[error("Column '{reference}' not found in header")]
    NotFound {
        /// The reference as typed.
        reference: String,
    },
}

fn display_max(max: &Option<usize>) -> String {
    max.map_or_else(|| "none".to_string(), |max| max.to_string())
}

/// Outcome of resolving every reference against one header row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Columns to process, in first-reference order, without duplicates.
    pub columns: Vec<ResolvedColumn>,
    /// One entry per reference that was skipped.
    pub warnings: Vec<ColumnWarning>,
}

impl Resolution {
    /// Returns `true` when no column was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header names of the resolved columns.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|column| column.name.as_str())
    }
}

/// Resolves `refs` against `headers`.
///
/// Each reference is tried in order; unresolvable references produce a
/// [`ColumnWarning`] and are skipped. A header selected twice is kept once,
/// at its first position. An empty result is not an error here; callers
/// decide whether that is fatal.
pub fn resolve_columns<H>(refs: &[ColumnRef], headers: &[H]) -> Resolution
where
    H: AsRef<str>,
{
    let mut resolution = Resolution::default();
    let max = headers.len().checked_sub(1);

    for reference in refs {
        let found = match reference {
            ColumnRef::Index(index) => by_index(*index, headers)
                .ok_or_else(|| ColumnWarning::IndexOutOfRange {
                    index: index.to_string(),
                    max,
                }),
            ColumnRef::Name(name) => by_name(name, headers).ok_or_else(|| {
                ColumnWarning::NotFound {
                    reference: name.clone(),
                }
            }),
            ColumnRef::Token(token) => by_name(token, headers)
                .map_or_else(|| by_token_index(token, headers, max), Ok),
        };

        match found {
            Ok(column) => {
                if !resolution.columns.iter().any(|seen| seen.index == column.index) {
                    resolution.columns.push(column);
                }
            }
            Err(warning) => resolution.warnings.push(warning),
        }
    }

    resolution
}

fn by_index<H: AsRef<str>>(index: usize, headers: &[H]) -> Option<ResolvedColumn> {
    headers.get(index).map(|name| ResolvedColumn {
        index,
        name: name.as_ref().to_string(),
    })
}

fn by_name<H: AsRef<str>>(name: &str, headers: &[H]) -> Option<ResolvedColumn> {
    headers
        .iter()
        .position(|header| header.as_ref() == name)
        .and_then(|index| by_index(index, headers))
}

fn by_token_index<H: AsRef<str>>(
    token: &str,
    headers: &[H],
    max: Option<usize>,
) -> Result<ResolvedColumn, ColumnWarning> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ColumnWarning::NotFound {
            reference: token.to_string(),
        });
    }
    // Digit strings too large for usize are simply out of range.
    token
        .parse::<usize>()
        .ok()
        .and_then(|index| by_index(index, headers))
        .ok_or_else(|| ColumnWarning::IndexOutOfRange {
            index: token.to_string(),
            max,
        })
}
