//! Sparsely populated 3-digit ZIP prefixes.
//!
//! Safe Harbor allows keeping the first three digits of a ZIP code only when
//! the geographic unit formed by those digits holds more than 20,000 people.
//! The table here lists the prefixes that fall below that threshold in the
//! 2010 census. It is built once and shared read-only.

use std::collections::BTreeSet;

/// Prefixes whose 2010 census population is below 20,000.
pub const SPARSE_ZIP_PREFIXES: [&str; 14] = [
    "036", "059", "102", "203", "205", "369", "556", "692", "821", "823", "878", "879", "884",
    "893",
];

/// Population threshold the reference table was derived from.
pub const SAFE_HARBOR_POPULATION_THRESHOLD: u32 = 20_000;

/// Read-only set of sparse 3-digit prefixes.
///
/// The engine borrows a table rather than reading a global, so callers with
/// other reference data can supply their own:
///
/// ```rust
/// use safeharbor_zip::SparsityTable;
///
/// let table = SparsityTable::from_prefixes(["999"]);
/// assert!(table.contains("999"));
/// assert!(!table.contains("036"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparsityTable {
    prefixes: BTreeSet<[u8; 3]>,
}

impl SparsityTable {
    /// Returns the Safe Harbor reference table.
    ///
    /// The table is constructed on first use and lives for the rest of the
    /// process.
    #[must_use]
    pub fn safe_harbor() -> &'static Self {
        static TABLE: std::sync::OnceLock<SparsityTable> = std::sync::OnceLock::new();
        TABLE.get_or_init(|| Self::from_prefixes(SPARSE_ZIP_PREFIXES))
    }

    /// Builds a table from 3-digit prefixes.
    ///
    /// Entries that are not exactly three ASCII digits are ignored.
    #[must_use]
    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = prefixes
            .into_iter()
            .filter_map(|prefix| to_prefix(prefix.as_ref()))
            .collect();
        Self { prefixes }
    }

    /// Returns `true` when `prefix` is a listed 3-digit prefix.
    #[must_use]
    pub fn contains(&self, prefix: &str) -> bool {
        to_prefix(prefix).is_some_and(|key| self.prefixes.contains(&key))
    }

    /// Returns `true` when the first three bytes of `digits` form a sparse prefix.
    ///
    /// Fewer than three digits never match.
    pub(crate) fn is_sparse(&self, digits: &str) -> bool {
        digits.get(..3).is_some_and(|prefix| self.contains(prefix))
    }

    /// Number of prefixes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns `true` if the table lists no prefixes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Iterates the prefixes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.prefixes
            .iter()
            .filter_map(|prefix| std::str::from_utf8(prefix).ok())
    }
}

impl Default for SparsityTable {
    fn default() -> Self {
        Self::safe_harbor().clone()
    }
}

fn to_prefix(value: &str) -> Option<[u8; 3]> {
    let bytes: [u8; 3] = value.as_bytes().try_into().ok()?;
    bytes.iter().all(u8::is_ascii_digit).then_some(bytes)
}

#[cfg(test)]
mod tests {
    use super::{SparsityTable, SPARSE_ZIP_PREFIXES};

    #[test]
    fn reference_table_has_fourteen_prefixes() {
        let table = SparsityTable::safe_harbor();
        assert_eq!(table.len(), 14);
        for prefix in SPARSE_ZIP_PREFIXES {
            assert!(table.contains(prefix), "{prefix} should be sparse");
        }
    }

    #[test]
    fn neighbours_of_sparse_prefixes_are_not_sparse() {
        let table = SparsityTable::safe_harbor();
        assert!(!table.contains("037"));
        assert!(!table.contains("101"));
        assert!(!table.contains("822"));
    }

    #[test]
    fn is_sparse_needs_three_digits() {
        let table = SparsityTable::safe_harbor();
        assert!(table.is_sparse("03601"));
        assert!(table.is_sparse("036"));
        assert!(!table.is_sparse("03"));
        assert!(!table.is_sparse(""));
    }

    #[test]
    fn from_prefixes_ignores_malformed_entries() {
        let table = SparsityTable::from_prefixes(["12", "1234", "abc", "555"]);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec!["555"]);
    }

    #[test]
    fn iter_is_sorted() {
        let table = SparsityTable::safe_harbor();
        let listed: Vec<&str> = table.iter().collect();
        let mut sorted = listed.clone();
        sorted.sort_unstable();
        assert_eq!(listed, sorted);
        assert_eq!(listed.first(), Some(&"036"));
        assert_eq!(listed.last(), Some(&"893"));
    }
}
