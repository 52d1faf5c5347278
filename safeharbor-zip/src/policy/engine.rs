//! The deidentification decision for a single ZIP value.
//!
//! Decisions are pure string transformations. They do not read files, pick
//! columns, or keep any state beyond the injected configuration and table.

use crate::sparsity::SparsityTable;

use super::{
    config::{PolicyConfig, Precision, ZIP_LENGTH},
    value::{Deidentified, ZipValue},
};

/// Values with fewer digits than this are returned unchanged.
const MIN_MASKABLE_DIGITS: usize = 2;

/// Applies a [`PolicyConfig`] against a [`SparsityTable`].
///
/// ```rust
/// use safeharbor_zip::{Deidentified, PolicyConfig, PolicyEngine, Precision};
///
/// let engine = PolicyEngine::new(PolicyConfig::new(Precision::Fixed3));
/// assert_eq!(engine.classify(Some("12345")).as_str(), Some("12300"));
/// assert!(engine.classify(Some("03601")).is_redacted());
/// ```
#[derive(Clone, Debug)]
pub struct PolicyEngine<'t> {
    config: PolicyConfig,
    table: &'t SparsityTable,
}

impl PolicyEngine<'static> {
    /// Creates an engine backed by the Safe Harbor reference table.
    #[must_use]
    pub fn new(config: PolicyConfig) -> Self {
        Self::with_table(config, SparsityTable::safe_harbor())
    }
}

impl<'t> PolicyEngine<'t> {
    /// Creates an engine backed by a caller-supplied table.
    #[must_use]
    pub fn with_table(config: PolicyConfig, table: &'t SparsityTable) -> Self {
        Self { config, table }
    }

    #[must_use]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &'t SparsityTable {
        self.table
    }

    /// Deidentifies one raw value.
    ///
    /// This method is total (it does not return errors):
    /// - absent values stay absent
    /// - surrounding whitespace is trimmed, then every non-digit is dropped
    /// - fewer than two digits returns the trimmed text unchanged
    /// - otherwise the leading digits are kept and padded to five characters,
    ///   or the value is redacted when 3-digit precision meets a sparse prefix
    #[must_use]
    pub fn classify<V>(&self, raw: Option<&V>) -> Deidentified
    where
        V: ZipValue + ?Sized,
    {
        let Some(raw) = raw else {
            return Deidentified::Absent;
        };
        let text = raw.to_zip_text();
        let trimmed = text.trim();

        // ZIP+4 collapses to all nine digits in order; only the prefix is kept.
        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < MIN_MASKABLE_DIGITS {
            return Deidentified::Unchanged(trimmed.to_string());
        }

        let sparse = self.table.is_sparse(&digits);
        let precision = match self.config.precision() {
            Precision::Fixed3 if sparse => {
                return Deidentified::Redacted(self.config.redaction_value().to_string());
            }
            Precision::Fixed3 => 3,
            Precision::Fixed2 => 2,
            Precision::Smart if sparse => 2,
            Precision::Smart => 3,
        };
        Deidentified::Masked(self.mask(&digits, precision))
    }

    /// Keeps up to `precision` leading digits and pads with the fill character.
    fn mask(&self, digits: &str, precision: usize) -> String {
        let kept = precision.min(digits.len());
        let fill = self.config.fill().as_char();
        let mut masked = String::with_capacity(ZIP_LENGTH);
        masked.push_str(&digits[..kept]);
        masked.extend(std::iter::repeat(fill).take(ZIP_LENGTH.saturating_sub(kept)));
        masked
    }
}

/// Deidentifies one raw value with the Safe Harbor reference table.
///
/// Convenience for one-off calls; build a [`PolicyEngine`] when classifying
/// many values.
#[must_use]
pub fn classify<V>(raw: Option<&V>, config: &PolicyConfig) -> Deidentified
where
    V: ZipValue + ?Sized,
{
    PolicyEngine::with_table(config.clone(), SparsityTable::safe_harbor()).classify(raw)
}

#[cfg(test)]
mod tests {
    use super::{classify, PolicyEngine};
    use crate::{
        policy::{Deidentified, FillChar, PolicyConfig, Precision},
        sparsity::SparsityTable,
    };

    fn engine(precision: Precision, fill: FillChar) -> PolicyEngine<'static> {
        PolicyEngine::new(PolicyConfig::new(precision).with_fill(fill))
    }

    fn masked(precision: Precision, fill: FillChar, raw: &str) -> String {
        engine(precision, fill).classify(Some(raw)).into_string()
    }

    #[test]
    fn three_digit_precision_keeps_prefix() {
        assert_eq!(masked(Precision::Fixed3, FillChar::Zero, "12345"), "12300");
        assert_eq!(masked(Precision::Fixed3, FillChar::Zero, "90210"), "90200");
        assert_eq!(masked(Precision::Fixed3, FillChar::X, "00501"), "005XX");
    }

    #[test]
    fn two_digit_precision_keeps_prefix() {
        assert_eq!(masked(Precision::Fixed2, FillChar::Zero, "90210"), "90000");
        assert_eq!(masked(Precision::Fixed2, FillChar::X, "00501"), "00XXX");
    }

    #[test]
    fn zip_plus_four_collapses_to_leading_digits() {
        assert_eq!(masked(Precision::Fixed2, FillChar::X, "12345-6789"), "12XXX");
        assert_eq!(masked(Precision::Fixed3, FillChar::Zero, "12345-6789"), "12300");
        assert_eq!(masked(Precision::Smart, FillChar::X, "03601-1234"), "03XXX");
    }

    #[test]
    fn fixed3_redacts_sparse_prefixes() {
        let outcome = engine(Precision::Fixed3, FillChar::Zero).classify(Some("03601"));
        assert_eq!(outcome, Deidentified::Redacted("REDACTED_HIPAA".into()));
    }

    #[test]
    fn fixed2_does_not_redact_sparse_prefixes() {
        assert_eq!(masked(Precision::Fixed2, FillChar::Zero, "03601"), "03000");
        assert_eq!(masked(Precision::Fixed2, FillChar::X, "82101"), "82XXX");
    }

    #[test]
    fn smart_drops_to_two_digits_for_sparse_prefixes() {
        assert_eq!(masked(Precision::Smart, FillChar::Zero, "03601"), "03000");
        assert_eq!(masked(Precision::Smart, FillChar::Zero, "10234"), "10000");
        assert_eq!(masked(Precision::Smart, FillChar::Zero, "10134"), "10100");
        assert_eq!(masked(Precision::Smart, FillChar::Zero, "03701"), "03700");
    }

    #[test]
    fn custom_redaction_value_is_emitted_verbatim() {
        let config = PolicyConfig::new(Precision::Fixed3).with_redaction_value("***");
        assert_eq!(classify(Some("82101"), &config).into_string(), "***");
    }

    #[test]
    fn absent_and_empty_values_pass_through() {
        let engine = engine(Precision::Fixed3, FillChar::Zero);
        assert_eq!(engine.classify::<str>(None), Deidentified::Absent);
        assert_eq!(
            engine.classify(Some("")),
            Deidentified::Unchanged(String::new())
        );
        assert_eq!(
            engine.classify(Some("   ")),
            Deidentified::Unchanged(String::new())
        );
    }

    #[test]
    fn short_values_are_returned_trimmed() {
        let engine = engine(Precision::Fixed3, FillChar::Zero);
        assert_eq!(
            engine.classify(Some(" 1 ")),
            Deidentified::Unchanged("1".into())
        );
        assert_eq!(
            engine.classify(Some("n/a")),
            Deidentified::Unchanged("n/a".into())
        );
    }

    #[test]
    fn precision_drops_to_available_digits() {
        assert_eq!(masked(Precision::Fixed3, FillChar::Zero, "12"), "12000");
        assert_eq!(masked(Precision::Smart, FillChar::X, "12"), "12XXX");
    }

    #[test]
    fn numeric_inputs_use_their_decimal_text() {
        let engine = engine(Precision::Fixed3, FillChar::Zero);
        assert_eq!(engine.classify(Some(&12345_u32)).into_string(), "12300");
        assert_eq!(engine.classify(Some(&501_u32)).into_string(), "50100");
    }

    #[test]
    fn custom_table_changes_sparsity() {
        let table = SparsityTable::from_prefixes(["123"]);
        let engine = PolicyEngine::with_table(PolicyConfig::new(Precision::Smart), &table);
        assert_eq!(engine.classify(Some("12345")).into_string(), "12000");
        assert_eq!(engine.classify(Some("03601")).into_string(), "03600");
    }
}
