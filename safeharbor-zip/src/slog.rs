//! Adapter for emitting run summaries through `slog`.
//!
//! This module connects [`Summary`] with `slog` by providing a `slog::Value`
//! implementation that serializes the summary as structured JSON via
//! `slog`'s nested-value support.
//!
//! It avoids fallible logging APIs: a summary that cannot be converted to JSON
//! is logged as a placeholder string rather than propagating an error.

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::process::Summary;

impl Summary {
    /// Returns the summary as a JSON value.
    ///
    /// Falls back to a JSON string if serialization fails.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self)
            .unwrap_or_else(|_| JsonValue::String("Failed to serialize summary".to_string()))
    }
}

impl SlogValue for Summary {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.to_json());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        policy::{FillChar, Precision},
        process::Summary,
    };

    #[test]
    fn summary_json_lists_counts_and_settings() {
        let summary = Summary {
            rows: 3,
            redactions: 1,
            columns: vec!["zipcode".into()],
            warnings: Vec::new(),
            precision: Precision::Fixed3,
            fill: FillChar::X,
            output: None,
        };
        assert_eq!(
            summary.to_json(),
            serde_json::json!({
                "rows": 3,
                "redactions": 1,
                "columns": ["zipcode"],
                "warnings": [],
                "precision": "3",
                "fill": "X",
            })
        );
    }
}
