//! HIPAA Safe Harbor deidentification of ZIP codes in delimited files.
//!
//! This crate separates:
//! - **Policy**: what a single ZIP value becomes (masked, redacted, or left alone).
//! - **Resolution**: which header columns hold ZIP codes.
//! - **Processing**: streaming rows through the policy while preserving everything else.
//!
//! Key rules:
//! - Fixed 3-digit precision redacts prefixes listed in the sparsity table.
//! - Fixed 2-digit precision never redacts.
//! - Smart precision keeps three digits, or two for sparse prefixes, and never redacts.
//! - Values with fewer than two digits pass through trimmed but unchanged.
//! - Column tokens match header names before they are tried as indices.
//!
//! What this crate does:
//! - defines the sparse prefix table and the per-value policy
//! - resolves column references and streams delimited files
//! - provides a `slog` adapter for run summaries behind the `slog-json` feature
//!
//! What it does not do:
//! - detect PII in arbitrary columns
//! - check that a value is a real ZIP code
//! - verify k-anonymity beyond the fixed table
//!
//! The `deidentify-zipcode` command-line tool lives in `safeharbor-zip-cli`.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else,
    clippy::ref_option
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod columns;
mod delimiter;
mod error;
mod policy;
mod process;
#[cfg(feature = "slog-json")]
pub mod slog;
mod sparsity;

// Re-exports
pub use columns::{resolve_columns, ColumnRef, ColumnWarning, Resolution, ResolvedColumn};
pub use delimiter::{Delimiter, DelimiterError};
pub use error::{Error, Result};
pub use policy::{
    classify, Deidentified, FillChar, ParseFillCharError, ParsePrecisionError, PolicyConfig,
    PolicyEngine, Precision, ZipValue, DEFAULT_REDACTION_VALUE, ZIP_LENGTH,
};
pub use process::{
    default_output_path, Prepared, Processor, Summary, DEFAULT_COLUMN, OUTPUT_SUFFIX,
};
pub use sparsity::{SparsityTable, SAFE_HARBOR_POPULATION_THRESHOLD, SPARSE_ZIP_PREFIXES};
