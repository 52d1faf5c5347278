//! Policy engine: what a single ZIP value becomes.
//!
//! This module ties the pieces together:
//!
//! - **`config`**: how to deidentify (`Precision`, `FillChar`, `PolicyConfig`)
//! - **`value`**: what is being deidentified (`ZipValue`, `Deidentified`)
//! - **`engine`**: the decision itself (`PolicyEngine`, `classify`)
//!
//! The sparse prefix table lives in `crate::sparsity`.

mod config;
mod engine;
mod value;

pub use config::{
    FillChar, ParseFillCharError, ParsePrecisionError, PolicyConfig, Precision,
    DEFAULT_REDACTION_VALUE, ZIP_LENGTH,
};
pub use engine::{classify, PolicyEngine};
pub use value::{Deidentified, ZipValue};
