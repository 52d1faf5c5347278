//! Command-line arguments and the run they describe.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use safeharbor_zip::{
    default_output_path, ColumnRef, Delimiter, FillChar, PolicyConfig, Precision, Processor,
    Result, Summary, DEFAULT_COLUMN, DEFAULT_REDACTION_VALUE,
};
use slog::Logger;

const EXAMPLES: &str = "\
Examples:
  # HIPAA-compliant smart mode (default)
  deidentify-zipcode input.csv

  # 3-digit precision with X's, sparse areas redacted
  deidentify-zipcode input.csv -p 3 -f X

  # Multiple columns
  deidentify-zipcode input.csv -c home_zip work_zip billing_zip

  # Tab-separated file
  deidentify-zipcode data.tsv -d '\\t' -c zipcode

  # Pipe-separated file with a custom redaction marker
  deidentify-zipcode data.txt -d '|' -p 3 -r '[REMOVED]'";

#[derive(Debug, Parser)]
#[command(name = "deidentify-zipcode")]
#[command(version)]
#[command(about = "Deidentify ZIP codes in delimited files following HIPAA Safe Harbor guidelines")]
#[command(after_help = EXAMPLES)]
pub(crate) struct Cli {
    /// Input file path
    pub(crate) input: PathBuf,

    /// Output file path (default: adds _deidentified to the input file name)
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Column names or indices containing ZIP codes
    #[arg(short, long, num_args = 1.., default_value = DEFAULT_COLUMN)]
    pub(crate) columns: Vec<ColumnRef>,

    /// Precision: 2=2-digit, 3=3-digit (sparse areas redacted), smart=3-digit or 2-digit for sparse areas
    #[arg(short, long, value_enum, default_value_t = PrecisionArg::Smart)]
    pub(crate) precision: PrecisionArg,

    /// Fill character for replaced digits
    #[arg(short, long, value_enum, default_value_t = FillArg::Zero)]
    pub(crate) fill: FillArg,

    /// Delimiter character; escape sequences such as "\t" are decoded
    #[arg(short, long, default_value = ",")]
    pub(crate) delimiter: Delimiter,

    /// Value written in place of ZIP codes that must be removed
    #[arg(short, long, default_value = DEFAULT_REDACTION_VALUE)]
    pub(crate) redaction_value: String,

    /// Summary format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub(crate) format: SummaryFormat,

    /// Log more detail to stderr (repeat for debug output)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub(crate) verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PrecisionArg {
    #[value(name = "2")]
    Two,
    #[value(name = "3")]
    Three,
    Smart,
}

impl From<PrecisionArg> for Precision {
    fn from(value: PrecisionArg) -> Self {
        match value {
            PrecisionArg::Two => Precision::Fixed2,
            PrecisionArg::Three => Precision::Fixed3,
            PrecisionArg::Smart => Precision::Smart,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum FillArg {
    #[value(name = "0")]
    Zero,
    #[value(name = "X")]
    X,
}

impl From<FillArg> for FillChar {
    fn from(value: FillArg) -> Self {
        match value {
            FillArg::Zero => FillChar::Zero,
            FillArg::X => FillChar::X,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SummaryFormat {
    Text,
    Json,
}

impl Cli {
    pub(crate) fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }

    pub(crate) fn policy(&self) -> PolicyConfig {
        PolicyConfig::new(self.precision.into())
            .with_fill(self.fill.into())
            .with_redaction_value(self.redaction_value.clone())
    }

    pub(crate) fn processor(&self, logger: Logger) -> Processor<'static> {
        Processor::new(self.policy())
            .with_columns(self.columns.iter().cloned())
            .with_delimiter(self.delimiter)
            .with_logger(logger)
    }

    /// Deidentifies the input file as configured.
    pub(crate) fn run(&self, logger: Logger) -> Result<Summary> {
        self.processor(logger)
            .process_file(&self.input, &self.output_path())
    }
}
