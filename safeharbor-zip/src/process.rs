//! Streaming rows from an input file to a deidentified output file.
//!
//! Processing happens in two phases so that nothing is written until the
//! target columns are known:
//!
//! 1. [`Processor::prepare`] reads the header row and resolves the column
//!    references once.
//! 2. [`Prepared::write_to`] streams every remaining row, replacing only the
//!    resolved fields.
//!
//! [`Processor::process_file`] wraps both phases for files on disk and only
//! replaces the destination once the whole output has been written.

use std::{
    fmt,
    fs::{self, File},
    io::{self, BufRead, BufReader, Write as _},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use serde::Serialize;
use slog::{debug, info, o, warn, Discard, Logger};

use crate::{
    columns::{resolve_columns, ColumnRef, ColumnWarning, Resolution},
    delimiter::Delimiter,
    error::{Error, Result},
    policy::{FillChar, PolicyConfig, PolicyEngine, Precision},
    sparsity::SparsityTable,
};

/// Column used when the caller does not name one.
pub const DEFAULT_COLUMN: &str = "zipcode";

/// Suffix appended to the input stem by [`default_output_path`].
pub const OUTPUT_SUFFIX: &str = "_deidentified";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Aggregate counts for one processed file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Data rows written, excluding the header.
    pub rows: u64,
    /// Fields whose output equals the configured redaction value.
    pub redactions: u64,
    /// Header names that were deidentified.
    pub columns: Vec<String>,
    /// References that were skipped during resolution.
    pub warnings: Vec<ColumnWarning>,
    pub precision: Precision,
    pub fill: FillChar,
    /// Destination path, when the run wrote a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Deidentifies the ZIP code columns of delimited files.
///
/// ```rust
/// use safeharbor_zip::{PolicyConfig, Precision, Processor};
///
/// let input = "id,zipcode\n1,12345\n2,03601\n";
/// let processor = Processor::new(PolicyConfig::new(Precision::Fixed3));
///
/// let mut output = Vec::new();
/// let summary = processor.prepare(input.as_bytes())?.write_to(&mut output)?;
///
/// assert_eq!(summary.redactions, 1);
/// assert_eq!(String::from_utf8(output).unwrap(), "id,zipcode\n1,12300\n2,REDACTED_HIPAA\n");
/// # Ok::<(), safeharbor_zip::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Processor<'t> {
    engine: PolicyEngine<'t>,
    columns: Vec<ColumnRef>,
    delimiter: Delimiter,
    logger: Logger,
}

impl Processor<'static> {
    /// Creates a processor using the Safe Harbor table, the `zipcode`
    /// column and a comma delimiter.
    #[must_use]
    pub fn new(config: PolicyConfig) -> Self {
        Self::from_engine(PolicyEngine::new(config))
    }
}

impl Default for Processor<'static> {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

impl<'t> Processor<'t> {
    /// Creates a processor around an existing engine.
    #[must_use]
    pub fn from_engine(engine: PolicyEngine<'t>) -> Self {
        Self {
            engine,
            columns: vec![ColumnRef::token(DEFAULT_COLUMN)],
            delimiter: Delimiter::default(),
            logger: Logger::root(Discard, o!()),
        }
    }

    /// Creates a processor with a caller-supplied sparsity table.
    #[must_use]
    pub fn with_table(config: PolicyConfig, table: &'t SparsityTable) -> Self {
        Self::from_engine(PolicyEngine::with_table(config, table))
    }

    /// Selects the columns to deidentify.
    #[must_use]
    pub fn with_columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnRef>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Routes resolution warnings and run statistics to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn config(&self) -> &PolicyConfig {
        self.engine.config()
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    #[must_use]
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Reads the header row and resolves the target columns.
    ///
    /// A leading UTF-8 byte order mark and CRLF line endings are noted here
    /// and reproduced by [`Prepared::write_to`].
    ///
    /// Fails with [`Error::EmptyInput`] when there is no header and with
    /// [`Error::NoColumns`] when no reference resolves. Nothing has been
    /// written when either happens.
    pub fn prepare<R: io::Read>(&self, input: R) -> Result<Prepared<'_, 't, R>> {
        let mut input = BufReader::new(input);
        let buffered = input.fill_buf()?;
        let bom = buffered.starts_with(UTF8_BOM);
        let terminator = if ends_first_line_with_crlf(buffered) {
            Terminator::CRLF
        } else {
            Terminator::Any(b'\n')
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter.as_byte())
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(Error::EmptyInput);
        }

        let names: Vec<&str> = headers.iter().collect();
        let resolution = resolve_columns(&self.columns, &names);
        for warning in &resolution.warnings {
            warn!(self.logger, "{}", warning);
        }
        if resolution.is_empty() {
            return Err(Error::NoColumns);
        }
        debug!(self.logger, "columns resolved";
            "columns" => resolution.names().collect::<Vec<_>>().join(", "),
            "skipped" => resolution.warnings.len());

        let mut targets = vec![false; headers.len()];
        for column in &resolution.columns {
            targets[column.index] = true;
        }

        Ok(Prepared {
            processor: self,
            reader,
            headers,
            resolution,
            targets,
            bom,
            terminator,
        })
    }

    /// Deidentifies `input` into `output`.
    ///
    /// The output is staged in a temporary file next to `output` and renamed
    /// into place only after every row is written, so a failed run leaves any
    /// existing destination untouched. The staged file takes the input's
    /// permissions.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<Summary> {
        if !input.exists() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }
        info!(self.logger, "deidentifying file";
            "input" => %input.display(),
            "output" => %output.display(),
            "precision" => %self.config().precision(),
            "fill" => %self.config().fill());

        let prepared = self.prepare(File::open(input)?)?;

        let directory = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = tempfile::Builder::new()
            .prefix(".deidentify-")
            .suffix(".tmp")
            .tempfile_in(directory)?;

        let mut summary = prepared.write_to(staged.as_file_mut())?;
        staged.as_file().sync_all()?;
        fs::set_permissions(staged.path(), fs::metadata(input)?.permissions())?;
        staged.persist(output).map_err(|err| Error::Io(err.error))?;

        summary.output = Some(output.to_path_buf());
        Ok(summary)
    }
}

/// Input whose header has been read and whose target columns are resolved.
pub struct Prepared<'p, 't, R> {
    processor: &'p Processor<'t>,
    reader: csv::Reader<BufReader<R>>,
    headers: StringRecord,
    resolution: Resolution,
    targets: Vec<bool>,
    bom: bool,
    terminator: Terminator,
}

impl<R> fmt::Debug for Prepared<'_, '_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prepared")
            .field("headers", &self.headers)
            .field("resolution", &self.resolution)
            .field("bom", &self.bom)
            .field("terminator", &self.terminator)
            .finish_non_exhaustive()
    }
}

impl<R: io::Read> Prepared<'_, '_, R> {
    #[must_use]
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    #[must_use]
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Writes the header and every deidentified row to `output`.
    ///
    /// Rows are written as they are read. Fields beyond the end of a short
    /// row are not invented, and extra fields on a long row are copied as is.
    /// Lines end the way the input's header line did.
    pub fn write_to<W: io::Write>(mut self, mut output: W) -> Result<Summary> {
        let processor = self.processor;
        let engine = &processor.engine;
        let redaction_value = engine.config().redaction_value();

        if self.bom {
            output.write_all(UTF8_BOM)?;
        }
        let mut writer = WriterBuilder::new()
            .delimiter(processor.delimiter.as_byte())
            .terminator(self.terminator)
            .flexible(true)
            .from_writer(output);
        writer.write_record(&self.headers)?;

        let mut record = StringRecord::new();
        let mut deidentified = StringRecord::new();
        let mut rows = 0_u64;
        let mut redactions = 0_u64;

        while self.reader.read_record(&mut record)? {
            deidentified.clear();
            for (index, field) in record.iter().enumerate() {
                if self.targets.get(index).copied().unwrap_or(false) {
                    let value = engine.classify(Some(field)).into_string();
                    if value == redaction_value {
                        redactions += 1;
                    }
                    deidentified.push_field(&value);
                } else {
                    deidentified.push_field(field);
                }
            }
            writer.write_record(&deidentified)?;
            rows += 1;
        }
        writer.flush()?;

        let summary = Summary {
            rows,
            redactions,
            columns: self.resolution.names().map(str::to_string).collect(),
            warnings: self.resolution.warnings,
            precision: engine.config().precision(),
            fill: engine.config().fill(),
            output: None,
        };
        log_finished(&processor.logger, &summary);
        Ok(summary)
    }
}

/// Checks the first line terminator within the buffered prefix.
fn ends_first_line_with_crlf(buffered: &[u8]) -> bool {
    match buffered.iter().position(|&byte| byte == b'\n') {
        Some(newline) => newline > 0 && buffered[newline - 1] == b'\r',
        None => false,
    }
}

#[cfg(feature = "slog-json")]
fn log_finished(logger: &Logger, summary: &Summary) {
    info!(logger, "deidentification finished"; "summary" => summary);
}

#[cfg(not(feature = "slog-json"))]
fn log_finished(logger: &Logger, summary: &Summary) {
    info!(logger, "deidentification finished";
        "rows" => summary.rows,
        "redactions" => summary.redactions);
}

/// Returns `<stem>_deidentified<.ext>` beside `input`.
///
/// ```rust
/// use std::path::Path;
/// use safeharbor_zip::default_output_path;
///
/// assert_eq!(
///     default_output_path(Path::new("data/patients.csv")),
///     Path::new("data/patients_deidentified.csv"),
/// );
/// ```
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut name = stem.to_os_string();
    name.push(OUTPUT_SUFFIX);
    if let Some(extension) = input.extension() {
        name.push(".");
        name.push(extension);
    }
    input.with_file_name(name)
}
