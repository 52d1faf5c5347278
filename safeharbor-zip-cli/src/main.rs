//! `deidentify-zipcode`: HIPAA Safe Harbor ZIP code deidentification.
//!
//! ```bash
//! # Smart precision on the default `zipcode` column
//! deidentify-zipcode patients.csv
//!
//! # 3-digit precision on two columns of a TSV file
//! deidentify-zipcode visits.tsv -d '\t' -p 3 -c home_zip work_zip
//! ```

use std::process::ExitCode;

use clap::{error::ErrorKind, CommandFactory, Parser};
use safeharbor_zip::Error;

mod cli;
mod logging;
mod report;

use cli::{Cli, SummaryFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = logging::stderr_logger(logging::level(cli.verbose, cli.quiet));

    match cli.run(logger) {
        Ok(summary) => {
            match cli.format {
                SummaryFormat::Text => print!("{}", report::render_text(&summary)),
                SummaryFormat::Json => println!("{}", report::render_json(&summary)),
            }
            ExitCode::SUCCESS
        }
        Err(err) => usage_error(&err),
    }
}

/// Reports a failed run the way clap reports bad arguments, then exits.
fn usage_error(err: &Error) -> ! {
    Cli::command()
        .error(ErrorKind::ValueValidation, failure_message(err))
        .exit()
}

fn failure_message(err: &Error) -> String {
    match err {
        Error::InputNotFound(_) => err.to_string(),
        _ => format!("error processing file: {err}"),
    }
}
