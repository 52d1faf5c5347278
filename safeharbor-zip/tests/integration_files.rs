//! End-to-end tests for deidentifying files on disk.
//!
//! These tests exercise the integration of:
//! - header reading and column resolution,
//! - per-field policy decisions, and
//! - staged output that only replaces the destination on success.

use std::fs;
use std::path::{Path, PathBuf};

use safeharbor_zip::{
    default_output_path, ColumnRef, Delimiter, Error, FillChar, PolicyConfig, Precision, Processor,
};
use tempfile::TempDir;

const PEOPLE: &str = "id,name,zipcode,work_zip\n\
                      1,Alice,12345,90210\n\
                      2,Bob,03601,82101\n\
                      3,Charlie,94102-5678,00501\n";

fn fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn smart_mode_deidentifies_two_columns() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "people.csv", PEOPLE);
    let output = default_output_path(&input);

    let summary = Processor::default()
        .with_columns(["zipcode", "work_zip"])
        .process_file(&input, &output)
        .unwrap();

    assert_eq!(output, dir.path().join("people_deidentified.csv"));
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.redactions, 0);
    assert_eq!(summary.output.as_deref(), Some(output.as_path()));
    assert_eq!(
        lines(&output),
        [
            "id,name,zipcode,work_zip",
            "1,Alice,12300,90200",
            "2,Bob,03000,82000",
            "3,Charlie,94100,00500",
        ]
    );
}

#[test]
fn column_indices_select_by_position() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "people.csv", PEOPLE);
    let output = dir.path().join("out.csv");

    Processor::new(PolicyConfig::new(Precision::Fixed2))
        .with_columns([ColumnRef::Index(2), ColumnRef::Index(3)])
        .process_file(&input, &output)
        .unwrap();

    assert_eq!(lines(&output)[1], "1,Alice,12000,90000");
}

#[test]
fn digit_column_names_match_by_name() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "years.csv", "id,2023,2024\n1,12345,90210\n2,03601,82101\n");
    let output = dir.path().join("years_out.csv");

    let summary = Processor::new(PolicyConfig::new(Precision::Fixed3))
        .with_columns(["2023", "2024"])
        .process_file(&input, &output)
        .unwrap();

    assert_eq!(summary.columns, ["2023", "2024"]);
    assert_eq!(summary.redactions, 2);
    assert_eq!(
        lines(&output),
        [
            "id,2023,2024",
            "1,12300,90200",
            "2,REDACTED_HIPAA,REDACTED_HIPAA",
        ]
    );
}

#[test]
fn digit_tokens_without_matching_names_are_indices() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "people.csv", PEOPLE);
    let output = dir.path().join("out.csv");

    Processor::new(PolicyConfig::new(Precision::Fixed3).with_fill(FillChar::X))
        .with_columns(["2", "3"])
        .process_file(&input, &output)
        .unwrap();

    assert_eq!(lines(&output)[1], "1,Alice,123XX,902XX");
}

#[test]
fn other_delimiters_are_preserved() {
    let cases = [
        ("\\t", "id\tname\tzipcode\n1\tAlice\t12345\n2\tBob\t03601\n", '\t'),
        (";", "id;name;zipcode\n1;Alice;12345\n2;Bob;03601\n", ';'),
        ("|", "id|name|zipcode\n1|Alice|12345\n2|Bob|03601\n", '|'),
        ("\\", "id\\name\\zipcode\n1\\Alice\\12345\n2\\Bob\\03601\n", '\\'),
    ];

    for (argument, contents, separator) in cases {
        let dir = TempDir::new().unwrap();
        let input = fixture(&dir, "data.txt", contents);
        let output = dir.path().join("data_out.txt");
        let delimiter: Delimiter = argument.parse().unwrap();

        Processor::new(PolicyConfig::new(Precision::Fixed3))
            .with_delimiter(delimiter)
            .process_file(&input, &output)
            .unwrap();

        let written = lines(&output);
        let row1: Vec<&str> = written[1].split(separator).collect();
        let row2: Vec<&str> = written[2].split(separator).collect();
        assert_eq!(row1[2], "12300", "delimiter {argument:?}");
        assert_eq!(row2[2], "REDACTED_HIPAA", "delimiter {argument:?}");
    }
}

#[test]
fn missing_input_is_reported_before_any_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.csv");
    let output = dir.path().join("out.csv");

    let err = Processor::default().process_file(&input, &output).unwrap_err();

    assert!(matches!(err, Error::InputNotFound(ref path) if path == &input));
    assert!(!output.exists());
}

#[test]
fn unresolvable_columns_leave_destination_untouched() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "people.csv", PEOPLE);
    let output = fixture(&dir, "out.csv", "previous contents\n");

    let err = Processor::default()
        .with_columns(["home_zip"])
        .process_file(&input, &output)
        .unwrap_err();

    assert!(matches!(err, Error::NoColumns));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous contents\n");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn empty_input_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "empty.csv", "");
    let output = dir.path().join("out.csv");

    let err = Processor::default().process_file(&input, &output).unwrap_err();

    assert!(matches!(err, Error::EmptyInput));
    assert!(err.is_configuration());
    assert!(!output.exists());
}

#[test]
fn output_may_replace_input_in_place() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "people.csv", PEOPLE);

    let summary = Processor::default().process_file(&input, &input).unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(lines(&input)[2], "2,Bob,03000,82101");
}
