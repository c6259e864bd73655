//! Reader for the contests table: CSV with a header row.
//!
//! Only `contestid` and `sponsor` are extracted; additional columns (title,
//! timing, amount, ...) pass through unvalidated. No CSV crate is involved;
//! the scanner below covers the RFC 4180 subset the table uses: quoted
//! fields, doubled-quote escapes, and CR/LF or CRLF row terminators.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::records::{ContestRow, ParseDiagnostic};

const CONTEST_ID_COLUMN: &str = "contestid";
const SPONSOR_COLUMN: &str = "sponsor";

/// Read the contests table.
///
/// A row whose `contestid` cell is not numeric yields a row-level diagnostic
/// and is excluded; remaining rows continue. A header missing a required
/// column (or an unreadable file) is a single table-level diagnostic and no
/// rows load. An empty table is valid and yields zero rows.
pub fn read_contests(path: &Path) -> (Vec<ContestRow>, Vec<ParseDiagnostic>) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => return (Vec::new(), vec![ParseDiagnostic::new(path, err.to_string())]),
    };

    let mut records = scan_csv(&contents);
    if records.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let header = records.remove(0);

    let contestid_column = match column(&header, CONTEST_ID_COLUMN) {
        Some(index) => index,
        None => return (Vec::new(), vec![missing_column(path, CONTEST_ID_COLUMN)]),
    };
    let sponsor_column = match column(&header, SPONSOR_COLUMN) {
        Some(index) => index,
        None => return (Vec::new(), vec![missing_column(path, SPONSOR_COLUMN)]),
    };

    let mut rows = Vec::new();
    let mut diagnostics = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let row = index + 1;
        let raw_id = cell(record, contestid_column);
        match raw_id.trim().parse::<i64>() {
            Ok(contestid) => rows.push(ContestRow {
                row,
                contestid,
                sponsor: cell(record, sponsor_column).to_string(),
            }),
            Err(_) => diagnostics.push(ParseDiagnostic::new(
                path,
                format!("row {row}: \"{CONTEST_ID_COLUMN}\" must be numeric (found \"{raw_id}\")"),
            )),
        }
    }
    debug!(rows = rows.len(), "loaded contests table");
    (rows, diagnostics)
}

fn column(header: &[String], name: &str) -> Option<usize> {
    header.iter().position(|cell| cell.trim() == name)
}

fn cell(record: &[String], index: usize) -> &str {
    record.get(index).map_or("", String::as_str)
}

fn missing_column(path: &Path, name: &str) -> ParseDiagnostic {
    ParseDiagnostic::new(path, format!("missing required column \"{name}\""))
}

/// Split CSV text into records of fields. Blank lines are skipped.
fn scan_csv(contents: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = contents.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if record.is_empty() && field.is_empty() {
                    continue;
                }
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(ch),
        }
    }
    if !record.is_empty() || !field.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDataset;

    fn read(dataset: &TestDataset, contents: &str) -> (Vec<ContestRow>, Vec<ParseDiagnostic>) {
        dataset.write_contests(contents).expect("write contests");
        read_contests(&dataset.contests_path())
    }

    #[test]
    fn reads_rows_and_ignores_extra_columns() {
        let dataset = TestDataset::new().expect("dataset");
        let (rows, diagnostics) = read(
            &dataset,
            "contestid,title,sponsor,amount\n1,First,Org A,\"$10,000\"\n2,Second,Org B,$5\n",
        );

        assert!(diagnostics.is_empty());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].contestid, 1);
        assert_eq!(rows[0].sponsor, "Org A");
        assert_eq!(rows[1].row, 2);
    }

    #[test]
    fn quoted_fields_may_contain_commas_newlines_and_quotes() {
        let dataset = TestDataset::new().expect("dataset");
        let (rows, diagnostics) = read(
            &dataset,
            "contestid,title,sponsor\n1,\"a, \"\"big\"\"\ncontest\",Org\n",
        );

        assert!(diagnostics.is_empty());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sponsor, "Org");
    }

    #[test]
    fn non_numeric_contestid_excludes_only_that_row() {
        let dataset = TestDataset::new().expect("dataset");
        let (rows, diagnostics) = read(
            &dataset,
            "contestid,sponsor\n1,Org\nsoon,Org\n3,Org\n",
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].detail.contains("row 2"));
        assert!(diagnostics[0].detail.contains("found \"soon\""));
    }

    #[test]
    fn missing_required_column_fails_the_table() {
        let dataset = TestDataset::new().expect("dataset");
        let (rows, diagnostics) = read(&dataset, "contestid,title\n1,First\n");

        assert!(rows.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].detail.contains("\"sponsor\""));
    }

    #[test]
    fn empty_table_and_blank_lines_are_tolerated() {
        let dataset = TestDataset::new().expect("dataset");
        assert_eq!(read(&dataset, "").0.len(), 0);

        let (rows, diagnostics) = read(&dataset, "contestid,sponsor\n\n1,Org\n\n");
        assert!(diagnostics.is_empty());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn crlf_terminators_parse_like_lf() {
        let dataset = TestDataset::new().expect("dataset");
        let (rows, diagnostics) = read(&dataset, "contestid,sponsor\r\n1,Org\r\n");

        assert!(diagnostics.is_empty());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sponsor, "Org");
    }
}
