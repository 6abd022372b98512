//! Timesheet and project directory ingestion.
//!
//! This module parses the two CSV inputs the engine consumes. Required
//! columns are validated up front — a missing column aborts the run before
//! any computation starts, so no partial ledger is ever produced from a
//! malformed export.

use std::io::Read;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{BillingPeriod, ProjectDirectory, ProjectInfo, ReportMeta, TimeEntry};

/// Required columns of the timesheet export, in validation order.
const TIMESHEET_COLUMNS: [&str; 8] = [
    "Person",
    "Department",
    "Period",
    "Project",
    "Logged hours",
    "Time off hours",
    "Holiday hours",
    "Time off reason",
];

/// Required columns of the project directory export.
const DIRECTORY_COLUMNS: [&str; 3] = ["Project", "Project code", "Tags"];

/// A parsed timesheet: the report metadata plus every logged-time record.
#[derive(Debug, Clone)]
pub struct TimesheetImport {
    /// Person, department and billing period from the export.
    pub meta: ReportMeta,
    /// The logged-time records, in input order.
    pub entries: Vec<TimeEntry>,
}

/// Reads a timesheet CSV export.
///
/// The person, department and period are taken from the first record; the
/// period identifier must decode per [`BillingPeriod::parse`].
///
/// # Errors
///
/// - [`EngineError::MissingColumn`] when a required column is absent.
/// - [`EngineError::UnparsablePeriod`] when the period identifier cannot be
///   decoded.
/// - [`EngineError::InvalidRecord`] for unreadable rows, negative or
///   non-numeric hour values, or an export without any records.
pub fn read_timesheet<R: Read>(reader: R) -> EngineResult<TimesheetImport> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns = column_indices(&mut csv_reader, &TIMESHEET_COLUMNS)?;

    let mut meta: Option<ReportMeta> = None;
    let mut entries = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| EngineError::InvalidRecord {
            row,
            message: e.to_string(),
        })?;
        let field = |at: usize| record.get(columns[at]).unwrap_or("").trim();

        if meta.is_none() {
            meta = Some(ReportMeta {
                person_name: field(0).to_string(),
                department: field(1).to_string(),
                period: BillingPeriod::parse(field(2))?,
            });
        }

        let reason = field(7);
        entries.push(TimeEntry {
            project_name: field(3).to_string(),
            logged_hours: parse_hours(field(4), "Logged hours", row)?,
            time_off_hours: parse_hours(field(5), "Time off hours", row)?,
            holiday_hours: parse_hours(field(6), "Holiday hours", row)?,
            time_off_reason: (!reason.is_empty()).then(|| reason.to_string()),
        });
    }

    let meta = meta.ok_or_else(|| EngineError::InvalidRecord {
        row: 1,
        message: "timesheet contains no records".to_string(),
    })?;

    Ok(TimesheetImport { meta, entries })
}

/// Reads a project directory CSV export.
///
/// Codes that are empty or not purely digits are treated as absent; tags are
/// split on `;` and `,`.
///
/// # Errors
///
/// - [`EngineError::MissingColumn`] when a required column is absent.
/// - [`EngineError::InvalidRecord`] for unreadable rows.
pub fn read_project_directory<R: Read>(reader: R) -> EngineResult<ProjectDirectory> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns = column_indices(&mut csv_reader, &DIRECTORY_COLUMNS)?;

    let mut directory = ProjectDirectory::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| EngineError::InvalidRecord {
            row: index + 1,
            message: e.to_string(),
        })?;
        let field = |at: usize| record.get(columns[at]).unwrap_or("").trim();

        let project_name = field(0);
        if project_name.is_empty() {
            continue;
        }

        let code = field(1);
        let tags = field(2)
            .split([';', ','])
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect();

        directory.insert(
            project_name,
            ProjectInfo {
                project_code: usable_code(code).map(String::from),
                tags,
            },
        );
    }

    Ok(directory)
}

/// Resolves required column names to indices, reporting the first missing
/// column in declaration order.
fn column_indices<R: Read, const N: usize>(
    reader: &mut csv::Reader<R>,
    required: &[&str; N],
) -> EngineResult<[usize; N]> {
    let headers = reader.headers().map_err(|e| EngineError::InvalidRecord {
        row: 1,
        message: format!("cannot read header row: {e}"),
    })?;

    let mut indices = [0usize; N];
    for (at, column) in required.iter().enumerate() {
        indices[at] = headers
            .iter()
            .position(|header| header.trim() == *column)
            .ok_or_else(|| EngineError::MissingColumn {
                column: column.to_string(),
            })?;
    }
    Ok(indices)
}

/// A code is only usable when it is a non-empty string of digits.
fn usable_code(code: &str) -> Option<&str> {
    (!code.is_empty() && code.bytes().all(|b| b.is_ascii_digit())).then_some(code)
}

fn parse_hours(value: &str, column: &str, row: usize) -> EngineResult<Decimal> {
    if value.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let hours: Decimal = value.parse().map_err(|_| EngineError::InvalidRecord {
        row,
        message: format!("{column} is not a number: '{value}'"),
    })?;
    if hours < Decimal::ZERO {
        return Err(EngineError::InvalidRecord {
            row,
            message: format!("{column} is negative: {value}"),
        });
    }
    Ok(hours)
}
