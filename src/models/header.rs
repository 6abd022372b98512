//! Billing period, report metadata and invoice header models.
//!
//! The billing period is decoded from the period identifier carried by the
//! timesheet export; decoding failures are fatal for header construction and
//! are propagated, never silently defaulted.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The date range an invoice covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// First day of the period (inclusive).
    pub start: NaiveDate,
    /// Last day of the period (inclusive).
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Decodes a period identifier.
    ///
    /// Two forms are accepted: `YYYYMMDD-YYYYMMDD` (the export's explicit
    /// range) and `YYYY-MM` (a whole calendar month).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnparsablePeriod`] when the identifier matches
    /// neither form or the dates themselves are invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use invoice_engine::models::BillingPeriod;
    ///
    /// let period = BillingPeriod::parse("2026-01").unwrap();
    /// assert_eq!(period.label(), "January 2026");
    ///
    /// let period = BillingPeriod::parse("20260115-20260214").unwrap();
    /// assert_eq!(period.label(), "2026-01-15 to 2026-02-14");
    /// ```
    pub fn parse(value: &str) -> EngineResult<Self> {
        let trimmed = value.trim();

        let unparsable = |message: &str| EngineError::UnparsablePeriod {
            value: value.to_string(),
            message: message.to_string(),
        };

        // Explicit range form: YYYYMMDD-YYYYMMDD.
        if trimmed.len() == 17 && trimmed.as_bytes()[8] == b'-' {
            let start = NaiveDate::parse_from_str(&trimmed[..8], "%Y%m%d")
                .map_err(|_| unparsable("invalid start date"))?;
            let end = NaiveDate::parse_from_str(&trimmed[9..], "%Y%m%d")
                .map_err(|_| unparsable("invalid end date"))?;
            if end < start {
                return Err(unparsable("period ends before it starts"));
            }
            return Ok(Self { start, end });
        }

        // Whole-month form: YYYY-MM.
        if trimmed.len() == 7 && trimmed.as_bytes()[4] == b'-' {
            let start = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
                .map_err(|_| unparsable("invalid year/month"))?;
            let end = Self::last_day_of_month(start)
                .ok_or_else(|| unparsable("invalid year/month"))?;
            return Ok(Self { start, end });
        }

        Err(unparsable("expected YYYY-MM or YYYYMMDD-YYYYMMDD"))
    }

    fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
        let next_month = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        };
        next_month.and_then(|date| date.pred_opt())
    }

    /// Returns the human-readable period label shown in the invoice header.
    ///
    /// A period spanning exactly one calendar month renders as "January 2026";
    /// anything else renders as an explicit from/to range.
    pub fn label(&self) -> String {
        if self.start.year() == self.end.year() && self.start.month() == self.end.month() {
            self.start.format("%B %Y").to_string()
        } else {
            format!(
                "{} to {}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }
}

/// Metadata identifying whose time an invoice covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// The person the timesheet belongs to.
    pub person_name: String,
    /// The person's department / business-field number (e.g. "07").
    pub department: String,
    /// The billing period the records cover.
    pub period: BillingPeriod,
}

impl ReportMeta {
    /// Parses metadata from a timesheet export name of the form
    /// `<Name>-LoggedTime-YYYYMMDD-YYYYMMDD` (a trailing `.csv` is ignored).
    ///
    /// The department is not part of the export name and must be supplied by
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnparsablePeriod`] when the name does not match
    /// the expected pattern.
    pub fn from_report_name(name: &str, department: impl Into<String>) -> EngineResult<Self> {
        let stem = name.strip_suffix(".csv").unwrap_or(name);

        let (person, range) =
            stem.split_once("-LoggedTime-")
                .ok_or_else(|| EngineError::UnparsablePeriod {
                    value: name.to_string(),
                    message: "expected <Name>-LoggedTime-YYYYMMDD-YYYYMMDD".to_string(),
                })?;

        Ok(Self {
            person_name: person.trim().to_string(),
            department: department.into(),
            period: BillingPeriod::parse(range)?,
        })
    }

    /// Returns the suggested output filename, e.g.
    /// `Invoice_Jane_Doe_January_2026.xlsx`.
    pub fn output_filename(&self) -> String {
        format!(
            "Invoice_{}_{}.xlsx",
            sanitize_for_filename(&self.person_name),
            sanitize_for_filename(&self.period.label())
        )
    }
}

/// Collapses runs of filename-hostile characters to single underscores.
fn sanitize_for_filename(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_was_underscore = false;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            out.push(c);
            previous_was_underscore = false;
        } else if !previous_was_underscore {
            out.push('_');
            previous_was_underscore = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// The invoice header scalars rendered above the project tables.
///
/// Salary and the business field stay user-editable in the generated
/// document; the derived total-days and day-rate cells are formulas
/// referencing them so edits recompute the whole chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceHeader {
    /// The person the invoice bills for.
    pub person_name: String,
    /// The department / business-field number (user-editable).
    pub department: String,
    /// The period label, e.g. "January 2026".
    pub period_label: String,
    /// Monthly salary (user-editable literal; zero until filled in).
    pub monthly_salary: Decimal,
    /// Total logged hours across all entries (literal).
    pub total_logged_hours: Decimal,
    /// Paid-time-off hours, excluding flagged compensatory overtime
    /// (literal).
    pub time_off_hours: Decimal,
    /// Formula for the total-days cell, e.g. `=(B5+B6)/8`.
    pub total_days: String,
    /// Formula for the day-rate cell, e.g. `=B4/B7`.
    pub day_rate: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_period() {
        let period = BillingPeriod::parse("2026-01").unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
    }

    #[test]
    fn test_parse_december_month_period() {
        let period = BillingPeriod::parse("2025-12").unwrap();
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_parse_explicit_range_period() {
        let period = BillingPeriod::parse("20260115-20260214").unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
    }

    #[test]
    fn test_parse_rejects_reversed_range() {
        let result = BillingPeriod::parse("20260214-20260115");
        assert!(matches!(
            result,
            Err(EngineError::UnparsablePeriod { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = BillingPeriod::parse("sometime soon");
        match result {
            Err(EngineError::UnparsablePeriod { value, .. }) => {
                assert_eq!(value, "sometime soon");
            }
            other => panic!("Expected UnparsablePeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_label_for_single_month_range() {
        let period = BillingPeriod::parse("20260101-20260131").unwrap();
        assert_eq!(period.label(), "January 2026");
    }

    #[test]
    fn test_label_for_cross_month_range() {
        let period = BillingPeriod::parse("20260115-20260214").unwrap();
        assert_eq!(period.label(), "2026-01-15 to 2026-02-14");
    }

    #[test]
    fn test_meta_from_report_name() {
        let meta =
            ReportMeta::from_report_name("Jane Doe-LoggedTime-20260101-20260131.csv", "07")
                .unwrap();
        assert_eq!(meta.person_name, "Jane Doe");
        assert_eq!(meta.department, "07");
        assert_eq!(meta.period.label(), "January 2026");
    }

    #[test]
    fn test_meta_from_report_name_rejects_other_patterns() {
        let result = ReportMeta::from_report_name("timesheet.csv", "07");
        assert!(matches!(
            result,
            Err(EngineError::UnparsablePeriod { .. })
        ));
    }

    #[test]
    fn test_output_filename_is_sanitized() {
        let meta =
            ReportMeta::from_report_name("Jane Doe-LoggedTime-20260101-20260131", "07").unwrap();
        assert_eq!(meta.output_filename(), "Invoice_Jane_Doe_January_2026.xlsx");
    }
}
