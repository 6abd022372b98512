//! Timesheet entry model.
//!
//! This module defines the [`TimeEntry`] struct representing one logged-time
//! line of the input timesheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents one logged-time line for a person within the billing period.
///
/// Entries are immutable once read from input; all hour fields are
/// non-negative and default to zero when absent from the source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// The project the time was logged on. May be blank for unattributed
    /// overhead time.
    #[serde(default)]
    pub project_name: String,
    /// Hours logged against the project.
    #[serde(default)]
    pub logged_hours: Decimal,
    /// Paid time-off hours (vacation, sick leave) attached to this line.
    #[serde(default)]
    pub time_off_hours: Decimal,
    /// Paid public-holiday hours attached to this line.
    #[serde(default)]
    pub holiday_hours: Decimal,
    /// Free-text reason for the time off. Certain reasons flag compensatory
    /// overtime that must be excluded from the paid-time-off total.
    #[serde(default)]
    pub time_off_reason: Option<String>,
}

impl TimeEntry {
    /// Returns true if the entry carries a non-blank project name.
    pub fn has_project(&self) -> bool {
        !self.project_name.trim().is_empty()
    }

    /// Returns the sum of every hour field on this entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use invoice_engine::models::TimeEntry;
    /// use rust_decimal::Decimal;
    ///
    /// let entry = TimeEntry {
    ///     project_name: "10_Acme".to_string(),
    ///     logged_hours: Decimal::new(80, 1),
    ///     time_off_hours: Decimal::new(40, 1),
    ///     holiday_hours: Decimal::ZERO,
    ///     time_off_reason: None,
    /// };
    /// assert_eq!(entry.total_hours(), Decimal::new(120, 1)); // 12.0
    /// ```
    pub fn total_hours(&self) -> Decimal {
        self.logged_hours + self.time_off_hours + self.holiday_hours
    }

    /// Returns true if the time-off reason matches any of the given keywords
    /// (case-insensitive substring match).
    ///
    /// Used to detect compensatory-overtime time off, which is excluded from
    /// the paid-time-off total because it was already billed in an earlier
    /// period.
    pub fn reason_matches(&self, keywords: &[String]) -> bool {
        let Some(reason) = &self.time_off_reason else {
            return false;
        };
        let reason = reason.to_lowercase();
        keywords
            .iter()
            .any(|keyword| reason.contains(&keyword.to_lowercase()))
    }
}
