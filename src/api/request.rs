//! Request types for the invoice engine API.
//!
//! This module defines the JSON request structures for the `/invoice`
//! endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{
    BillingPeriod, ProjectDirectory, ProjectInfo, ReportMeta, TimeEntry,
};

/// Request body for the `/invoice` endpoint.
///
/// Carries the already-parsed timesheet records, the project directory and
/// the user-supplied salary for one invoice run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRequest {
    /// The person the timesheet belongs to.
    pub person_name: String,
    /// The person's department / business-field number.
    pub department: String,
    /// The period identifier, e.g. "2026-01" or "20260101-20260131".
    pub period: String,
    /// Monthly salary; stays user-editable in the generated document.
    #[serde(default)]
    pub monthly_salary: Decimal,
    /// The logged-time records.
    pub entries: Vec<TimeEntryRequest>,
    /// The project directory rows.
    #[serde(default)]
    pub projects: Vec<ProjectRequest>,
}

/// One logged-time record in an invoice request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntryRequest {
    /// The project the time was logged on; may be blank.
    #[serde(default)]
    pub project_name: String,
    /// Hours logged against the project.
    #[serde(default)]
    pub logged_hours: Decimal,
    /// Paid time-off hours attached to this record.
    #[serde(default)]
    pub time_off_hours: Decimal,
    /// Paid public-holiday hours attached to this record.
    #[serde(default)]
    pub holiday_hours: Decimal,
    /// Free-text reason for the time off.
    #[serde(default)]
    pub time_off_reason: Option<String>,
}

/// One project directory row in an invoice request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRequest {
    /// The project name as it appears in timesheet records.
    pub project_name: String,
    /// Explicit project code, when assigned.
    #[serde(default)]
    pub project_code: Option<String>,
    /// Free-form tags; may carry a "PCG"/"PCR" marker.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl InvoiceRequest {
    /// Converts the request into the engine's report metadata.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::UnparsablePeriod`] when the
    /// period identifier cannot be decoded.
    pub fn meta(&self) -> EngineResult<ReportMeta> {
        Ok(ReportMeta {
            person_name: self.person_name.clone(),
            department: self.department.clone(),
            period: BillingPeriod::parse(&self.period)?,
        })
    }

    /// Builds the project directory from the request rows.
    pub fn directory(&self) -> ProjectDirectory {
        let mut directory = ProjectDirectory::new();
        for project in &self.projects {
            directory.insert(
                project.project_name.clone(),
                ProjectInfo {
                    project_code: project.project_code.clone(),
                    tags: project.tags.clone(),
                },
            );
        }
        directory
    }
}

impl From<TimeEntryRequest> for TimeEntry {
    fn from(req: TimeEntryRequest) -> Self {
        TimeEntry {
            project_name: req.project_name,
            logged_hours: req.logged_hours,
            time_off_hours: req.time_off_hours,
            holiday_hours: req.holiday_hours,
            time_off_reason: req.time_off_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_invoice_request() {
        let json = r#"{
            "person_name": "Jane Doe",
            "department": "07",
            "period": "2026-01",
            "monthly_salary": "5000",
            "entries": [
                {
                    "project_name": "10_Acme",
                    "logged_hours": "40"
                }
            ],
            "projects": [
                {
                    "project_name": "10_Acme",
                    "project_code": "100100"
                }
            ]
        }"#;

        let request: InvoiceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.person_name, "Jane Doe");
        assert_eq!(request.entries.len(), 1);
        assert_eq!(request.projects.len(), 1);

        let meta = request.meta().unwrap();
        assert_eq!(meta.period.label(), "January 2026");

        let directory = request.directory();
        assert_eq!(
            directory.get("10_Acme").unwrap().project_code.as_deref(),
            Some("100100")
        );
    }

    #[test]
    fn test_entry_conversion_defaults() {
        let json = r#"{"project_name": "10_Acme"}"#;
        let req: TimeEntryRequest = serde_json::from_str(json).unwrap();
        let entry: TimeEntry = req.into();

        assert_eq!(entry.logged_hours, Decimal::ZERO);
        assert!(entry.time_off_reason.is_none());
    }

    #[test]
    fn test_meta_with_bad_period_errors() {
        let request = InvoiceRequest {
            person_name: "Jane".to_string(),
            department: "07".to_string(),
            period: "whenever".to_string(),
            monthly_salary: Decimal::ZERO,
            entries: vec![],
            projects: vec![],
        };

        assert!(request.meta().is_err());
    }
}
