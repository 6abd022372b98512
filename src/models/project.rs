//! Project directory and classification models.
//!
//! This module defines the read-only project lookup table supplied by the
//! caller and the [`Classification`] derived from it for each project name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel project code for rows whose project cannot be classified.
pub const NO_PROJECT_CODE: &str = "no project code";

/// The billing entity a ledger row is attributed to.
///
/// The ordering is the display order of the invoice: PCG rows render before
/// PCR rows, and unassigned rows last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Company {
    /// The PCG billing entity (project codes starting with "1").
    Pcg,
    /// The PCR billing entity (project codes starting with "2").
    Pcr,
    /// No billing entity could be determined; the row is surfaced in its own
    /// bucket so the user can fix it by hand.
    Unassigned,
}

impl Company {
    /// Returns the display label used in ledger rows and section titles.
    pub fn label(&self) -> &'static str {
        match self {
            Company::Pcg => "PCG",
            Company::Pcr => "PCR",
            Company::Unassigned => "UNASSIGNED",
        }
    }
}

impl std::fmt::Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Directory entry for one project: an optional explicit code and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Explicit project code (string of digits), when assigned.
    #[serde(default)]
    pub project_code: Option<String>,
    /// Free-form tags; may carry a company marker such as "PCG" or "PCR".
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Read-only mapping from project name to code and tags.
///
/// Supplied by the caller and passed explicitly into each component; the
/// engine never reads project information from module state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDirectory {
    projects: HashMap<String, ProjectInfo>,
}

impl ProjectDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for a project name.
    pub fn insert(&mut self, project_name: impl Into<String>, info: ProjectInfo) {
        self.projects.insert(project_name.into(), info);
    }

    /// Looks up the entry for a project name.
    pub fn get(&self, project_name: &str) -> Option<&ProjectInfo> {
        self.projects.get(project_name)
    }

    /// Returns the number of projects in the directory.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns true if the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// The derived `(company, project_code)` pair for one project name.
///
/// # Example
///
/// ```
/// use invoice_engine::models::{Classification, Company};
///
/// let classification = Classification {
///     company: Company::Pcg,
///     project_code: "100100".to_string(),
/// };
/// assert_eq!(classification.company.label(), "PCG");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The billing entity the project belongs to.
    pub company: Company,
    /// The project code, or [`NO_PROJECT_CODE`] when none could be resolved.
    pub project_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_display_labels() {
        assert_eq!(Company::Pcg.to_string(), "PCG");
        assert_eq!(Company::Pcr.to_string(), "PCR");
        assert_eq!(Company::Unassigned.to_string(), "UNASSIGNED");
    }

    #[test]
    fn test_company_ordering_matches_display_order() {
        assert!(Company::Pcg < Company::Pcr);
        assert!(Company::Pcr < Company::Unassigned);
    }

    #[test]
    fn test_company_serialization() {
        assert_eq!(serde_json::to_string(&Company::Pcg).unwrap(), "\"pcg\"");
        assert_eq!(serde_json::to_string(&Company::Pcr).unwrap(), "\"pcr\"");
        assert_eq!(
            serde_json::to_string(&Company::Unassigned).unwrap(),
            "\"unassigned\""
        );
    }

    #[test]
    fn test_directory_lookup() {
        let mut directory = ProjectDirectory::new();
        directory.insert(
            "10_Acme",
            ProjectInfo {
                project_code: Some("100100".to_string()),
                tags: vec![],
            },
        );

        assert_eq!(directory.len(), 1);
        assert!(directory.get("10_Acme").is_some());
        assert!(directory.get("unknown").is_none());
    }

    #[test]
    fn test_project_info_deserialization_defaults() {
        let info: ProjectInfo = serde_json::from_str("{}").unwrap();
        assert!(info.project_code.is_none());
        assert!(info.tags.is_empty());
    }
}
