//! Project classification functionality.
//!
//! This module determines which billing entity a project belongs to, based on
//! the project directory supplied by the caller.

use crate::models::{Classification, Company, NO_PROJECT_CODE, ProjectDirectory};

/// Classifies a project name into a `(company, project_code)` pair.
///
/// The lookup is resolved with the following priority:
/// 1. An explicit digit code in the directory: a `"1"` prefix means PCG and a
///    `"2"` prefix means PCR. The code is kept either way.
/// 2. Directory tags containing `"PCG"` or `"PCR"` (case-insensitive). PCG is
///    tested first, so a project tagged with both resolves to PCG — a defined
///    tie-break, not an error.
/// 3. Otherwise the project is unassigned with the sentinel code
///    `"no project code"`.
///
/// This is a total function: unknown projects are never an error, they land
/// in the unassigned bucket so no hours are dropped.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::classify;
/// use invoice_engine::models::{Company, ProjectDirectory, ProjectInfo};
///
/// let mut directory = ProjectDirectory::new();
/// directory.insert("10_Acme", ProjectInfo {
///     project_code: Some("100100".to_string()),
///     tags: vec![],
/// });
///
/// let classification = classify("10_Acme", &directory);
/// assert_eq!(classification.company, Company::Pcg);
/// assert_eq!(classification.project_code, "100100");
/// ```
pub fn classify(project_name: &str, directory: &ProjectDirectory) -> Classification {
    let info = directory.get(project_name);

    if let Some(code) = info.and_then(|i| i.project_code.as_deref()) {
        let code = code.trim();
        if !code.is_empty() {
            let company = match company_from_code(code) {
                Company::Unassigned => company_from_tags(info).unwrap_or(Company::Unassigned),
                resolved => resolved,
            };
            return Classification {
                company,
                project_code: code.to_string(),
            };
        }
    }

    if let Some(company) = company_from_tags(info) {
        return Classification {
            company,
            project_code: NO_PROJECT_CODE.to_string(),
        };
    }

    Classification {
        company: Company::Unassigned,
        project_code: NO_PROJECT_CODE.to_string(),
    }
}

/// Maps a project code to its company by prefix digit.
fn company_from_code(code: &str) -> Company {
    if code.starts_with('1') {
        Company::Pcg
    } else if code.starts_with('2') {
        Company::Pcr
    } else {
        Company::Unassigned
    }
}

/// Inspects directory tags for a company marker. PCG wins over PCR.
fn company_from_tags(info: Option<&crate::models::ProjectInfo>) -> Option<Company> {
    let tags = &info?.tags;
    if tags.iter().any(|tag| tag.to_uppercase().contains("PCG")) {
        return Some(Company::Pcg);
    }
    if tags.iter().any(|tag| tag.to_uppercase().contains("PCR")) {
        return Some(Company::Pcr);
    }
    None
}
