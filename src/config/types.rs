//! Configuration types for the allocation engine.
//!
//! The overhead-category list replaces per-version hard-coded branch lists:
//! each category declares its label, the keywords that route logged time into
//! its pool, and the rule producing its synthetic project codes. New overhead
//! categories are a configuration change, not a code change.

use serde::{Deserialize, Serialize};

/// Rule producing the synthetic PCG/PCR project code pair for a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CodeRule {
    /// The department's general bucket: `"1" + <dept, zero-padded to 2> +
    /// "000"` for PCG and the same with a `"2"` prefix for PCR.
    DepartmentGeneral,
    /// Fixed per-company codes.
    Fixed {
        /// The PCG-side project code.
        pcg: String,
        /// The PCR-side project code.
        pcr: String,
    },
}

/// One declarative overhead category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverheadCategory {
    /// Pool label; a `{dept}` placeholder is replaced with the zero-padded
    /// department number (e.g. `"BF{dept} General"` becomes `"BF07 General"`).
    pub label: String,
    /// Case-insensitive keywords matched against project names to route
    /// logged hours into this pool.
    pub keywords: Vec<String>,
    /// The synthetic project-code rule for this pool.
    pub codes: CodeRule,
}

impl OverheadCategory {
    /// Returns the pool label with the `{dept}` placeholder resolved.
    pub fn resolved_label(&self, department: &str) -> String {
        self.label.replace("{dept}", &zero_pad_department(department))
    }

    /// Returns the `(pcg_code, pcr_code)` pair for this pool.
    pub fn codes_for(&self, department: &str) -> (String, String) {
        match &self.codes {
            CodeRule::DepartmentGeneral => {
                let dept = zero_pad_department(department);
                (format!("1{dept}000"), format!("2{dept}000"))
            }
            CodeRule::Fixed { pcg, pcr } => (pcg.clone(), pcr.clone()),
        }
    }

    /// Returns true if the project name matches one of this category's
    /// keywords (case-insensitive substring match).
    pub fn matches(&self, project_name: &str) -> bool {
        let name = project_name.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| name.contains(&keyword.to_lowercase()))
    }
}

/// Pads a department number to at least two digits, e.g. `"7"` → `"07"`.
fn zero_pad_department(department: &str) -> String {
    let trimmed = department.trim();
    if trimmed.len() >= 2 {
        trimmed.to_string()
    } else {
        format!("{trimmed:0>2}")
    }
}

/// The header cells and table origin the formula emitter writes against.
///
/// Every emitted formula references these addresses, never hard-coded ones,
/// so the cell-addressing contract lives in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderCellMap {
    /// The monthly-salary cell (user-editable).
    pub salary: String,
    /// The total-logged-hours cell (literal).
    pub logged_hours: String,
    /// The paid-time-off-hours cell (literal).
    pub time_off_hours: String,
    /// The derived total-days cell.
    pub total_days: String,
    /// The shared day-rate cell every cost row references.
    pub day_rate: String,
    /// The sheet row the first section title lands on.
    pub first_table_row: u32,
}

impl Default for HeaderCellMap {
    fn default() -> Self {
        Self {
            salary: "B4".to_string(),
            logged_hours: "B5".to_string(),
            time_off_hours: "B6".to_string(),
            total_days: "B7".to_string(),
            day_rate: "B8".to_string(),
            first_table_row: 10,
        }
    }
}

/// The complete allocation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Hours per working day used for the days conversion.
    pub hours_per_day: u32,
    /// Fractional digits quota ratios are quantized to before they are
    /// embedded in formula text.
    pub ratio_precision: u32,
    /// Time-off reason keywords flagging compensatory overtime; matching
    /// hours are excluded from the paid-time-off total.
    pub compensatory_reasons: Vec<String>,
    /// Declarative overhead categories, in pool-output order. Blank project
    /// names and paid time off fall into the department-general category.
    pub overhead: Vec<OverheadCategory>,
    /// The header cell-addressing contract.
    pub cells: HeaderCellMap,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            hours_per_day: 8,
            ratio_precision: 4,
            compensatory_reasons: vec![
                "ausgleich für zusätzliche arbeitszeit".to_string(),
                "compensatory overtime".to_string(),
            ],
            overhead: vec![
                OverheadCategory {
                    label: "BF{dept} General".to_string(),
                    keywords: vec!["administration".to_string(), "admin".to_string()],
                    codes: CodeRule::DepartmentGeneral,
                },
                OverheadCategory {
                    label: "People & Culture".to_string(),
                    keywords: vec![
                        "people & culture".to_string(),
                        "people and culture".to_string(),
                    ],
                    codes: CodeRule::Fixed {
                        pcg: "100900".to_string(),
                        pcr: "200900".to_string(),
                    },
                },
                OverheadCategory {
                    label: "Sales".to_string(),
                    keywords: vec!["sales".to_string()],
                    codes: CodeRule::Fixed {
                        pcg: "100800".to_string(),
                        pcr: "200800".to_string(),
                    },
                },
            ],
            cells: HeaderCellMap::default(),
        }
    }
}

impl AllocationConfig {
    /// Returns the index of the department-general category, the pool that
    /// absorbs blank-project time and paid time off.
    pub fn department_general_index(&self) -> Option<usize> {
        self.overhead
            .iter()
            .position(|category| category.codes == CodeRule::DepartmentGeneral)
    }

    /// Returns the index of the overhead category a project name routes to,
    /// if any.
    pub fn category_for(&self, project_name: &str) -> Option<usize> {
        self.overhead
            .iter()
            .position(|category| category.matches(project_name))
    }
}
