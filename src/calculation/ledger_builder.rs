//! Ledger assembly functionality.
//!
//! This module merges classified billable rows and redistributed overhead
//! rows into one table keyed by `(project_label, project_code, company)`,
//! then orders it deterministically for rendering.

use std::collections::HashMap;

use crate::models::{Company, HoursCell, LedgerRow};

/// Merges billable and redistributed rows into the final ordered ledger.
///
/// Rows sharing the `(project_label, project_code, company)` key collapse
/// into one row. Literal hours sum; when a literal collides with a formula
/// row the literal lands in the formula's `carry` addend, so the formula
/// representation dominates without losing the contribution. Two formulas on
/// the same key keep the first one — formula strings are never added
/// together textually.
///
/// The output order is deterministic for reproducible rendering: PCG rows
/// before PCR rows before unassigned rows; within a company, "General"
/// overhead rows sort last; otherwise by project code, then label.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::build_ledger;
/// use invoice_engine::models::{Company, HoursCell, LedgerRow};
/// use rust_decimal::Decimal;
///
/// let row = |hours: i64| LedgerRow {
///     project_label: "10_Acme".to_string(),
///     project_code: "100100".to_string(),
///     company: Company::Pcg,
///     hours: HoursCell::Literal(Decimal::new(hours, 0)),
/// };
///
/// let ledger = build_ledger(vec![row(8), row(32)], vec![]);
/// assert_eq!(ledger.len(), 1);
/// assert_eq!(ledger[0].hours.evaluated(), Decimal::new(40, 0));
/// ```
pub fn build_ledger(
    billable_rows: Vec<LedgerRow>,
    redistributed_rows: Vec<LedgerRow>,
) -> Vec<LedgerRow> {
    let mut rows: Vec<LedgerRow> = Vec::new();
    let mut index: HashMap<(String, String, Company), usize> = HashMap::new();

    for row in billable_rows.into_iter().chain(redistributed_rows) {
        match index.get(&row.key()) {
            Some(&at) => {
                let merged = merge_hours(rows[at].hours.clone(), row.hours);
                rows[at].hours = merged;
            }
            None => {
                index.insert(row.key(), rows.len());
                rows.push(row);
            }
        }
    }

    rows.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    rows
}

/// Merge rule for two hours values on the same ledger key.
fn merge_hours(current: HoursCell, incoming: HoursCell) -> HoursCell {
    match (current, incoming) {
        (HoursCell::Literal(a), HoursCell::Literal(b)) => HoursCell::Literal(a + b),
        (HoursCell::Literal(a), HoursCell::Formula(mut formula)) => {
            formula.carry += a;
            HoursCell::Formula(formula)
        }
        (HoursCell::Formula(mut formula), HoursCell::Literal(b)) => {
            formula.carry += b;
            HoursCell::Formula(formula)
        }
        // Same-key pools cannot arise twice; the first formula wins.
        (HoursCell::Formula(formula), HoursCell::Formula(_)) => HoursCell::Formula(formula),
    }
}

/// Returns true for labels matching the "General" overhead pattern.
fn is_general_overhead(label: &str) -> bool {
    label.contains("General")
}

fn sort_key(row: &LedgerRow) -> (Company, bool, String, String) {
    (
        row.company,
        is_general_overhead(&row.project_label),
        row.project_code.clone(),
        row.project_label.clone(),
    )
}
