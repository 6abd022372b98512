//! Spreadsheet formula emission.
//!
//! This module renders the ledger into the final cell payload. Every
//! monetary cell stays a live formula referencing the shared header cells so
//! editing the salary or time-off inputs in the generated document recomputes
//! the whole chain. Numeric literals inside formula text always use a dot
//! decimal separator with trailing zeros trimmed, so the formulas parse
//! identically regardless of where the document is later opened.

use rust_decimal::Decimal;

use crate::config::HeaderCellMap;
use crate::models::{
    Company, HoursCell, InvoiceSheet, LedgerRow, RenderRow, SheetSection, SubtotalCell, TotalCell,
};

/// Renders a decimal for embedding in formula text: locale-independent dot
/// separator, trailing zeros trimmed.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::invariant_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(invariant_decimal(Decimal::new(1600, 2)), "16");
/// assert_eq!(invariant_decimal(Decimal::new(5000, 4)), "0.5");
/// ```
pub fn invariant_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Renders the content of a hours cell: a plain literal number or a deferred
/// allocation formula.
pub fn hours_cell_text(hours: &HoursCell) -> String {
    match hours {
        HoursCell::Literal(value) => invariant_decimal(*value),
        HoursCell::Formula(formula) => {
            if formula.carry.is_zero() {
                format!(
                    "={}*{}",
                    invariant_decimal(formula.base),
                    invariant_decimal(formula.ratio)
                )
            } else {
                format!(
                    "={}+{}*{}",
                    invariant_decimal(formula.carry),
                    invariant_decimal(formula.base),
                    invariant_decimal(formula.ratio)
                )
            }
        }
    }
}

/// Builds the derived header formulas `(total_days, day_rate)` against the
/// cell map, e.g. `=(B5+B6)/8` and `=B4/B7`.
pub fn header_formulas(cells: &HeaderCellMap, hours_per_day: u32) -> (String, String) {
    let total_days = format!(
        "=({}+{})/{}",
        cells.logged_hours, cells.time_off_hours, hours_per_day
    );
    let day_rate = format!("={}/{}", cells.salary, cells.total_days);
    (total_days, day_rate)
}

/// Anchors a relative cell reference, e.g. `B8` → `$B$8`.
fn absolute_cell(cell: &str) -> String {
    let split = cell
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(cell.len());
    format!("${}${}", &cell[..split], &cell[split..])
}

/// Renders the ordered ledger into the table payload for the spreadsheet
/// renderer.
///
/// Sections are emitted in company order, each as a title row, a
/// column-header row, the data rows, a subtotal row and one blank spacer
/// row. Per row: hours in column C (literal or formula verbatim), days
/// `=C<r>/<hours per day>` in D, the shared day rate in E, and cost
/// `=D<r>*E<r>` in F. Per section: subtotal `=SUM(F<first>:F<last>)`. The
/// grand total sums the section subtotal cells and is only present when at
/// least one section rendered.
pub fn emit(ledger: &[LedgerRow], cells: &HeaderCellMap, hours_per_day: u32) -> InvoiceSheet {
    let mut sheet = InvoiceSheet::default();
    let mut cursor = cells.first_table_row;
    let day_rate_ref = absolute_cell(&cells.day_rate);

    for company in [Company::Pcg, Company::Pcr, Company::Unassigned] {
        let section_rows: Vec<&LedgerRow> =
            ledger.iter().filter(|row| row.company == company).collect();
        if section_rows.is_empty() {
            continue;
        }

        let title_row = cursor;
        let header_row = cursor + 1;
        let first_data = cursor + 2;
        let last_data = first_data + section_rows.len() as u32 - 1;

        for (offset, row) in section_rows.iter().enumerate() {
            let sheet_row = first_data + offset as u32;
            sheet.rows.push(RenderRow {
                company,
                sheet_row,
                project_code: row.project_code.clone(),
                project_label: row.project_label.clone(),
                hours: hours_cell_text(&row.hours),
                days: format!("=C{sheet_row}/{hours_per_day}"),
                day_rate: format!("={day_rate_ref}"),
                cost: format!("=D{sheet_row}*E{sheet_row}"),
            });
        }

        let subtotal_row = last_data + 1;
        sheet.sections.push(SheetSection {
            company,
            title_row,
            header_row,
        });
        sheet.subtotals.push(SubtotalCell {
            company,
            sheet_row: subtotal_row,
            formula: format!("=SUM(F{first_data}:F{last_data})"),
        });

        cursor = subtotal_row + 2;
    }

    if !sheet.subtotals.is_empty() {
        let references: Vec<String> = sheet
            .subtotals
            .iter()
            .map(|subtotal| format!("F{}", subtotal.sheet_row))
            .collect();
        sheet.grand_total = Some(TotalCell {
            sheet_row: cursor,
            formula: format!("={}", references.join("+")),
        });
    }

    sheet
}
