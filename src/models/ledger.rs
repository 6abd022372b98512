//! Ledger and rendered-sheet models.
//!
//! This module contains the [`LedgerRow`] type produced by the allocation
//! pipeline and the [`InvoiceSheet`] payload handed to the (out-of-scope)
//! spreadsheet renderer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Company;

/// A deferred allocation formula: `carry + base * ratio`.
///
/// Redistributed overhead rows keep their hours symbolic so the split stays
/// inspectable and auditable in the generated spreadsheet. `base` and `ratio`
/// are quantized literals; `carry` absorbs literal hours that were merged
/// into this row and is zero for a plain pool row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationFormula {
    /// Literal hours folded into this row by the ledger builder.
    pub carry: Decimal,
    /// The pool's literal base hours.
    pub base: Decimal,
    /// The company's literal quota ratio.
    pub ratio: Decimal,
}

impl AllocationFormula {
    /// Creates a formula with no carried literal component.
    pub fn new(base: Decimal, ratio: Decimal) -> Self {
        Self {
            carry: Decimal::ZERO,
            base,
            ratio,
        }
    }

    /// Evaluates the formula to its numeric value.
    pub fn evaluated(&self) -> Decimal {
        self.carry + self.base * self.ratio
    }
}

/// The hours value of a ledger row: either a plain literal or a deferred
/// formula.
///
/// Modeled as a tagged variant so the ledger builder and formula emitter can
/// pattern-match exhaustively instead of relying on null checks. The literal
/// path is only used for straightforward billable aggregation; redistributed
/// overhead always carries a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursCell {
    /// Hours known at generation time.
    Literal(Decimal),
    /// Hours kept symbolic as `carry + base * ratio`.
    Formula(AllocationFormula),
}

impl HoursCell {
    /// Evaluates the cell to its numeric value.
    ///
    /// # Examples
    ///
    /// ```
    /// use invoice_engine::models::{AllocationFormula, HoursCell};
    /// use rust_decimal::Decimal;
    ///
    /// let formula = HoursCell::Formula(AllocationFormula::new(
    ///     Decimal::new(16, 0),
    ///     Decimal::new(5, 1),
    /// ));
    /// assert_eq!(formula.evaluated(), Decimal::new(8, 0));
    /// ```
    pub fn evaluated(&self) -> Decimal {
        match self {
            HoursCell::Literal(value) => *value,
            HoursCell::Formula(formula) => formula.evaluated(),
        }
    }
}

/// One output line of the allocation ledger.
///
/// Rows sharing the `(project_label, project_code, company)` key are merged
/// into a single row by the ledger builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// The display label, e.g. `"10_Acme"` or `"BF07 General (PCG)"`.
    pub project_label: String,
    /// The project code, possibly synthetic for overhead rows.
    pub project_code: String,
    /// The billing entity this row is attributed to.
    pub company: Company,
    /// The hours value, literal or deferred.
    pub hours: HoursCell,
}

impl LedgerRow {
    /// Returns the grouping key for merging rows.
    pub fn key(&self) -> (String, String, Company) {
        (
            self.project_label.clone(),
            self.project_code.clone(),
            self.company,
        )
    }
}

/// One rendered invoice line, pre-split into the six display columns.
///
/// Every formula column references cells by the documented addressing
/// contract: hours in column C, days in D, day rate in E, costs in F.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRow {
    /// The billing entity whose section this row belongs to.
    pub company: Company,
    /// The absolute sheet row this line lands on (1-based).
    pub sheet_row: u32,
    /// Column A: the project code.
    pub project_code: String,
    /// Column B: the project label.
    pub project_label: String,
    /// Column C: the hours cell content, a plain number or `=` formula.
    pub hours: String,
    /// Column D: the days formula, e.g. `=C12/8`.
    pub days: String,
    /// Column E: the day-rate formula referencing the shared header cell.
    pub day_rate: String,
    /// Column F: the cost formula, e.g. `=D12*E12`.
    pub cost: String,
}

/// A per-section subtotal cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtotalCell {
    /// The section's billing entity.
    pub company: Company,
    /// The sheet row the subtotal lands on.
    pub sheet_row: u32,
    /// The subtotal formula, e.g. `=SUM(F12:F15)`.
    pub formula: String,
}

/// The grand-total cell summing all section subtotals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCell {
    /// The sheet row the grand total lands on.
    pub sheet_row: u32,
    /// The grand-total formula, e.g. `=F16+F22`.
    pub formula: String,
}

/// Layout anchor for one rendered section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSection {
    /// The section's billing entity.
    pub company: Company,
    /// The sheet row carrying the section title.
    pub title_row: u32,
    /// The sheet row carrying the column headers.
    pub header_row: u32,
}

/// The rendered invoice table payload consumed by the spreadsheet renderer.
///
/// Rows are ordered and grouped by company; subtotal and grand-total anchors
/// tell the renderer where to place the literal "Subtotal:"/"Grand Total:"
/// labels next to the formula cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSheet {
    /// Section layout anchors, in render order.
    pub sections: Vec<SheetSection>,
    /// All rendered project rows, in render order.
    pub rows: Vec<RenderRow>,
    /// One subtotal per rendered section.
    pub subtotals: Vec<SubtotalCell>,
    /// The grand total; absent when the ledger is empty.
    pub grand_total: Option<TotalCell>,
}

impl InvoiceSheet {
    /// Returns the subtotal cell for a company's section, if that section
    /// was rendered.
    pub fn subtotal_for(&self, company: Company) -> Option<&SubtotalCell> {
        self.subtotals.iter().find(|cell| cell.company == company)
    }
}
