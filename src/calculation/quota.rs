//! Quota calculation functionality.
//!
//! The quota is each company's share of total billable hours. It is computed
//! once per invoice run, from classified billable rows only — overhead hours
//! never feed back into the ratios.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Company, LedgerRow};

/// The pair of ratios shared overhead is split by.
///
/// Both ratios are quantized so the formula text they are embedded in is
/// stable and independent of floating-point representation, and they sum to
/// exactly one by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    /// PCG's share of billable hours.
    pub pcg_ratio: Decimal,
    /// PCR's share of billable hours.
    pub pcr_ratio: Decimal,
}

impl Quota {
    /// The documented fallback when no billable hours exist: a 50/50 split.
    pub fn even_split() -> Self {
        Self {
            pcg_ratio: Decimal::new(5, 1),
            pcr_ratio: Decimal::new(5, 1),
        }
    }

    /// Returns the ratio for one company. Unassigned has no share.
    pub fn ratio_for(&self, company: Company) -> Decimal {
        match company {
            Company::Pcg => self.pcg_ratio,
            Company::Pcr => self.pcr_ratio,
            Company::Unassigned => Decimal::ZERO,
        }
    }
}

/// Computes the billable-hours quota from classified billable rows.
///
/// Rows whose company is unassigned are excluded from the denominator; their
/// hours stay visible in the unassigned ledger bucket instead. When the
/// billable total is zero the documented `(0.5, 0.5)` fallback applies —
/// this is never an error.
///
/// The PCG ratio is quantized to `precision` fractional digits and the PCR
/// ratio is derived as its complement, so `pcg_ratio + pcr_ratio == 1`
/// holds exactly after quantization.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::compute_quota;
/// use invoice_engine::models::{Company, HoursCell, LedgerRow};
/// use rust_decimal::Decimal;
///
/// let rows = vec![
///     LedgerRow {
///         project_label: "10_Acme".to_string(),
///         project_code: "100100".to_string(),
///         company: Company::Pcg,
///         hours: HoursCell::Literal(Decimal::new(30, 0)),
///     },
///     LedgerRow {
///         project_label: "20_Globex".to_string(),
///         project_code: "200300".to_string(),
///         company: Company::Pcr,
///         hours: HoursCell::Literal(Decimal::new(10, 0)),
///     },
/// ];
///
/// let quota = compute_quota(&rows, 4);
/// assert_eq!(quota.pcg_ratio, Decimal::new(75, 2));
/// assert_eq!(quota.pcr_ratio, Decimal::new(25, 2));
/// ```
pub fn compute_quota(billable_rows: &[LedgerRow], precision: u32) -> Quota {
    let mut pcg_sum = Decimal::ZERO;
    let mut pcr_sum = Decimal::ZERO;

    for row in billable_rows {
        match row.company {
            Company::Pcg => pcg_sum += row.hours.evaluated(),
            Company::Pcr => pcr_sum += row.hours.evaluated(),
            Company::Unassigned => {}
        }
    }

    let total = pcg_sum + pcr_sum;
    if total.is_zero() {
        return Quota::even_split();
    }

    let pcg_ratio = (pcg_sum / total).round_dp(precision);
    Quota {
        pcg_ratio,
        pcr_ratio: Decimal::ONE - pcg_ratio,
    }
}
