//! Overhead redistribution functionality.
//!
//! Non-billable time (administration, paid time off, internal sales support,
//! legacy buckets needing reassignment) is collected into named pools and
//! split between the companies using the billable-hours quota. Each pool
//! produces two rows carrying a deferred `base * ratio` formula: the base is
//! a literal known at generation time, but the split must stay inspectable in
//! the generated spreadsheet, so the product is never collapsed to a number.

use rust_decimal::Decimal;

use crate::config::AllocationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AllocationFormula, Company, HoursCell, LedgerRow};

use super::quota::Quota;

/// Accumulated hour totals per configured overhead category.
#[derive(Debug, Clone)]
pub struct OverheadPools {
    totals: Vec<Decimal>,
}

impl OverheadPools {
    /// Creates zeroed pools aligned with the configured category list.
    pub fn new(config: &AllocationConfig) -> Self {
        Self {
            totals: vec![Decimal::ZERO; config.overhead.len()],
        }
    }

    /// Adds hours to the pool at a category index.
    pub fn add(&mut self, category_index: usize, hours: Decimal) {
        if let Some(total) = self.totals.get_mut(category_index) {
            *total += hours;
        }
    }

    /// Adds hours to the department-general pool, the bucket absorbing blank
    /// project time and paid time off.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] when no department-general
    /// category is configured but general overhead hours exist.
    pub fn add_general(&mut self, config: &AllocationConfig, hours: Decimal) -> EngineResult<()> {
        let index = config
            .department_general_index()
            .ok_or_else(|| EngineError::CalculationError {
                message: "no department-general overhead category configured".to_string(),
            })?;
        self.add(index, hours);
        Ok(())
    }

    /// Returns the accumulated total for a category index.
    pub fn total(&self, category_index: usize) -> Decimal {
        self.totals
            .get(category_index)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the sum over all pools.
    pub fn grand_total(&self) -> Decimal {
        self.totals.iter().copied().sum()
    }
}

/// Splits each non-empty pool between the companies using the quota.
///
/// Every pool with a positive total yields exactly two ledger rows,
/// `<label> (PCG)` and `<label> (PCR)`, each carrying a deferred
/// `base * ratio` formula with both literals quantized to the configured
/// precision. Pools with a zero total are dropped — no zero-hour rows are
/// emitted. Synthetic project codes come from the category's code rule.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::{Quota, OverheadPools, redistribute};
/// use invoice_engine::config::AllocationConfig;
/// use rust_decimal::Decimal;
///
/// let config = AllocationConfig::default();
/// let mut pools = OverheadPools::new(&config);
/// pools.add_general(&config, Decimal::new(16, 0)).unwrap();
///
/// let rows = redistribute(&config, "07", &pools, &Quota::even_split());
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].project_label, "BF07 General (PCG)");
/// assert_eq!(rows[1].project_label, "BF07 General (PCR)");
/// ```
pub fn redistribute(
    config: &AllocationConfig,
    department: &str,
    pools: &OverheadPools,
    quota: &Quota,
) -> Vec<LedgerRow> {
    let mut rows = Vec::new();

    for (index, category) in config.overhead.iter().enumerate() {
        let base = pools.total(index).round_dp(config.ratio_precision);
        if base <= Decimal::ZERO {
            continue;
        }

        let label = category.resolved_label(department);
        let (pcg_code, pcr_code) = category.codes_for(department);

        rows.push(pool_row(&label, pcg_code, Company::Pcg, base, quota));
        rows.push(pool_row(&label, pcr_code, Company::Pcr, base, quota));
    }

    rows
}

fn pool_row(
    label: &str,
    project_code: String,
    company: Company,
    base: Decimal,
    quota: &Quota,
) -> LedgerRow {
    LedgerRow {
        project_label: format!("{} ({})", label, company.label()),
        project_code,
        company,
        hours: HoursCell::Formula(AllocationFormula::new(base, quota.ratio_for(company))),
    }
}
