//! Invoice generation orchestration.
//!
//! This module wires the allocation pipeline together: partition the raw
//! entries, classify billable time, derive the quota, redistribute overhead
//! pools, assemble the ledger and render the sheet. The whole run is a pure,
//! synchronous transformation of its inputs; nothing outlives one invocation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AllocationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Company, HoursCell, InvoiceHeader, InvoiceSheet, LedgerRow, ProjectDirectory, ReportMeta,
    TimeEntry,
};

use super::classifier::classify;
use super::formula::{emit, header_formulas};
use super::ledger_builder::build_ledger;
use super::quota::compute_quota;
use super::redistribution::{OverheadPools, redistribute};

/// Everything one invoice run consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceInput {
    /// Whose time the invoice covers, and for which period.
    pub meta: ReportMeta,
    /// Monthly salary; stays user-editable in the generated document.
    pub monthly_salary: Decimal,
    /// The raw logged-time records.
    pub entries: Vec<TimeEntry>,
    /// The project code/tag lookup.
    pub directory: ProjectDirectory,
}

/// The complete result of one invoice run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the invoice was generated.
    pub generated_at: DateTime<Utc>,
    /// The header scalars.
    pub header: InvoiceHeader,
    /// The ordered allocation ledger the sheet was rendered from.
    pub ledger: Vec<LedgerRow>,
    /// The rendered table payload for the spreadsheet renderer.
    pub sheet: InvoiceSheet,
    /// Compensatory-overtime hours excluded from the paid-time-off total.
    pub excluded_compensatory_hours: Decimal,
}

/// Generates the invoice ledger and header for one person and period.
///
/// Control flow: classify billable rows, derive the quota from them,
/// redistribute overhead pools with that quota, merge everything into the
/// ledger and render the sheet. Every input hour ends up in exactly one
/// output row or in the explicit compensatory-overtime exclusion; rows that
/// cannot be classified are kept under the unassigned bucket rather than
/// dropped.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRecord`] for negative hour values and
/// [`EngineError::CalculationError`] when overhead hours exist but no
/// department-general category is configured.
pub fn generate_invoice(
    input: &InvoiceInput,
    config: &AllocationConfig,
) -> EngineResult<InvoiceResult> {
    info!(
        person = %input.meta.person_name,
        period = %input.meta.period.label(),
        entries = input.entries.len(),
        "generating invoice"
    );

    validate_entries(&input.entries)?;

    // Partition: billable candidates vs overhead pools, tracking the header
    // totals and the explicit compensatory exclusion along the way.
    let mut pools = OverheadPools::new(config);
    let mut billable: Vec<LedgerRow> = Vec::new();
    let mut logged_total = Decimal::ZERO;
    let mut time_off_total = Decimal::ZERO;
    let mut excluded_compensatory = Decimal::ZERO;

    for entry in &input.entries {
        logged_total += entry.logged_hours;

        if entry.reason_matches(&config.compensatory_reasons) {
            excluded_compensatory += entry.time_off_hours;
        } else {
            time_off_total += entry.time_off_hours;
        }
        time_off_total += entry.holiday_hours;

        if entry.logged_hours.is_zero() {
            continue;
        }

        if !entry.has_project() {
            pools.add_general(config, entry.logged_hours)?;
        } else if let Some(category) = config.category_for(&entry.project_name) {
            pools.add(category, entry.logged_hours);
        } else {
            let classification = classify(&entry.project_name, &input.directory);
            billable.push(LedgerRow {
                project_label: entry.project_name.clone(),
                project_code: classification.project_code,
                company: classification.company,
                hours: HoursCell::Literal(entry.logged_hours),
            });
        }
    }

    // Paid time off is absorbed by the department's general bucket.
    if time_off_total > Decimal::ZERO {
        pools.add_general(config, time_off_total)?;
    }

    let unassigned = billable
        .iter()
        .filter(|row| row.company == Company::Unassigned)
        .count();
    if unassigned > 0 {
        warn!(
            rows = unassigned,
            "projects could not be classified; keeping them in the unassigned bucket"
        );
    }

    let quota = compute_quota(&billable, config.ratio_precision);
    info!(
        pcg_ratio = %quota.pcg_ratio,
        pcr_ratio = %quota.pcr_ratio,
        overhead_hours = %pools.grand_total(),
        "computed allocation quota"
    );

    let redistributed = redistribute(config, &input.meta.department, &pools, &quota);
    let ledger = build_ledger(billable, redistributed);
    let sheet = emit(&ledger, &config.cells, config.hours_per_day);

    let (total_days, day_rate) = header_formulas(&config.cells, config.hours_per_day);
    let header = InvoiceHeader {
        person_name: input.meta.person_name.clone(),
        department: input.meta.department.clone(),
        period_label: input.meta.period.label(),
        monthly_salary: input.monthly_salary,
        total_logged_hours: logged_total,
        time_off_hours: time_off_total,
        total_days,
        day_rate,
    };

    Ok(InvoiceResult {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        header,
        ledger,
        sheet,
        excluded_compensatory_hours: excluded_compensatory,
    })
}

/// Rejects structurally invalid entries before any computation starts.
fn validate_entries(entries: &[TimeEntry]) -> EngineResult<()> {
    for (index, entry) in entries.iter().enumerate() {
        for (field, value) in [
            ("logged_hours", entry.logged_hours),
            ("time_off_hours", entry.time_off_hours),
            ("holiday_hours", entry.holiday_hours),
        ] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidRecord {
                    row: index + 1,
                    message: format!("negative {field}: {value}"),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingPeriod, ProjectInfo};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn meta(department: &str) -> ReportMeta {
        ReportMeta {
            person_name: "Jane Doe".to_string(),
            department: department.to_string(),
            period: BillingPeriod::parse("2026-01").unwrap(),
        }
    }

    fn entry(project: &str, logged: &str) -> TimeEntry {
        TimeEntry {
            project_name: project.to_string(),
            logged_hours: dec(logged),
            time_off_hours: Decimal::ZERO,
            holiday_hours: Decimal::ZERO,
            time_off_reason: None,
        }
    }

    fn time_off(hours: &str, reason: Option<&str>) -> TimeEntry {
        TimeEntry {
            project_name: String::new(),
            logged_hours: Decimal::ZERO,
            time_off_hours: dec(hours),
            holiday_hours: Decimal::ZERO,
            time_off_reason: reason.map(String::from),
        }
    }

    fn directory() -> ProjectDirectory {
        let mut directory = ProjectDirectory::new();
        directory.insert(
            "10_Acme",
            ProjectInfo {
                project_code: Some("100100".to_string()),
                tags: vec![],
            },
        );
        directory.insert(
            "20_Globex",
            ProjectInfo {
                project_code: Some("200300".to_string()),
                tags: vec![],
            },
        );
        directory
    }

    fn input(department: &str, entries: Vec<TimeEntry>) -> InvoiceInput {
        InvoiceInput {
            meta: meta(department),
            monthly_salary: dec("5000"),
            entries,
            directory: directory(),
        }
    }

    /// Scenario A: one billable PCG project, no overhead
    #[test]
    fn test_single_billable_project() {
        let result = generate_invoice(
            &input("07", vec![entry("10_Acme", "40")]),
            &AllocationConfig::default(),
        )
        .unwrap();

        assert_eq!(result.ledger.len(), 1);
        let row = &result.ledger[0];
        assert_eq!(row.company, Company::Pcg);
        assert_eq!(row.project_code, "100100");
        assert_eq!(row.hours, HoursCell::Literal(dec("40")));

        let rendered = &result.sheet.rows[0];
        assert_eq!(rendered.hours, "40");
        assert_eq!(rendered.days, "=C12/8");
        assert_eq!(rendered.day_rate, "=$B$8");
        assert_eq!(rendered.cost, "=D12*E12");
    }

    /// Scenario B: zero billable hours fall back to a 50/50 split
    #[test]
    fn test_admin_only_falls_back_to_even_split() {
        let result = generate_invoice(
            &input("07", vec![entry("Administration", "16")]),
            &AllocationConfig::default(),
        )
        .unwrap();

        assert_eq!(result.ledger.len(), 2);
        assert_eq!(result.ledger[0].project_label, "BF07 General (PCG)");
        assert_eq!(result.ledger[1].project_label, "BF07 General (PCR)");
        assert_eq!(result.sheet.rows[0].hours, "=16*0.5");
        assert_eq!(result.sheet.rows[1].hours, "=16*0.5");
    }

    /// Scenario C: unknown projects stay visible in the unassigned bucket
    #[test]
    fn test_unknown_project_kept_unassigned() {
        let result = generate_invoice(
            &input("07", vec![entry("Mystery", "5")]),
            &AllocationConfig::default(),
        )
        .unwrap();

        let row = &result.ledger[0];
        assert_eq!(row.company, Company::Unassigned);
        assert_eq!(row.project_code, "no project code");
        assert_eq!(row.hours.evaluated(), dec("5"));
    }

    /// Scenario D: compensatory overtime is excluded from paid time off
    #[test]
    fn test_compensatory_time_off_excluded() {
        let result = generate_invoice(
            &input(
                "07",
                vec![
                    entry("10_Acme", "40"),
                    time_off("10", Some("Ausgleich für zusätzliche Arbeitszeit")),
                    time_off("8", Some("Vacation")),
                ],
            ),
            &AllocationConfig::default(),
        )
        .unwrap();

        assert_eq!(result.excluded_compensatory_hours, dec("10"));
        assert_eq!(result.header.time_off_hours, dec("8"));

        let ledger_total: Decimal = result.ledger.iter().map(|r| r.hours.evaluated()).sum();
        assert_eq!(ledger_total, dec("48"));
    }

    #[test]
    fn test_quota_follows_billable_share() {
        let result = generate_invoice(
            &input(
                "07",
                vec![
                    entry("10_Acme", "30"),
                    entry("20_Globex", "10"),
                    entry("Administration", "8"),
                ],
            ),
            &AllocationConfig::default(),
        )
        .unwrap();

        let general_pcg = result
            .ledger
            .iter()
            .find(|row| row.project_label == "BF07 General (PCG)")
            .unwrap();
        match &general_pcg.hours {
            HoursCell::Formula(f) => {
                assert_eq!(f.base, dec("8"));
                assert_eq!(f.ratio, dec("0.75"));
            }
            other => panic!("Expected formula hours, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_project_time_lands_in_general_pool() {
        let result = generate_invoice(
            &input("03", vec![entry("10_Acme", "8"), entry("", "4")]),
            &AllocationConfig::default(),
        )
        .unwrap();

        let general_total: Decimal = result
            .ledger
            .iter()
            .filter(|row| row.project_label.contains("General"))
            .map(|row| row.hours.evaluated())
            .sum();
        assert_eq!(general_total, dec("4"));
        assert_eq!(
            result
                .ledger
                .iter()
                .find(|row| row.project_label.contains("General"))
                .unwrap()
                .project_code,
            "103000"
        );
    }

    #[test]
    fn test_holiday_hours_count_as_paid_time_off() {
        let mut holiday = time_off("0", None);
        holiday.holiday_hours = dec("8");

        let result = generate_invoice(
            &input("07", vec![entry("10_Acme", "16"), holiday]),
            &AllocationConfig::default(),
        )
        .unwrap();

        assert_eq!(result.header.time_off_hours, dec("8"));
        let ledger_total: Decimal = result.ledger.iter().map(|r| r.hours.evaluated()).sum();
        assert_eq!(ledger_total, dec("24"));
    }

    #[test]
    fn test_negative_hours_rejected() {
        let result = generate_invoice(
            &input("07", vec![entry("10_Acme", "-1")]),
            &AllocationConfig::default(),
        );

        match result {
            Err(EngineError::InvalidRecord { row, message }) => {
                assert_eq!(row, 1);
                assert!(message.contains("logged_hours"));
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_header_totals_and_formulas() {
        let result = generate_invoice(
            &input(
                "07",
                vec![entry("10_Acme", "40"), time_off("8", Some("Vacation"))],
            ),
            &AllocationConfig::default(),
        )
        .unwrap();

        let header = &result.header;
        assert_eq!(header.person_name, "Jane Doe");
        assert_eq!(header.period_label, "January 2026");
        assert_eq!(header.total_logged_hours, dec("40"));
        assert_eq!(header.time_off_hours, dec("8"));
        assert_eq!(header.total_days, "=(B5+B6)/8");
        assert_eq!(header.day_rate, "=B4/B7");
    }

    #[test]
    fn test_runs_are_idempotent_apart_from_run_metadata() {
        let invoice_input = input(
            "07",
            vec![
                entry("10_Acme", "30"),
                entry("20_Globex", "10"),
                entry("Administration", "8"),
                time_off("8", Some("Vacation")),
            ],
        );
        let config = AllocationConfig::default();

        let first = generate_invoice(&invoice_input, &config).unwrap();
        let second = generate_invoice(&invoice_input, &config).unwrap();

        assert_eq!(first.ledger, second.ledger);
        assert_eq!(first.sheet, second.sheet);
        assert_eq!(first.header, second.header);
    }

    fn arbitrary_entry() -> impl Strategy<Value = TimeEntry> {
        let projects = prop_oneof![
            Just("10_Acme".to_string()),
            Just("20_Globex".to_string()),
            Just("Administration".to_string()),
            Just("Mystery".to_string()),
            Just(String::new()),
        ];
        let reasons = prop_oneof![
            Just(None),
            Just(Some("Vacation".to_string())),
            Just(Some("Ausgleich für zusätzliche Arbeitszeit".to_string())),
        ];

        (projects, 0u32..10_000, 0u32..10_000, 0u32..10_000, reasons).prop_map(
            |(project_name, logged, time_off, holiday, time_off_reason)| TimeEntry {
                project_name,
                logged_hours: Decimal::new(logged as i64, 2),
                time_off_hours: Decimal::new(time_off as i64, 2),
                holiday_hours: Decimal::new(holiday as i64, 2),
                time_off_reason,
            },
        )
    }

    proptest! {
        /// Conservation: every input hour appears in exactly one output row
        /// or in the explicit compensatory exclusion.
        #[test]
        fn prop_hours_are_conserved(entries in proptest::collection::vec(arbitrary_entry(), 0..24)) {
            let invoice_input = input("07", entries.clone());
            let result = generate_invoice(&invoice_input, &AllocationConfig::default()).unwrap();

            let input_total: Decimal = entries.iter().map(|e| e.total_hours()).sum();
            let output_total: Decimal =
                result.ledger.iter().map(|row| row.hours.evaluated()).sum();

            prop_assert_eq!(
                output_total + result.excluded_compensatory_hours,
                input_total
            );
        }

        /// No ledger row ever carries negative hours.
        #[test]
        fn prop_no_negative_output_hours(entries in proptest::collection::vec(arbitrary_entry(), 0..24)) {
            let invoice_input = input("07", entries);
            let result = generate_invoice(&invoice_input, &AllocationConfig::default()).unwrap();

            for row in &result.ledger {
                prop_assert!(row.hours.evaluated() >= Decimal::ZERO);
            }
        }
    }
}
