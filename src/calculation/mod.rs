//! Calculation logic for the invoice computation engine.
//!
//! This module contains the allocation pipeline: project classification,
//! quota calculation, overhead redistribution, ledger assembly, formula
//! emission and the orchestrating invoice generation entry point.

mod classifier;
mod engine;
mod formula;
mod ledger_builder;
mod quota;
mod redistribution;

pub use classifier::classify;
pub use engine::{InvoiceInput, InvoiceResult, generate_invoice};
pub use formula::{emit, header_formulas, hours_cell_text, invariant_decimal};
pub use ledger_builder::build_ledger;
pub use quota::{Quota, compute_quota};
pub use redistribution::{OverheadPools, redistribute};
