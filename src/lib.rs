//! Time Allocation & Invoice Computation Engine
//!
//! This crate turns a person's raw logged-time records for a billing period into
//! a ledger split between the PCG and PCR billing entities, and renders that
//! ledger as spreadsheet cells whose monetary values stay live formulas tied to
//! a few user-editable header cells (salary, paid-time-off hours).

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
