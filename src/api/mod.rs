//! HTTP API module for the invoice computation engine.
//!
//! This module provides the REST API endpoint for generating an invoice
//! ledger from already-parsed timesheet records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{InvoiceRequest, ProjectRequest, TimeEntryRequest};
pub use response::{ApiError, InvoiceResponse};
pub use state::AppState;
