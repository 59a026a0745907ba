//! Action-group handlers for the mortgage assistant.
//!
//! Each handler answers exactly one function name and requires a non-empty
//! `customer_id`. Any other function name is an `UnrecognizedFunction` error.

pub mod document_status;
pub mod existing_mortgage;

pub use document_status::DocumentStatusHandler;
pub use existing_mortgage::ExistingMortgageHandler;

/// Parameter naming the customer whose records are requested.
pub const CUSTOMER_ID_PARAM: &str = "customer_id";
