//! # keystone-ref-mortgage
//!
//! Mortgage assistant reference handlers for the KEYSTONE action groups.
//!
//! Two tool backends, each served from mock data:
//!
//! 1. **Existing mortgage** (`get_existing_mortgage_details`): servicing
//!    details for a customer's current loan.
//! 2. **Application documents** (`get_mortgage_application_document_status`):
//!    the checklist of documents a new application still needs.
//!
//! All data is hardcoded and fictional. No external API calls are made.

pub mod handlers;
pub mod mock_data;

pub use handlers::{DocumentStatusHandler, ExistingMortgageHandler};
