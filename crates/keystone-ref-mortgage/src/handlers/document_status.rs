//! Mortgage-application action group: `get_mortgage_application_document_status`.

use async_trait::async_trait;
use tracing::{debug, warn};

use keystone_contracts::{
    error::{ToolError, ToolResult},
    event::ActionGroupEvent,
    response::ResponseEnvelope,
};
use keystone_core::{
    envelope::{populate_function_response, require_parameter},
    traits::ActionHandler,
};

use super::CUSTOMER_ID_PARAM;
use crate::mock_data::get_mortgage_application_document_status;

pub const GET_DOCUMENT_STATUS: &str = "get_mortgage_application_document_status";

/// Serves the application document checklist from mock origination data.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentStatusHandler;

#[async_trait]
impl ActionHandler for DocumentStatusHandler {
    fn name(&self) -> &str {
        "document-status"
    }

    async fn handle(&self, event: &ActionGroupEvent) -> ToolResult<ResponseEnvelope> {
        if event.function != GET_DOCUMENT_STATUS {
            warn!(function = %event.function, "unrecognized function");
            return Err(ToolError::UnrecognizedFunction {
                function: event.function.clone(),
            });
        }

        let customer_id = require_parameter(event, CUSTOMER_ID_PARAM)?;
        let checklist = get_mortgage_application_document_status(customer_id);
        debug!(
            customer_id = %customer_id,
            outstanding = checklist.outstanding().count(),
            "document checklist assembled"
        );
        Ok(populate_function_response(event, &checklist))
    }
}
