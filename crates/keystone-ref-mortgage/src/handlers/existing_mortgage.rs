//! Existing-mortgage action group: `get_existing_mortgage_details`.

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
use crate::mock_data::get_existing_mortgage_details;

pub const GET_EXISTING_MORTGAGE_DETAILS: &str = "get_existing_mortgage_details";

/// Serves mortgage account details from the mock servicing data.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExistingMortgageHandler;

#[async_trait]
impl ActionHandler for ExistingMortgageHandler {
    fn name(&self) -> &str {
        "existing-mortgage"
    }

    async fn handle(&self, event: &ActionGroupEvent) -> ToolResult<ResponseEnvelope> {
        match event.function.as_str() {
            GET_EXISTING_MORTGAGE_DETAILS => {
                let customer_id = require_parameter(event, CUSTOMER_ID_PARAM)?;
                debug!(customer_id = %customer_id, "looking up mortgage details");
                let details = get_existing_mortgage_details(customer_id);
                Ok(populate_function_response(event, &details))
            }
            other => {
                warn!(function = %other, "unrecognized function");
                Err(ToolError::UnrecognizedFunction {
                    function: other.to_string(),
                })
            }
        }
    }
}
