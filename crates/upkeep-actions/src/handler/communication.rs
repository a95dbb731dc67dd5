//! Communication handlers.

use async_trait::async_trait;
use tracing::info;

use crate::error::HandlerError;
use crate::handler::{require_str_param, ActionHandler};
use crate::types::{ActionContext, ActionOutcome};

/// Sends a status message to the requester of a work order.
pub struct NotifyRequesterHandler;

#[async_trait]
impl ActionHandler for NotifyRequesterHandler {
    async fn run(
        &self,
        ctx: &ActionContext,
        params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError> {
        let message = match require_str_param(params, "message") {
            Ok(value) => value,
            Err(outcome) => return Ok(outcome),
        };

        info!(entity_id = %ctx.entity_id, "Requester notified");

        Ok(ActionOutcome::Success {
            data: serde_json::json!({
                "work_order_id": ctx.entity_id,
                "message": message,
                "delivered": true,
            }),
        })
    }
}
