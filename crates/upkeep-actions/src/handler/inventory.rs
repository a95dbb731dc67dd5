//! Inventory handlers.

use async_trait::async_trait;
use tracing::info;

use crate::error::HandlerError;
use crate::handler::{require_str_param, ActionHandler};
use crate::types::{ActionContext, ActionOutcome};

/// Reserves parts against a work order.
pub struct ReservePartsHandler;

#[async_trait]
impl ActionHandler for ReservePartsHandler {
    async fn run(
        &self,
        ctx: &ActionContext,
        params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError> {
        let quantity = params
            .and_then(|p| p.get("quantity"))
            .and_then(|v| v.as_u64())
            .unwrap_or(1);
        if quantity == 0 {
            return Ok(ActionOutcome::ValidationError {
                message: "quantity must be at least 1".to_string(),
            });
        }

        info!(entity_id = %ctx.entity_id, quantity, "Parts reserved");

        Ok(ActionOutcome::Success {
            data: serde_json::json!({
                "entity_id": ctx.entity_id,
                "reserved": quantity,
            }),
        })
    }
}

/// Writes off stock as lost or damaged. Irreversible.
pub struct WriteOffStockHandler;

#[async_trait]
impl ActionHandler for WriteOffStockHandler {
    async fn run(
        &self,
        ctx: &ActionContext,
        params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError> {
        let reason = match require_str_param(params, "reason") {
            Ok(value) => value,
            Err(outcome) => return Ok(outcome),
        };
        let quantity = params
            .and_then(|p| p.get("quantity"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        if quantity == 0 {
            return Ok(ActionOutcome::ValidationError {
                message: "quantity must be at least 1".to_string(),
            });
        }

        info!(
            part_id = %ctx.entity_id,
            quantity,
            reason = %reason,
            "Stock written off"
        );

        Ok(ActionOutcome::Success {
            data: serde_json::json!({
                "part_id": ctx.entity_id,
                "written_off": quantity,
                "reason": reason,
            }),
        })
    }
}

/// Raises a replenishment order for a part below its reorder point.
pub struct ReorderStockHandler;

#[async_trait]
impl ActionHandler for ReorderStockHandler {
    async fn run(
        &self,
        ctx: &ActionContext,
        params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError> {
        let quantity = params
            .and_then(|p| p.get("quantity"))
            .and_then(|v| v.as_u64())
            .unwrap_or(1);

        info!(part_id = %ctx.entity_id, quantity, "Reorder raised");

        Ok(ActionOutcome::Success {
            data: serde_json::json!({
                "part_id": ctx.entity_id,
                "ordered": quantity,
            }),
        })
    }
}
