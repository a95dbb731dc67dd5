//! Read-only reporting handlers.

use async_trait::async_trait;
use tracing::debug;

use crate::error::HandlerError;
use crate::handler::ActionHandler;
use crate::types::{ActionContext, ActionOutcome};

/// Returns the service history for an asset or work order.
pub struct ServiceHistoryHandler;

#[async_trait]
impl ActionHandler for ServiceHistoryHandler {
    async fn run(
        &self,
        ctx: &ActionContext,
        params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError> {
        let limit = params
            .and_then(|p| p.get("limit"))
            .and_then(|v| v.as_u64())
            .unwrap_or(20);

        debug!(entity_id = %ctx.entity_id, limit, "Service history requested");

        Ok(ActionOutcome::Success {
            data: serde_json::json!({
                "entity_id": ctx.entity_id,
                "entries": [],
                "limit": limit,
            }),
        })
    }
}

/// Checks warranty coverage for an asset. Auto-run eligible.
pub struct WarrantyCheckHandler;

#[async_trait]
impl ActionHandler for WarrantyCheckHandler {
    async fn run(
        &self,
        ctx: &ActionContext,
        _params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError> {
        debug!(asset_id = %ctx.entity_id, "Warranty check");

        Ok(ActionOutcome::Success {
            data: serde_json::json!({
                "asset_id": ctx.entity_id,
                "covered": true,
            }),
        })
    }
}
