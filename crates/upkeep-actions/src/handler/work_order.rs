//! Work order handlers.

use async_trait::async_trait;
use tracing::info;

use crate::error::HandlerError;
use crate::handler::{require_str_param, ActionHandler};
use crate::types::{ActionContext, ActionOutcome};

/// Assigns a technician to a work order.
pub struct AssignTechnicianHandler;

#[async_trait]
impl ActionHandler for AssignTechnicianHandler {
    async fn run(
        &self,
        ctx: &ActionContext,
        params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError> {
        let technician_id = match require_str_param(params, "technician_id") {
            Ok(value) => value,
            Err(outcome) => return Ok(outcome),
        };

        info!(
            entity_id = %ctx.entity_id,
            technician_id = %technician_id,
            "Technician assigned"
        );

        Ok(ActionOutcome::Success {
            data: serde_json::json!({
                "work_order_id": ctx.entity_id,
                "assigned_to": technician_id,
            }),
        })
    }
}

/// Marks a work order complete. Irreversible; always confirmation-gated.
pub struct CompleteWorkOrderHandler;

#[async_trait]
impl ActionHandler for CompleteWorkOrderHandler {
    async fn run(
        &self,
        ctx: &ActionContext,
        params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError> {
        let resolution = params
            .and_then(|p| p.get("resolution"))
            .and_then(|v| v.as_str())
            .unwrap_or("completed");

        info!(entity_id = %ctx.entity_id, resolution = %resolution, "Work order completed");

        Ok(ActionOutcome::Success {
            data: serde_json::json!({
                "work_order_id": ctx.entity_id,
                "status": "completed",
                "resolution": resolution,
            }),
        })
    }
}

/// Rejects a maintenance request. Requires a reason.
pub struct RejectRequestHandler;

#[async_trait]
impl ActionHandler for RejectRequestHandler {
    async fn run(
        &self,
        ctx: &ActionContext,
        params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError> {
        let reason = match require_str_param(params, "reason") {
            Ok(value) => value,
            Err(outcome) => return Ok(outcome),
        };

        info!(entity_id = %ctx.entity_id, reason = %reason, "Request rejected");

        Ok(ActionOutcome::Success {
            data: serde_json::json!({
                "work_order_id": ctx.entity_id,
                "status": "rejected",
                "reason": reason,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upkeep_core::types::EntityType;

    fn context() -> ActionContext {
        ActionContext {
            tenant_id: "acme".to_string(),
            caller_id: "user-1".to_string(),
            caller_role: "manager".to_string(),
            entity_type: EntityType::WorkOrder,
            entity_id: "wo-42".to_string(),
        }
    }

    #[tokio::test]
    async fn test_assign_technician_success() {
        let params = serde_json::json!({ "technician_id": "tech-9" });
        let outcome = AssignTechnicianHandler
            .run(&context(), Some(&params))
            .await
            .unwrap();
        match outcome {
            ActionOutcome::Success { data } => {
                assert_eq!(data["assigned_to"], "tech-9");
                assert_eq!(data["work_order_id"], "wo-42");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_assign_technician_missing_param() {
        let outcome = AssignTechnicianHandler.run(&context(), None).await.unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::ValidationError {
                message: "Missing required parameter: technician_id".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_complete_work_order_default_resolution() {
        let outcome = CompleteWorkOrderHandler
            .run(&context(), None)
            .await
            .unwrap();
        match outcome {
            ActionOutcome::Success { data } => {
                assert_eq!(data["status"], "completed");
                assert_eq!(data["resolution"], "completed");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_work_order_with_resolution() {
        let params = serde_json::json!({ "resolution": "replaced bearing" });
        let outcome = CompleteWorkOrderHandler
            .run(&context(), Some(&params))
            .await
            .unwrap();
        match outcome {
            ActionOutcome::Success { data } => {
                assert_eq!(data["resolution"], "replaced bearing");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reject_request_requires_reason() {
        let outcome = RejectRequestHandler
            .run(&context(), Some(&serde_json::json!({})))
            .await
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::ValidationError { .. }));

        let params = serde_json::json!({ "reason": "duplicate request" });
        let outcome = RejectRequestHandler
            .run(&context(), Some(&params))
            .await
            .unwrap();
        match outcome {
            ActionOutcome::Success { data } => {
                assert_eq!(data["reason"], "duplicate request");
                assert_eq!(data["status"], "rejected");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
