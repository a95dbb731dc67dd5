//! Action handler trait and registry.
//!
//! Handlers perform the actual domain effect and are supplied by the host
//! application. The engine only resolves them by `handler_ref` and converts
//! their failures into `ActionOutcome::InternalError`.

pub mod communication;
pub mod inventory;
pub mod reporting;
pub mod work_order;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::HandlerError;
use crate::types::{ActionContext, ActionOutcome};

/// An externally supplied action implementation.
///
/// Handlers return their own well-formed `ActionOutcome` on the `Ok` path
/// (including validation outcomes); `Err` is reserved for unexpected faults.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn run(
        &self,
        ctx: &ActionContext,
        params: Option<&serde_json::Value>,
    ) -> Result<ActionOutcome, HandlerError>;
}

/// Handler registry keyed by `handler_ref`.
///
/// Re-registering a bound ref overwrites it (last writer wins), which keeps
/// hot-reload during development simple.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn ActionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the demo handlers.
    ///
    /// Not every canonical action gets one; the host binds the rest.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("assign_technician", Arc::new(work_order::AssignTechnicianHandler));
        registry.register("complete_work_order", Arc::new(work_order::CompleteWorkOrderHandler));
        registry.register("reject_request", Arc::new(work_order::RejectRequestHandler));
        registry.register("reserve_parts", Arc::new(inventory::ReservePartsHandler));
        registry.register("write_off_stock", Arc::new(inventory::WriteOffStockHandler));
        registry.register("reorder_stock", Arc::new(inventory::ReorderStockHandler));
        registry.register("view_service_history", Arc::new(reporting::ServiceHistoryHandler));
        registry.register("check_warranty", Arc::new(reporting::WarrantyCheckHandler));
        registry.register("notify_requester", Arc::new(communication::NotifyRequesterHandler));
        registry
    }

    pub fn register(&mut self, handler_ref: impl Into<String>, handler: Arc<dyn ActionHandler>) {
        let handler_ref = handler_ref.into();
        if self.handlers.insert(handler_ref.clone(), handler).is_some() {
            debug!(handler_ref = %handler_ref, "Handler re-registered");
        }
    }

    pub fn get(&self, handler_ref: &str) -> Option<Arc<dyn ActionHandler>> {
        self.handlers.get(handler_ref).cloned()
    }

    pub fn contains(&self, handler_ref: &str) -> bool {
        self.handlers.contains_key(handler_ref)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Extract a required non-empty string parameter.
pub(crate) fn require_str_param(
    params: Option<&serde_json::Value>,
    key: &str,
) -> Result<String, ActionOutcome> {
    match params.and_then(|p| p.get(key)).and_then(|v| v.as_str()) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(ActionOutcome::ValidationError {
            message: format!("Missing required parameter: {}", key),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upkeep_core::types::EntityType;

    struct StaticHandler(&'static str);

    #[async_trait]
    impl ActionHandler for StaticHandler {
        async fn run(
            &self,
            _ctx: &ActionContext,
            _params: Option<&serde_json::Value>,
        ) -> Result<ActionOutcome, HandlerError> {
            Ok(ActionOutcome::Success {
                data: serde_json::json!({ "tag": self.0 }),
            })
        }
    }

    fn context() -> ActionContext {
        ActionContext {
            tenant_id: "acme".to_string(),
            caller_id: "user-1".to_string(),
            caller_role: "manager".to_string(),
            entity_type: EntityType::WorkOrder,
            entity_id: "wo-1".to_string(),
        }
    }

    #[test]
    fn test_register_and_contains() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.is_empty());
        registry.register("assign_technician", Arc::new(StaticHandler("a")));
        assert!(registry.contains("assign_technician"));
        assert!(!registry.contains("complete_work_order"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_reregistration_last_writer_wins() {
        let mut registry = HandlerRegistry::new();
        registry.register("reorder_stock", Arc::new(StaticHandler("first")));
        registry.register("reorder_stock", Arc::new(StaticHandler("second")));
        assert_eq!(registry.len(), 1);

        let handler = registry.get("reorder_stock").unwrap();
        let outcome = handler.run(&context(), None).await.unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::Success {
                data: serde_json::json!({ "tag": "second" })
            }
        );
    }

    #[test]
    fn test_with_defaults_binds_demo_handlers() {
        let registry = HandlerRegistry::with_defaults();
        assert!(registry.contains("complete_work_order"));
        assert!(registry.contains("write_off_stock"));
        assert!(registry.contains("check_warranty"));
        // Host-supplied; no default binding.
        assert!(!registry.contains("approve_purchase"));
        assert!(!registry.contains("export_compliance_report"));
    }

    #[test]
    fn test_require_str_param() {
        let params = serde_json::json!({ "technician_id": "tech-4", "blank": "  " });
        assert_eq!(
            require_str_param(Some(&params), "technician_id").unwrap(),
            "tech-4"
        );
        assert!(require_str_param(Some(&params), "blank").is_err());
        assert!(require_str_param(Some(&params), "missing").is_err());
        assert!(require_str_param(None, "technician_id").is_err());

        let err = require_str_param(None, "reason").unwrap_err();
        assert_eq!(
            err,
            ActionOutcome::ValidationError {
                message: "Missing required parameter: reason".to_string()
            }
        );
    }
}
