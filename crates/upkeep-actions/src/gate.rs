//! Authorization gate.
//!
//! Combines catalog membership, entity-type applicability, and handler
//! availability into a single allow/deny decision. Checks run in order and
//! short-circuit, each with a distinct reason so callers and tests can tell
//! the causes apart. Role policy is NOT checked here; it lives in the
//! trigger predicates.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::handler::HandlerRegistry;
use crate::types::{ActionContext, ActionName};

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl GateDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Reason string for an action the catalog does not know.
pub(crate) const UNKNOWN_ACTION: &str = "Unknown action";
/// Reason string for a definition with no bound handler.
pub(crate) const HANDLER_NOT_IMPLEMENTED: &str = "Handler not implemented";

pub(crate) fn authorize(
    catalog: &Catalog,
    handlers: &HandlerRegistry,
    name: ActionName,
    ctx: &ActionContext,
) -> GateDecision {
    let Some(def) = catalog.lookup(name) else {
        return GateDecision::deny(UNKNOWN_ACTION);
    };
    if !def.applies_to(ctx.entity_type) {
        return GateDecision::deny(format!(
            "{} not available for {}",
            def.label, ctx.entity_type
        ));
    }
    if !handlers.contains(&def.handler_ref) {
        return GateDecision::deny(HANDLER_NOT_IMPLEMENTED);
    }
    GateDecision::allow()
}

#[cfg(test)]
mod tests {
    use super::*;
    use upkeep_core::types::EntityType;

    fn context(entity_type: EntityType) -> ActionContext {
        ActionContext {
            tenant_id: "acme".to_string(),
            caller_id: "user-1".to_string(),
            caller_role: "manager".to_string(),
            entity_type,
            entity_id: "id-1".to_string(),
        }
    }

    #[test]
    fn test_allow_when_all_checks_pass() {
        let catalog = Catalog::builtin();
        let handlers = HandlerRegistry::with_defaults();
        let decision = authorize(
            &catalog,
            &handlers,
            ActionName::CompleteWorkOrder,
            &context(EntityType::WorkOrder),
        );
        assert!(decision.allowed);
        assert!(decision.reason.is_none());
    }

    #[test]
    fn test_deny_unknown_action() {
        let catalog = Catalog::new();
        let handlers = HandlerRegistry::with_defaults();
        let decision = authorize(
            &catalog,
            &handlers,
            ActionName::CompleteWorkOrder,
            &context(EntityType::WorkOrder),
        );
        assert!(!decision.allowed);
        assert_eq!(decision.reason.as_deref(), Some("Unknown action"));
    }

    #[test]
    fn test_deny_wrong_entity_type() {
        let catalog = Catalog::builtin();
        let handlers = HandlerRegistry::with_defaults();
        let decision = authorize(
            &catalog,
            &handlers,
            ActionName::CompleteWorkOrder,
            &context(EntityType::Asset),
        );
        assert!(!decision.allowed);
        assert_eq!(
            decision.reason.as_deref(),
            Some("Complete work order not available for asset")
        );
    }

    #[test]
    fn test_deny_missing_handler() {
        let catalog = Catalog::builtin();
        let handlers = HandlerRegistry::new();
        let decision = authorize(
            &catalog,
            &handlers,
            ActionName::CompleteWorkOrder,
            &context(EntityType::WorkOrder),
        );
        assert!(!decision.allowed);
        assert_eq!(decision.reason.as_deref(), Some("Handler not implemented"));
    }

    #[test]
    fn test_entity_check_precedes_handler_check() {
        // Wrong entity type AND no handler bound: the entity-type reason wins.
        let catalog = Catalog::builtin();
        let handlers = HandlerRegistry::new();
        let decision = authorize(
            &catalog,
            &handlers,
            ActionName::WriteOffStock,
            &context(EntityType::WorkOrder),
        );
        assert_eq!(
            decision.reason.as_deref(),
            Some("Write off stock not available for work_order")
        );
    }

    #[test]
    fn test_decision_serde_round_trip() {
        let decision = GateDecision::deny("Handler not implemented");
        let json = serde_json::to_string(&decision).unwrap();
        let rt: GateDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(decision, rt);
    }
}
