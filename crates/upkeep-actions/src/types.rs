//! Core types and value objects for the action engine.
//!
//! Defines the closed action vocabulary, definitions, invocation contexts,
//! and the tagged outcome type every execution path funnels into.

use serde::{Deserialize, Serialize};
use std::fmt;
use upkeep_core::types::{EntityType, Timestamp};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Canonical action identifiers.
///
/// This enum is the authoritative action-name list: caller-supplied strings
/// are parsed into it, and a parse failure is the "unknown action" condition.
/// Registration cannot invent names outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionName {
    AssignTechnician,
    CompleteWorkOrder,
    ReopenWorkOrder,
    EscalatePriority,
    RejectRequest,
    ReserveParts,
    WriteOffStock,
    ReorderStock,
    ApprovePurchase,
    NotifyRequester,
    ViewServiceHistory,
    CheckWarranty,
    ExportComplianceReport,
}

impl ActionName {
    /// All canonical actions, in catalog order.
    pub const ALL: [ActionName; 13] = [
        ActionName::AssignTechnician,
        ActionName::CompleteWorkOrder,
        ActionName::ReopenWorkOrder,
        ActionName::EscalatePriority,
        ActionName::RejectRequest,
        ActionName::ReserveParts,
        ActionName::WriteOffStock,
        ActionName::ReorderStock,
        ActionName::ApprovePurchase,
        ActionName::NotifyRequester,
        ActionName::ViewServiceHistory,
        ActionName::CheckWarranty,
        ActionName::ExportComplianceReport,
    ];

    /// Whether the action's effect cannot be undone once applied.
    ///
    /// Drives the `warning` confirmation severity for heavy mutations.
    pub fn irreversible(&self) -> bool {
        matches!(
            self,
            ActionName::CompleteWorkOrder
                | ActionName::RejectRequest
                | ActionName::WriteOffStock
        )
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionName::AssignTechnician => write!(f, "assign_technician"),
            ActionName::CompleteWorkOrder => write!(f, "complete_work_order"),
            ActionName::ReopenWorkOrder => write!(f, "reopen_work_order"),
            ActionName::EscalatePriority => write!(f, "escalate_priority"),
            ActionName::RejectRequest => write!(f, "reject_request"),
            ActionName::ReserveParts => write!(f, "reserve_parts"),
            ActionName::WriteOffStock => write!(f, "write_off_stock"),
            ActionName::ReorderStock => write!(f, "reorder_stock"),
            ActionName::ApprovePurchase => write!(f, "approve_purchase"),
            ActionName::NotifyRequester => write!(f, "notify_requester"),
            ActionName::ViewServiceHistory => write!(f, "view_service_history"),
            ActionName::CheckWarranty => write!(f, "check_warranty"),
            ActionName::ExportComplianceReport => write!(f, "export_compliance_report"),
        }
    }
}

impl std::str::FromStr for ActionName {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assign_technician" => Ok(ActionName::AssignTechnician),
            "complete_work_order" => Ok(ActionName::CompleteWorkOrder),
            "reopen_work_order" => Ok(ActionName::ReopenWorkOrder),
            "escalate_priority" => Ok(ActionName::EscalatePriority),
            "reject_request" => Ok(ActionName::RejectRequest),
            "reserve_parts" => Ok(ActionName::ReserveParts),
            "write_off_stock" => Ok(ActionName::WriteOffStock),
            "reorder_stock" => Ok(ActionName::ReorderStock),
            "approve_purchase" => Ok(ActionName::ApprovePurchase),
            "notify_requester" => Ok(ActionName::NotifyRequester),
            "view_service_history" => Ok(ActionName::ViewServiceHistory),
            "check_warranty" => Ok(ActionName::CheckWarranty),
            "export_compliance_report" => Ok(ActionName::ExportComplianceReport),
            _ => Err(format!("Unknown action name: {}", s)),
        }
    }
}

/// Purpose grouping for catalog actions. UI organization only, no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cluster {
    Remediation,
    Maintenance,
    InventoryControl,
    Communication,
    Compliance,
    Procurement,
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cluster::Remediation => write!(f, "remediation"),
            Cluster::Maintenance => write!(f, "maintenance"),
            Cluster::InventoryControl => write!(f, "inventory_control"),
            Cluster::Communication => write!(f, "communication"),
            Cluster::Compliance => write!(f, "compliance"),
            Cluster::Procurement => write!(f, "procurement"),
        }
    }
}

impl std::str::FromStr for Cluster {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remediation" => Ok(Cluster::Remediation),
            "maintenance" => Ok(Cluster::Maintenance),
            "inventory_control" => Ok(Cluster::InventoryControl),
            "communication" => Ok(Cluster::Communication),
            "compliance" => Ok(Cluster::Compliance),
            "procurement" => Ok(Cluster::Procurement),
            _ => Err(format!("Unknown cluster: {}", s)),
        }
    }
}

/// Side-effect class governing the confirmation requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffect {
    ReadOnly,
    MutationLight,
    MutationHeavy,
}

impl fmt::Display for SideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideEffect::ReadOnly => write!(f, "read_only"),
            SideEffect::MutationLight => write!(f, "mutation_light"),
            SideEffect::MutationHeavy => write!(f, "mutation_heavy"),
        }
    }
}

impl std::str::FromStr for SideEffect {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read_only" => Ok(SideEffect::ReadOnly),
            "mutation_light" => Ok(SideEffect::MutationLight),
            "mutation_heavy" => Ok(SideEffect::MutationHeavy),
            _ => Err(format!("Unknown side effect class: {}", s)),
        }
    }
}

// =============================================================================
// Domain Structs
// =============================================================================

/// Immutable metadata for one catalog action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub name: ActionName,
    pub label: String,
    pub cluster: Cluster,
    pub entity_types: Vec<EntityType>,
    pub side_effect: SideEffect,
    pub requires_confirmation: bool,
    /// Opaque key the handler registry resolves at dispatch time.
    pub handler_ref: String,
}

impl ActionDefinition {
    /// Build a definition with the confirmation flag derived from the
    /// side-effect class and the handler ref defaulted to the action name.
    pub fn new(
        name: ActionName,
        label: impl Into<String>,
        cluster: Cluster,
        entity_types: Vec<EntityType>,
        side_effect: SideEffect,
    ) -> Self {
        Self {
            name,
            label: label.into(),
            cluster,
            entity_types,
            side_effect,
            requires_confirmation: side_effect == SideEffect::MutationHeavy,
            handler_ref: name.to_string(),
        }
    }

    pub fn applies_to(&self, entity_type: EntityType) -> bool {
        self.entity_types.contains(&entity_type)
    }
}

/// Read-only snapshot of the current entity plus the caller's role.
///
/// Supplied fresh on every visibility check; trigger predicates inspect it
/// and nothing else. The engine never caches or mutates one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SituationalContext {
    pub caller_role: String,
    pub entity_status: Option<String>,
    pub assigned_to: Option<String>,
    pub stock_below_threshold: bool,
    pub has_linked_purchase: bool,
    pub under_warranty: bool,
}

/// Per-invocation caller and target identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionContext {
    pub tenant_id: String,
    pub caller_id: String,
    pub caller_role: String,
    pub entity_type: EntityType,
    pub entity_id: String,
}

impl ActionContext {
    /// Check well-formedness. Runs before the catalog is even consulted.
    ///
    /// Identifiers must be non-empty after trimming and restricted to
    /// alphanumerics plus `.`, `_`, and `-`.
    pub fn validate(&self) -> Result<(), String> {
        fn check_id(field: &str, value: &str) -> Result<(), String> {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", field));
            }
            if !value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            {
                return Err(format!("{} contains invalid characters", field));
            }
            Ok(())
        }

        check_id("tenant_id", &self.tenant_id)?;
        check_id("caller_id", &self.caller_id)?;
        check_id("entity_id", &self.entity_id)?;
        Ok(())
    }
}

/// One entry in a pre-confirmed batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub name: String,
    pub params: Option<serde_json::Value>,
}

/// Discriminated outcome of an action invocation.
///
/// Exactly one variant per call. `ConfirmationRequired` is a control-flow
/// pause, not an error: the caller re-invokes with `confirmed = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Success { data: serde_json::Value },
    ConfirmationRequired { message: String },
    ValidationError { message: String },
    NotFound,
    Unauthorized { reason: String },
    InternalError { message: String },
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success { .. })
    }

    /// Short tag for logs and history records.
    pub fn kind(&self) -> &'static str {
        match self {
            ActionOutcome::Success { .. } => "success",
            ActionOutcome::ConfirmationRequired { .. } => "confirmation_required",
            ActionOutcome::ValidationError { .. } => "validation_error",
            ActionOutcome::NotFound => "not_found",
            ActionOutcome::Unauthorized { .. } => "unauthorized",
            ActionOutcome::InternalError { .. } => "internal_error",
        }
    }
}

/// Caller-owned audit ledger entry.
///
/// The engine never reads or writes these; the type exists so UI layers
/// that keep a local action history agree on the shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionHistoryRecord {
    pub id: Uuid,
    pub action: ActionName,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub outcome: String,
    pub error_message: Option<String>,
    pub executed_at: Timestamp,
}

impl ActionHistoryRecord {
    /// Record the outcome of a just-completed invocation.
    pub fn from_outcome(action: ActionName, ctx: &ActionContext, outcome: &ActionOutcome) -> Self {
        let error_message = match outcome {
            ActionOutcome::ValidationError { message }
            | ActionOutcome::InternalError { message } => Some(message.clone()),
            ActionOutcome::Unauthorized { reason } => Some(reason.clone()),
            _ => None,
        };
        Self {
            id: Uuid::new_v4(),
            action,
            entity_type: ctx.entity_type,
            entity_id: ctx.entity_id.clone(),
            outcome: outcome.kind().to_string(),
            error_message,
            executed_at: Timestamp::now(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
