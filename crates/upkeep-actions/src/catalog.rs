//! Static action catalog.
//!
//! Maps each canonical action name to its immutable metadata. Registration
//! runs during initialization only; every query is pure and idempotent.

use std::collections::HashMap;

use tracing::warn;
use upkeep_core::types::EntityType;

use crate::error::CatalogError;
use crate::types::{ActionDefinition, ActionName, Cluster, SideEffect};

/// Registry of action definitions keyed by canonical name.
#[derive(Default)]
pub struct Catalog {
    definitions: HashMap<ActionName, ActionDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the canonical maintenance-domain set.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for def in builtin_definitions() {
            // Builtin entries satisfy the invariants by construction; a
            // failure here means two entries claimed the same name.
            if let Err(e) = catalog.register(def) {
                warn!(error = %e, "Skipping builtin catalog entry");
            }
        }
        catalog
    }

    /// Insert a definition, enforcing the catalog invariants.
    ///
    /// Rejections are returned as errors so initialization code can log and
    /// skip; nothing here panics.
    pub fn register(&mut self, def: ActionDefinition) -> Result<(), CatalogError> {
        if self.definitions.contains_key(&def.name) {
            return Err(CatalogError::DuplicateName(def.name));
        }
        if def.entity_types.is_empty() {
            return Err(CatalogError::NoEntityTypes(def.name));
        }
        if def.side_effect == SideEffect::MutationHeavy && !def.requires_confirmation {
            return Err(CatalogError::MissingConfirmation(def.name));
        }
        if def.side_effect == SideEffect::ReadOnly && def.requires_confirmation {
            return Err(CatalogError::SpuriousConfirmation(def.name));
        }
        self.definitions.insert(def.name, def);
        Ok(())
    }

    pub fn lookup(&self, name: ActionName) -> Option<&ActionDefinition> {
        self.definitions.get(&name)
    }

    /// All registered actions applicable to the given entity type,
    /// in canonical order.
    pub fn by_entity_type(&self, entity_type: EntityType) -> Vec<&ActionDefinition> {
        ActionName::ALL
            .iter()
            .filter_map(|name| self.definitions.get(name))
            .filter(|def| def.applies_to(entity_type))
            .collect()
    }

    /// All registered actions in the given cluster, in canonical order.
    pub fn by_cluster(&self, cluster: Cluster) -> Vec<&ActionDefinition> {
        ActionName::ALL
            .iter()
            .filter_map(|name| self.definitions.get(name))
            .filter(|def| def.cluster == cluster)
            .collect()
    }

    /// All registered actions that require confirmation, in canonical order.
    ///
    /// Used to audit that every heavy mutation made it into the catalog.
    pub fn confirmation_required(&self) -> Vec<&ActionDefinition> {
        ActionName::ALL
            .iter()
            .filter_map(|name| self.definitions.get(name))
            .filter(|def| def.requires_confirmation)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// The canonical maintenance-domain action set.
fn builtin_definitions() -> Vec<ActionDefinition> {
    use ActionName::*;
    use Cluster::*;
    use EntityType::*;
    use SideEffect::*;

    vec![
        ActionDefinition::new(
            AssignTechnician,
            "Assign technician",
            Maintenance,
            vec![WorkOrder],
            MutationLight,
        ),
        ActionDefinition::new(
            CompleteWorkOrder,
            "Complete work order",
            Maintenance,
            vec![WorkOrder],
            MutationHeavy,
        ),
        ActionDefinition::new(
            ReopenWorkOrder,
            "Reopen work order",
            Remediation,
            vec![WorkOrder],
            MutationLight,
        ),
        ActionDefinition::new(
            EscalatePriority,
            "Escalate priority",
            Remediation,
            vec![WorkOrder],
            MutationLight,
        ),
        ActionDefinition::new(
            RejectRequest,
            "Reject request",
            Remediation,
            vec![WorkOrder],
            MutationHeavy,
        ),
        ActionDefinition::new(
            ReserveParts,
            "Reserve parts",
            InventoryControl,
            vec![WorkOrder, Part],
            MutationLight,
        ),
        ActionDefinition::new(
            WriteOffStock,
            "Write off stock",
            InventoryControl,
            vec![Part],
            MutationHeavy,
        ),
        ActionDefinition::new(
            ReorderStock,
            "Reorder stock",
            Procurement,
            vec![Part],
            MutationLight,
        ),
        ActionDefinition::new(
            ApprovePurchase,
            "Approve purchase",
            Procurement,
            vec![PurchaseOrder],
            MutationHeavy,
        ),
        ActionDefinition::new(
            NotifyRequester,
            "Notify requester",
            Communication,
            vec![WorkOrder],
            MutationLight,
        ),
        ActionDefinition::new(
            ViewServiceHistory,
            "View service history",
            Maintenance,
            vec![Asset, WorkOrder],
            ReadOnly,
        ),
        ActionDefinition::new(
            CheckWarranty,
            "Check warranty",
            Compliance,
            vec![Asset],
            ReadOnly,
        ),
        ActionDefinition::new(
            ExportComplianceReport,
            "Export compliance report",
            Compliance,
            vec![Asset],
            ReadOnly,
        ),
    ]
}
