//! Action execution core for Upkeep.
//!
//! A registry of named, typed operations invocable against domain entities,
//! gated by role-aware trigger rules and, for heavy mutations, a mandatory
//! confirmation step (propose, confirm, execute). The engine validates,
//! gates, and dispatches to externally supplied handlers; it performs no
//! domain mutation itself.

pub mod catalog;
pub mod confirmation;
pub mod engine;
pub mod error;
pub mod gate;
pub mod handler;
pub mod trigger;
pub mod types;

pub use catalog::Catalog;
pub use confirmation::{ConfirmationPolicy, ConfirmationPrompt, Severity};
pub use engine::ActionEngine;
pub use error::{CatalogError, HandlerError, TriggerError};
pub use gate::GateDecision;
pub use handler::{ActionHandler, HandlerRegistry};
pub use trigger::{TriggerRule, TriggerRules};
pub use types::{
    ActionContext, ActionDefinition, ActionHistoryRecord, ActionName, ActionOutcome,
    BatchRequest, Cluster, SideEffect, SituationalContext,
};
