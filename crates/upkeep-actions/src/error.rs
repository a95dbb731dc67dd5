//! Error types for the action engine.

use crate::types::ActionName;
use upkeep_core::error::UpkeepError;

/// Errors from catalog registration.
///
/// Queries never fail; only `register` produces these, and only during
/// initialization. The builtin loader logs and skips offending entries
/// instead of propagating.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Action already registered: {0}")]
    DuplicateName(ActionName),
    #[error("Action {0} lists no applicable entity types")]
    NoEntityTypes(ActionName),
    #[error("Heavy mutation {0} must require confirmation")]
    MissingConfirmation(ActionName),
    #[error("Read-only action {0} must not require confirmation")]
    SpuriousConfirmation(ActionName),
}

/// Errors from trigger rule registration.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("Action not in catalog: {0}")]
    UnknownAction(ActionName),
    #[error("Auto-run is only allowed for read-only actions: {0}")]
    AutoRunNotReadOnly(ActionName),
}

/// Failure signalled by an action handler.
///
/// An `Err(HandlerError)` is the Rust rendering of a thrown handler
/// exception: the executor converts it to `ActionOutcome::InternalError`
/// and it never crosses the `execute` boundary.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    Failed(String),
}

impl From<CatalogError> for UpkeepError {
    fn from(err: CatalogError) -> Self {
        UpkeepError::Catalog(err.to_string())
    }
}

impl From<TriggerError> for UpkeepError {
    fn from(err: TriggerError) -> Self {
        UpkeepError::Trigger(err.to_string())
    }
}

impl From<HandlerError> for UpkeepError {
    fn from(err: HandlerError) -> Self {
        UpkeepError::Handler(err.to_string())
    }
}
