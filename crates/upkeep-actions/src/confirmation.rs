//! Confirmation prompt policy.
//!
//! Derives the human-facing confirmation descriptor for any action that
//! requires an explicit commit. Pure metadata transformation: no I/O, no
//! randomness, deterministic for identical input.

use serde::{Deserialize, Serialize};

use crate::types::{ActionDefinition, SideEffect};

/// How strongly the UI should style the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// Descriptor rendered as a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub severity: Severity,
}

/// Builds confirmation prompts from action metadata.
#[derive(Debug, Clone)]
pub struct ConfirmationPolicy {
    confirm_label: String,
    cancel_label: String,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

impl ConfirmationPolicy {
    pub fn new(confirm_label: impl Into<String>, cancel_label: impl Into<String>) -> Self {
        Self {
            confirm_label: confirm_label.into(),
            cancel_label: cancel_label.into(),
        }
    }

    /// Derive the prompt for a definition.
    ///
    /// Severity is `warning` for heavy mutations with an irreversible
    /// characterization (completion, write-off, rejection), `info`
    /// otherwise.
    pub fn build(&self, def: &ActionDefinition) -> ConfirmationPrompt {
        let severity = if def.side_effect == SideEffect::MutationHeavy && def.name.irreversible() {
            Severity::Warning
        } else {
            Severity::Info
        };
        // First applicable entity type names the prompt; definitions always
        // carry at least one.
        let target = def
            .entity_types
            .first()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "record".to_string());
        let message = match severity {
            Severity::Warning => format!(
                "{} cannot be undone. Are you sure you want to continue?",
                def.label
            ),
            Severity::Info => format!("Apply \"{}\" to the selected {}?", def.label, target),
        };
        ConfirmationPrompt {
            title: def.label.clone(),
            message,
            confirm_label: self.confirm_label.clone(),
            cancel_label: self.cancel_label.clone(),
            severity,
        }
    }
}
