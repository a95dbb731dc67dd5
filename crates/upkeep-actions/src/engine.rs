//! Action engine: the dispatcher fronting the catalog, trigger rules,
//! authorization gate, and confirmation policy.
//!
//! An engine is an explicitly constructed value; callers share it behind an
//! `Arc`. The catalog and trigger tables are read-only after construction,
//! so concurrent reads need no synchronization. Handler invocation is the
//! only side-effecting step.

use std::sync::Arc;

use tracing::{debug, warn};
use upkeep_core::config::EngineConfig;

use crate::catalog::Catalog;
use crate::confirmation::{ConfirmationPolicy, ConfirmationPrompt};
use crate::gate::{self, GateDecision};
use crate::handler::{ActionHandler, HandlerRegistry};
use crate::trigger::TriggerRules;
use crate::types::{ActionContext, ActionName, ActionOutcome, BatchRequest, SituationalContext};

pub struct ActionEngine {
    catalog: Catalog,
    triggers: TriggerRules,
    handlers: HandlerRegistry,
    policy: ConfirmationPolicy,
}

impl ActionEngine {
    pub fn new(
        catalog: Catalog,
        triggers: TriggerRules,
        handlers: HandlerRegistry,
        config: &EngineConfig,
    ) -> Self {
        Self {
            catalog,
            triggers,
            handlers,
            policy: ConfirmationPolicy::new(
                config.confirm_label.as_str(),
                config.cancel_label.as_str(),
            ),
        }
    }

    /// Engine wired with the builtin catalog, builtin trigger rules, and
    /// the demo handler set.
    pub fn with_defaults(config: &EngineConfig) -> Self {
        let catalog = Catalog::builtin();
        let triggers = TriggerRules::builtin(&catalog, config.fail_open_visibility);
        let handlers = HandlerRegistry::with_defaults();
        Self::new(catalog, triggers, handlers, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Bind a handler to a `handler_ref`. Last writer wins.
    ///
    /// Expected to run during initialization, before the engine is shared.
    pub fn register_handler(
        &mut self,
        handler_ref: impl Into<String>,
        handler: Arc<dyn ActionHandler>,
    ) {
        self.handlers.register(handler_ref, handler);
    }

    /// Authorization check without dispatch.
    pub fn can_execute(&self, name: &str, ctx: &ActionContext) -> GateDecision {
        match name.parse::<ActionName>() {
            Ok(parsed) => gate::authorize(&self.catalog, &self.handlers, parsed, ctx),
            Err(_) => GateDecision::deny(gate::UNKNOWN_ACTION),
        }
    }

    /// Visibility for one action. Names the catalog does not know fall back
    /// to the configured fail-open default.
    pub fn should_show(&self, name: &str, situation: &SituationalContext) -> bool {
        match name.parse::<ActionName>() {
            Ok(parsed) => self.triggers.should_show(parsed, situation),
            Err(_) => self.triggers.fail_open(),
        }
    }

    /// Auto-run eligibility. Static per action; unknown names never
    /// auto-run.
    pub fn should_auto_run(&self, name: &str) -> bool {
        name.parse::<ActionName>()
            .map(|parsed| self.triggers.should_auto_run(parsed))
            .unwrap_or(false)
    }

    pub fn filter_visible(
        &self,
        names: &[ActionName],
        situation: &SituationalContext,
    ) -> Vec<ActionName> {
        self.triggers.filter_visible(names, situation)
    }

    pub fn filter_auto_run(&self, names: &[ActionName]) -> Vec<ActionName> {
        self.triggers.filter_auto_run(names)
    }

    /// Confirmation descriptor for a catalog action, `None` for unknown
    /// names.
    pub fn build_confirmation(&self, name: &str) -> Option<ConfirmationPrompt> {
        let parsed = name.parse::<ActionName>().ok()?;
        self.catalog.lookup(parsed).map(|def| self.policy.build(def))
    }

    /// Validate, gate, confirm, dispatch.
    ///
    /// Every path funnels into an `ActionOutcome`; nothing escapes this
    /// method. Handler failures are wrapped as `InternalError`, and an
    /// unconfirmed heavy mutation pauses with `ConfirmationRequired`
    /// without invoking the handler.
    pub async fn execute(
        &self,
        name: &str,
        ctx: &ActionContext,
        params: Option<serde_json::Value>,
        confirmed: bool,
    ) -> ActionOutcome {
        if let Err(message) = ctx.validate() {
            return ActionOutcome::ValidationError { message };
        }

        let Ok(action) = name.parse::<ActionName>() else {
            return ActionOutcome::NotFound;
        };
        let Some(def) = self.catalog.lookup(action) else {
            return ActionOutcome::NotFound;
        };

        let decision = gate::authorize(&self.catalog, &self.handlers, action, ctx);
        if !decision.allowed {
            let reason = decision.reason.unwrap_or_default();
            warn!(action = %action, reason = %reason, "Action denied");
            return ActionOutcome::Unauthorized { reason };
        }

        if def.requires_confirmation && !confirmed {
            let prompt = self.policy.build(def);
            return ActionOutcome::ConfirmationRequired {
                message: prompt.message,
            };
        }

        let Some(handler) = self.handlers.get(&def.handler_ref) else {
            return ActionOutcome::Unauthorized {
                reason: gate::HANDLER_NOT_IMPLEMENTED.to_string(),
            };
        };

        debug!(action = %action, entity_id = %ctx.entity_id, "Dispatching action");
        match handler.run(ctx, params.as_ref()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(action = %action, error = %e, "Handler failed");
                ActionOutcome::InternalError {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Run a pre-confirmed batch strictly in order, stopping at the first
    /// non-success outcome. Returns the results produced so far, never
    /// padded to the input length.
    pub async fn execute_batch(
        &self,
        requests: &[BatchRequest],
        ctx: &ActionContext,
    ) -> Vec<ActionOutcome> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let outcome = self
                .execute(&request.name, ctx, request.params.clone(), true)
                .await;
            let stop = !outcome.is_success();
            results.push(outcome);
            if stop {
                break;
            }
        }
        results
    }
}
