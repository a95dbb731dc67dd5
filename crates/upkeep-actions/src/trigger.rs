//! Visibility and auto-run trigger rules.
//!
//! Each rule pairs a pure predicate over the situational context with a
//! static auto-run flag. Role policy lives here, in the predicates, rather
//! than in the authorization gate, so all situational conditions stay in
//! one declarative place.

use std::collections::HashMap;

use tracing::warn;

use crate::catalog::Catalog;
use crate::error::TriggerError;
use crate::types::{ActionName, SideEffect, SituationalContext};

type Predicate = Box<dyn Fn(&SituationalContext) -> bool + Send + Sync>;

/// A visibility predicate plus the action's auto-run eligibility.
///
/// Predicates must be side-effect-free and must not perform I/O; they
/// inspect only the supplied context.
pub struct TriggerRule {
    predicate: Predicate,
    auto_run: bool,
}

impl TriggerRule {
    /// Rule that shows the action when the predicate holds.
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&SituationalContext) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            auto_run: false,
        }
    }

    /// Mark the action as auto-run. Only valid for read-only actions;
    /// enforced at registration.
    pub fn auto_run(mut self) -> Self {
        self.auto_run = true;
        self
    }

    pub fn matches(&self, ctx: &SituationalContext) -> bool {
        (self.predicate)(ctx)
    }

    pub fn is_auto_run(&self) -> bool {
        self.auto_run
    }
}

/// Table of trigger rules keyed by action name.
///
/// Actions without a rule are visible by default (fail-open). That stance
/// is inherited from catalogs that predate trigger rules and is preserved
/// deliberately; `fail_open` in the engine config turns it off. Auto-run
/// has no such default: unknown names never auto-run.
pub struct TriggerRules {
    rules: HashMap<ActionName, TriggerRule>,
    fail_open: bool,
}

impl TriggerRules {
    pub fn new(fail_open: bool) -> Self {
        Self {
            rules: HashMap::new(),
            fail_open,
        }
    }

    /// Rule table pre-populated for the canonical action set.
    pub fn builtin(catalog: &Catalog, fail_open: bool) -> Self {
        let mut rules = Self::new(fail_open);
        for (name, rule) in builtin_rules() {
            if let Err(e) = rules.register(name, rule, catalog) {
                warn!(error = %e, "Skipping builtin trigger rule");
            }
        }
        rules
    }

    /// Install a rule for an action, validating it against the catalog.
    pub fn register(
        &mut self,
        name: ActionName,
        rule: TriggerRule,
        catalog: &Catalog,
    ) -> Result<(), TriggerError> {
        let def = catalog
            .lookup(name)
            .ok_or(TriggerError::UnknownAction(name))?;
        if rule.auto_run && def.side_effect != SideEffect::ReadOnly {
            return Err(TriggerError::AutoRunNotReadOnly(name));
        }
        self.rules.insert(name, rule);
        Ok(())
    }

    /// Whether the action should be shown for the given situation.
    pub fn should_show(&self, name: ActionName, ctx: &SituationalContext) -> bool {
        match self.rules.get(&name) {
            Some(rule) => rule.matches(ctx),
            None => self.fail_open,
        }
    }

    /// Whether the action auto-runs. Static per action, independent of
    /// the situation; defaults to false for names without a rule.
    pub fn should_auto_run(&self, name: ActionName) -> bool {
        self.rules.get(&name).is_some_and(|rule| rule.is_auto_run())
    }

    pub fn filter_visible(
        &self,
        names: &[ActionName],
        ctx: &SituationalContext,
    ) -> Vec<ActionName> {
        names
            .iter()
            .copied()
            .filter(|name| self.should_show(*name, ctx))
            .collect()
    }

    pub fn filter_auto_run(&self, names: &[ActionName]) -> Vec<ActionName> {
        names
            .iter()
            .copied()
            .filter(|name| self.should_auto_run(*name))
            .collect()
    }

    pub fn fail_open(&self) -> bool {
        self.fail_open
    }
}

fn role_in(ctx: &SituationalContext, roles: &[&str]) -> bool {
    roles.iter().any(|r| ctx.caller_role == *r)
}

fn status_is(ctx: &SituationalContext, status: &str) -> bool {
    ctx.entity_status.as_deref() == Some(status)
}

/// Canonical rules.
///
/// `view_service_history` carries no rule on purpose: it exercises the
/// fail-open default.
fn builtin_rules() -> Vec<(ActionName, TriggerRule)> {
    vec![
        (
            ActionName::AssignTechnician,
            TriggerRule::when(|ctx| {
                role_in(ctx, &["manager", "dispatcher"])
                    && (status_is(ctx, "requested") || status_is(ctx, "approved"))
            }),
        ),
        (
            ActionName::CompleteWorkOrder,
            TriggerRule::when(|ctx| {
                role_in(ctx, &["technician", "manager"]) && status_is(ctx, "in_progress")
            }),
        ),
        (
            ActionName::ReopenWorkOrder,
            TriggerRule::when(|ctx| role_in(ctx, &["manager"]) && status_is(ctx, "completed")),
        ),
        (
            ActionName::EscalatePriority,
            TriggerRule::when(|ctx| role_in(ctx, &["manager", "dispatcher"])),
        ),
        (
            ActionName::RejectRequest,
            TriggerRule::when(|ctx| role_in(ctx, &["manager"]) && status_is(ctx, "requested")),
        ),
        (
            ActionName::ReserveParts,
            TriggerRule::when(|ctx| role_in(ctx, &["technician", "manager"])),
        ),
        (
            ActionName::WriteOffStock,
            TriggerRule::when(|ctx| role_in(ctx, &["manager"])),
        ),
        (
            ActionName::ReorderStock,
            TriggerRule::when(|ctx| {
                role_in(ctx, &["manager", "dispatcher"]) && ctx.stock_below_threshold
            }),
        ),
        (
            ActionName::ApprovePurchase,
            TriggerRule::when(|ctx| role_in(ctx, &["manager"]) && ctx.has_linked_purchase),
        ),
        (
            ActionName::NotifyRequester,
            TriggerRule::when(|ctx| ctx.assigned_to.is_some()),
        ),
        (
            ActionName::CheckWarranty,
            TriggerRule::when(|ctx| ctx.under_warranty).auto_run(),
        ),
        (
            ActionName::ExportComplianceReport,
            TriggerRule::when(|ctx| role_in(ctx, &["manager"])),
        ),
    ]
}
