//! Dependency engine: routes change events to rules and applies their deltas

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::age::{AgeClassifier, Classification};
use super::delta::{FieldDelta, FieldId, FormSurface};
use super::guardian::GuardianRule;
use super::not_applicable::ExclusivityPair;
use super::voter_title::VoterTitleRule;

/// When guardian values are wiped as the birth date changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Clear when an adult birth date becomes a minor or unknown one
    #[default]
    OnBecomingMinor,
    /// Clear when a minor or unknown birth date becomes an adult one
    OnBecomingAdult,
    Never,
}

impl ClearPolicy {
    pub fn should_clear(self, before: Classification, after: Classification) -> bool {
        match self {
            ClearPolicy::OnBecomingMinor => before.is_adult() && !after.is_adult(),
            ClearPolicy::OnBecomingAdult => !before.is_adult() && after.is_adult(),
            ClearPolicy::Never => false,
        }
    }
}

/// Everything a rule needs besides the form itself
#[derive(Debug, Clone, Copy)]
pub struct EvalContext {
    /// Read from the wall clock by the caller at evaluation time
    pub today: NaiveDate,
    pub classifier: AgeClassifier,
    pub clear_policy: ClearPolicy,
}

impl EvalContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            classifier: AgeClassifier::default(),
            clear_policy: ClearPolicy::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: AgeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_clear_policy(mut self, clear_policy: ClearPolicy) -> Self {
        self.clear_policy = clear_policy;
        self
    }

    pub fn classify(&self, birth_date: &str) -> Classification {
        self.classifier.classify(birth_date, self.today)
    }
}

/// A user edit committed on a driving field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub field: FieldId,
    /// The field's value before the edit (empty for checkboxes)
    pub previous_value: String,
}

impl ChangeEvent {
    pub fn new(field: impl Into<FieldId>, previous_value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            previous_value: previous_value.into(),
        }
    }
}

/// Every kind of dependency a form template can declare
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyRule {
    Guardian(GuardianRule),
    VoterTitle(VoterTitleRule),
    NotApplicable(ExclusivityPair),
}

impl DependencyRule {
    pub fn driver(&self) -> &str {
        match self {
            DependencyRule::Guardian(r) => r.driver(),
            DependencyRule::VoterTitle(r) => r.driver(),
            DependencyRule::NotApplicable(p) => p.flag(),
        }
    }

    pub fn initial(&self, form: &dyn FormSurface, ctx: &EvalContext) -> Vec<FieldDelta> {
        match self {
            DependencyRule::Guardian(r) => r.initial(form, ctx),
            DependencyRule::VoterTitle(r) => r.evaluate(form, ctx),
            DependencyRule::NotApplicable(p) => p.initialize(form),
        }
    }

    pub fn on_change(
        &self,
        form: &dyn FormSurface,
        event: &ChangeEvent,
        ctx: &EvalContext,
    ) -> Vec<FieldDelta> {
        match self {
            DependencyRule::Guardian(r) => r.on_change(form, &event.previous_value, ctx),
            DependencyRule::VoterTitle(r) => r.evaluate(form, ctx),
            DependencyRule::NotApplicable(p) => p.on_flag_change(form),
        }
    }
}

/// The static set of rules attached to one form template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyEngine {
    rules: Vec<DependencyRule>,
}

impl DependencyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: DependencyRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = DependencyRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn rules(&self) -> &[DependencyRule] {
        &self.rules
    }

    /// Whether a change on `field` has any rule listening to it
    pub fn drives(&self, field: &str) -> bool {
        self.rules.iter().any(|r| r.driver() == field)
    }

    /// Deltas that bring a freshly loaded form in line with its drivers
    pub fn initial_pass(&self, form: &dyn FormSurface, ctx: &EvalContext) -> Vec<FieldDelta> {
        self.rules
            .iter()
            .flat_map(|rule| rule.initial(form, ctx))
            .collect()
    }

    /// Deltas for a committed change; rules driven by other fields are not consulted
    pub fn on_change(
        &self,
        form: &dyn FormSurface,
        event: &ChangeEvent,
        ctx: &EvalContext,
    ) -> Vec<FieldDelta> {
        let deltas: Vec<FieldDelta> = self
            .rules
            .iter()
            .filter(|rule| rule.driver() == event.field)
            .flat_map(|rule| rule.on_change(form, event, ctx))
            .collect();
        tracing::trace!(
            "Change on {} produced {} delta(s)",
            event.field,
            deltas.len()
        );
        deltas
    }

    /// Push deltas through a surface; returns the ones that changed something
    pub fn apply(deltas: Vec<FieldDelta>, surface: &mut dyn FormSurface) -> Vec<FieldDelta> {
        deltas
            .into_iter()
            .filter(|delta| {
                let changed = surface.apply(delta);
                if changed {
                    tracing::debug!("Applied {delta}");
                }
                changed
            })
            .collect()
    }
}
