//! Guardian fields shown and required for candidates who are not adults

use super::age::Classification;
use super::delta::{FieldDelta, FieldId, FormSurface};
use super::engine::EvalContext;

/// Age-gated requirement: guardian fields follow the birth date classification.
///
/// Minors (and unknown birth dates) get every present dependent revealed and
/// required; adults get them hidden and optional. Values are left alone except
/// on the transition selected by the context's [`ClearPolicy`].
///
/// [`ClearPolicy`]: super::engine::ClearPolicy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardianRule {
    birth_date: FieldId,
    dependents: Vec<FieldId>,
}

impl GuardianRule {
    pub fn new<I, S>(birth_date: &str, dependents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldId>,
    {
        Self {
            birth_date: birth_date.to_string(),
            dependents: dependents.into_iter().map(Into::into).collect(),
        }
    }

    pub fn driver(&self) -> &str {
        &self.birth_date
    }

    #[cfg(test)]
    pub fn dependents(&self) -> &[FieldId] {
        &self.dependents
    }

    fn current(&self, form: &dyn FormSurface, ctx: &EvalContext) -> Option<Classification> {
        match form.field(&self.birth_date) {
            Some(driver) => Some(ctx.classify(&driver.value)),
            None => {
                tracing::warn!("Birth date field {} is missing from the form", self.birth_date);
                None
            }
        }
    }

    /// Dependents that exist on this form variant
    fn present<'a>(&'a self, form: &'a dyn FormSurface) -> impl Iterator<Item = &'a FieldId> {
        self.dependents
            .iter()
            .filter(move |id| form.field(id).is_some())
    }

    fn targets(&self, form: &dyn FormSurface, classification: Classification) -> Vec<FieldDelta> {
        let needed = classification.needs_guardian();
        self.present(form)
            .flat_map(|id| {
                [
                    FieldDelta::visible(id.as_str(), needed),
                    FieldDelta::required(id.as_str(), needed),
                ]
            })
            .collect()
    }

    /// State for a freshly loaded form; never clears values
    pub fn initial(&self, form: &dyn FormSurface, ctx: &EvalContext) -> Vec<FieldDelta> {
        match self.current(form, ctx) {
            Some(classification) => self.targets(form, classification),
            None => Vec::new(),
        }
    }

    /// State after the birth date changed from `previous_value`
    pub fn on_change(
        &self,
        form: &dyn FormSurface,
        previous_value: &str,
        ctx: &EvalContext,
    ) -> Vec<FieldDelta> {
        let Some(after) = self.current(form, ctx) else {
            return Vec::new();
        };
        let before = ctx.classify(previous_value);
        let mut deltas = self.targets(form, after);
        if ctx.clear_policy.should_clear(before, after) {
            tracing::debug!("Clearing guardian fields ({before:?} -> {after:?})");
            deltas.extend(self.present(form).map(|id| FieldDelta::clear(id.as_str())));
        }
        deltas
    }
}
