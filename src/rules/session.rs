//! A live form bound to its dependency rules

use std::collections::HashMap;

use super::delta::FieldDelta;
use super::engine::{ChangeEvent, DependencyEngine, EvalContext};
use crate::state::{Form, FormTemplate};

/// A form whose derived state has been evaluated at least once.
///
/// The only way to obtain a session is [`FormSession::start`], which applies
/// the initial pass before returning; change events can therefore never see
/// an unevaluated form.
#[derive(Debug, Clone)]
pub struct FormSession {
    template: FormTemplate,
    form: Form,
    engine: DependencyEngine,
}

impl FormSession {
    /// Build `template`, fill in `prefill` values and run the initial pass
    pub fn start(
        template: FormTemplate,
        prefill: &HashMap<String, String>,
        ctx: &EvalContext,
    ) -> Self {
        let mut form = template.build();
        for (id, value) in prefill {
            match form.get_field_mut(id) {
                Some(field) if field.is_checkbox() => {
                    field.checked = matches!(value.as_str(), "true" | "on" | "1");
                }
                Some(field) => field.value = value.clone(),
                None => tracing::debug!("Ignoring prefill for unknown field {id}"),
            }
        }

        let engine = template.engine(&form.fields);
        let deltas = engine.initial_pass(&form, ctx);
        let applied = DependencyEngine::apply(deltas, &mut form);
        form.ensure_focus();
        tracing::info!(
            "Started {} form ({} rules, {} initial changes)",
            template.title(),
            engine.rules().len(),
            applied.len()
        );

        Self {
            template,
            form,
            engine,
        }
    }

    pub fn template(&self) -> FormTemplate {
        self.template
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Raw access for user edits; edits only reach the rules through [`Self::dispatch`]
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn engine(&self) -> &DependencyEngine {
        &self.engine
    }

    /// Re-evaluate after a committed edit; returns the deltas that changed state
    pub fn dispatch(&mut self, event: &ChangeEvent, ctx: &EvalContext) -> Vec<FieldDelta> {
        let deltas = self.engine.on_change(&self.form, event, ctx);
        let applied = DependencyEngine::apply(deltas, &mut self.form);
        self.form.ensure_focus();
        applied
    }

    /// Flip a checkbox and dispatch the resulting change
    pub fn toggle(&mut self, id: &str, ctx: &EvalContext) -> Vec<FieldDelta> {
        let toggled = self
            .form
            .get_field_mut(id)
            .is_some_and(|field| field.toggle());
        if !toggled {
            return Vec::new();
        }
        self.dispatch(&ChangeEvent::new(id, ""), ctx)
    }
}
