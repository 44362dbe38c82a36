//! Application state and core logic

use crate::config::FormsConfig;
use crate::rules::{ChangeEvent, EvalContext, FieldChange, FieldDelta, FieldId, FormSession};
use crate::state::{FormTemplate, RevealDirection, RevealState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Main application struct
pub struct App {
    /// The form being filled in
    pub session: FormSession,
    /// User configuration
    pub config: FormsConfig,
    /// Fields currently sliding in or out
    pub reveals: HashMap<FieldId, RevealState>,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
    /// Focused field and its value when it gained focus
    focus_value: Option<(FieldId, String)>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: FormsConfig) -> Self {
        let template = config.template();
        let mut app = Self {
            session: FormSession::start(template, &config.prefill(), &context_for(&config)),
            config,
            reveals: HashMap::new(),
            status_message: None,
            focus_value: None,
            quit: false,
        };
        app.remember_focus();
        tracing::debug!(
            "Adults from {} years",
            app.config.classifier().threshold().years()
        );
        app
    }

    /// Evaluation context for "now"
    pub fn context(&self) -> EvalContext {
        context_for(&self.config)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Advance reveal animations and drop finished ones
    pub fn update_reveals(&mut self) {
        for reveal in self.reveals.values_mut() {
            reveal.update();
        }
        self.reveals.retain(|_, reveal| !reveal.is_complete());
    }

    pub fn has_running_reveals(&self) -> bool {
        !self.reveals.is_empty()
    }

    /// Store the current template as the startup template
    pub fn save_config(&mut self) -> Result<()> {
        self.config.default_template = Some(self.session.template());
        self.config.save()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.status_message = None;

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.commit_focused();
                self.submit_check();
            }
            KeyCode::F(2) => self.switch_template(self.session.template().next()),
            KeyCode::Tab | KeyCode::Enter => {
                self.commit_focused();
                self.session.form_mut().next_field();
                self.remember_focus();
            }
            KeyCode::BackTab => {
                self.commit_focused();
                self.session.form_mut().prev_field();
                self.remember_focus();
            }
            KeyCode::Left => self.cycle_select(false),
            KeyCode::Right => self.cycle_select(true),
            KeyCode::Char(' ') if self.focused_is_checkbox() => {
                self.toggle_focused();
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.session.form_mut().get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.session.form_mut().get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Replace the current form with a freshly evaluated `template`
    pub fn switch_template(&mut self, template: FormTemplate) {
        self.session = FormSession::start(template, &self.config.prefill(), &self.context());
        self.reveals.clear();
        self.remember_focus();
        self.status_message = Some(format!("Switched to {}", template.title()));
    }

    /// Report the required fields that are still blank
    pub fn submit_check(&mut self) {
        let missing: Vec<String> = self
            .session
            .form()
            .missing_required()
            .iter()
            .map(|field| field.label.clone())
            .collect();

        self.status_message = Some(if missing.is_empty() {
            "All required fields are filled".to_string()
        } else {
            format!("Missing: {}", missing.join(", "))
        });
        tracing::info!("Submit check: {} missing fields", missing.len());
    }

    fn focused_is_checkbox(&self) -> bool {
        self.session
            .form()
            .active_field()
            .is_some_and(|field| field.is_checkbox())
    }

    fn remember_focus(&mut self) {
        self.focus_value = self
            .session
            .form()
            .active_field()
            .map(|field| (field.id.clone(), field.value.clone()));
    }

    /// Dispatch a change for the focused field if its value moved since it gained focus
    fn commit_focused(&mut self) {
        let Some((id, previous)) = self.focus_value.take() else {
            return;
        };
        let changed = self
            .session
            .form()
            .get_field(&id)
            .is_some_and(|field| field.value != previous);
        if changed && self.session.engine().drives(&id) {
            let ctx = self.context();
            let applied = self.session.dispatch(&ChangeEvent::new(id, previous), &ctx);
            self.start_reveals(&applied);
        }
        self.remember_focus();
    }

    fn toggle_focused(&mut self) {
        let Some(id) = self.session.form().active_field().map(|f| f.id.clone()) else {
            return;
        };
        let ctx = self.context();
        let applied = self.session.toggle(&id, &ctx);
        self.start_reveals(&applied);
        self.remember_focus();
    }

    fn cycle_select(&mut self, forward: bool) {
        let Some(field) = self.session.form_mut().get_active_field_mut() else {
            return;
        };
        let previous = field.value.clone();
        if !field.cycle_option(forward) {
            return;
        }
        let event = ChangeEvent::new(field.id.clone(), previous);
        let ctx = self.context();
        let applied = self.session.dispatch(&event, &ctx);
        self.start_reveals(&applied);
        self.remember_focus();
    }

    fn start_reveals(&mut self, applied: &[FieldDelta]) {
        let duration = self.config.reveal_duration();
        for delta in applied {
            if let FieldChange::SetVisible(visible) = delta.change {
                let direction = if visible {
                    RevealDirection::Show
                } else {
                    RevealDirection::Hide
                };
                self.reveals
                    .insert(delta.field.clone(), RevealState::new(direction, duration));
            }
        }
    }
}

fn context_for(config: &FormsConfig) -> EvalContext {
    EvalContext::new(chrono::Local::now().date_naive())
        .with_classifier(config.classifier())
        .with_clear_policy(config.clear_policy())
}
