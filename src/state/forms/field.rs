//! Form field value objects

use crate::rules::{FieldChange, FieldSnapshot};

/// What kind of input a field is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Masked `dd/mm/yyyy` input
    Date,
    Checkbox,
    Select { options: Vec<String> },
}

/// Represents a single form field with its configuration and state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
    pub required: bool,
    pub disabled: bool,
    pub visible: bool,
}

impl FormField {
    fn new(id: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            value: String::new(),
            checked: false,
            required: false,
            disabled: false,
            visible: true,
        }
    }

    /// Create a new text field
    pub fn text(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    /// Create a new date field
    pub fn date(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Date)
    }

    /// Create a new checkbox
    pub fn checkbox(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Checkbox)
    }

    /// Create a new select field; the empty value means nothing is selected
    pub fn select(id: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            id,
            label,
            FieldKind::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        )
    }

    #[cfg(test)]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    #[cfg(test)]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }

    /// Whether the field would fail a "required" check
    pub fn is_blank(&self) -> bool {
        if self.is_checkbox() {
            !self.checked
        } else {
            self.value.trim().is_empty()
        }
    }

    /// Whether the user can focus and edit the field
    pub fn is_interactive(&self) -> bool {
        self.visible && !self.disabled
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if self.disabled {
            return;
        }
        match self.kind {
            FieldKind::Text => self.value.push(c),
            FieldKind::Date => {
                // Same character set the date mask lets through
                if c.is_ascii_digit() || matches!(c, '/' | ' ' | ':') {
                    self.value.push(c);
                }
            }
            FieldKind::Checkbox | FieldKind::Select { .. } => {}
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if self.disabled {
            return;
        }
        if matches!(self.kind, FieldKind::Text | FieldKind::Date) {
            self.value.pop();
        }
    }

    /// Flip a checkbox; returns false for other kinds or disabled fields
    pub fn toggle(&mut self) -> bool {
        if !self.is_checkbox() || self.disabled {
            return false;
        }
        self.checked = !self.checked;
        true
    }

    /// Step through select options, wrapping through "nothing selected"
    pub fn cycle_option(&mut self, forward: bool) -> bool {
        if self.disabled {
            return false;
        }
        let FieldKind::Select { options } = &self.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }
        // Slot 0 is the empty selection, slots 1..=n are the options
        let slots = options.len() + 1;
        let current = options
            .iter()
            .position(|o| *o == self.value)
            .map(|i| i + 1)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.value = if next == 0 {
            String::new()
        } else {
            options[next - 1].clone()
        };
        true
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Checkbox => {
                if self.checked {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            FieldKind::Select { .. } if self.value.is_empty() => "---------".to_string(),
            FieldKind::Date if self.value.is_empty() => "__/__/____".to_string(),
            _ => self.value.clone(),
        }
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            value: self.value.clone(),
            checked: self.checked,
            required: self.required,
            disabled: self.disabled,
            visible: self.visible,
        }
    }

    /// Apply a rule change; returns true if anything changed
    pub fn apply(&mut self, change: FieldChange) -> bool {
        let (flag, target) = match change {
            FieldChange::SetRequired(v) => (&mut self.required, v),
            FieldChange::SetVisible(v) => (&mut self.visible, v),
            FieldChange::SetDisabled(v) => (&mut self.disabled, v),
            FieldChange::SetChecked(v) => (&mut self.checked, v),
            FieldChange::ClearValue => return !std::mem::take(&mut self.value).is_empty(),
        };
        if *flag == target {
            false
        } else {
            *flag = target;
            true
        }
    }
}
