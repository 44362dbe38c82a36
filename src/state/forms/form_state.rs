//! Form state: an ordered set of fields with a focus cursor

use super::field::FormField;
use crate::rules::{FieldDelta, FieldSnapshot, FormSurface};

/// A rendered form: fields in display order plus the focused field
#[derive(Debug, Clone)]
pub struct Form {
    pub title: String,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl Form {
    pub fn new(title: &str, fields: Vec<FormField>) -> Self {
        let mut form = Self {
            title: title.to_string(),
            fields,
            active_field_index: 0,
        };
        form.ensure_focus();
        form
    }

    #[cfg(test)]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn get_field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get_field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn active_field(&self) -> Option<&FormField> {
        self.fields.get(self.active_field_index)
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }

    /// Move focus to the next interactive field (wraps around)
    pub fn next_field(&mut self) {
        self.step_focus(true);
    }

    /// Move focus to the previous interactive field (wraps around)
    pub fn prev_field(&mut self) {
        self.step_focus(false);
    }

    fn step_focus(&mut self, forward: bool) {
        let count = self.fields.len();
        if count == 0 {
            return;
        }
        let mut index = self.active_field_index;
        for _ in 0..count {
            index = if forward {
                (index + 1) % count
            } else if index == 0 {
                count - 1
            } else {
                index - 1
            };
            if self.fields[index].is_interactive() {
                self.active_field_index = index;
                return;
            }
        }
    }

    /// Move focus off a field that became hidden or disabled
    pub fn ensure_focus(&mut self) {
        let focused_ok = self
            .fields
            .get(self.active_field_index)
            .is_some_and(|f| f.is_interactive());
        if !focused_ok {
            self.step_focus(true);
        }
    }

    /// Fields that would block submission: shown, enabled, required and blank
    pub fn missing_required(&self) -> Vec<&FormField> {
        self.fields
            .iter()
            .filter(|f| f.visible && !f.disabled && f.required && f.is_blank())
            .collect()
    }
}

impl FormSurface for Form {
    fn field(&self, id: &str) -> Option<FieldSnapshot> {
        self.get_field(id).map(FormField::snapshot)
    }

    fn apply(&mut self, delta: &FieldDelta) -> bool {
        match self.get_field_mut(&delta.field) {
            Some(field) => field.apply(delta.change),
            None => false,
        }
    }
}
