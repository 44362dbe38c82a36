//! Field state changes produced by dependency rules

use std::fmt;

/// Stable identifier of a form field (the DOM-style `id_<name>` id)
pub type FieldId = String;

/// One absolute change to a field's state.
///
/// Every variant sets state rather than toggling it, so applying the same
/// change twice leaves the field exactly as applying it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    SetRequired(bool),
    SetVisible(bool),
    SetDisabled(bool),
    SetChecked(bool),
    ClearValue,
}

/// A change targeted at a specific field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDelta {
    pub field: FieldId,
    pub change: FieldChange,
}

impl FieldDelta {
    pub fn new(field: impl Into<FieldId>, change: FieldChange) -> Self {
        Self {
            field: field.into(),
            change,
        }
    }

    pub fn required(field: impl Into<FieldId>, required: bool) -> Self {
        Self::new(field, FieldChange::SetRequired(required))
    }

    pub fn visible(field: impl Into<FieldId>, visible: bool) -> Self {
        Self::new(field, FieldChange::SetVisible(visible))
    }

    pub fn disabled(field: impl Into<FieldId>, disabled: bool) -> Self {
        Self::new(field, FieldChange::SetDisabled(disabled))
    }

    pub fn checked(field: impl Into<FieldId>, checked: bool) -> Self {
        Self::new(field, FieldChange::SetChecked(checked))
    }

    pub fn clear(field: impl Into<FieldId>) -> Self {
        Self::new(field, FieldChange::ClearValue)
    }
}

impl fmt::Display for FieldDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.change {
            FieldChange::SetRequired(v) => write!(f, "{}.required = {v}", self.field),
            FieldChange::SetVisible(v) => write!(f, "{}.visible = {v}", self.field),
            FieldChange::SetDisabled(v) => write!(f, "{}.disabled = {v}", self.field),
            FieldChange::SetChecked(v) => write!(f, "{}.checked = {v}", self.field),
            FieldChange::ClearValue => write!(f, "{}.value = \"\"", self.field),
        }
    }
}

/// Read-only copy of a field's state, as seen by the rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub value: String,
    pub checked: bool,
    pub required: bool,
    pub disabled: bool,
    pub visible: bool,
}

/// Anything that can report field state and apply deltas to it.
///
/// This is the seam between the rule logic and whatever renders the form.
/// Applying a delta must never emit a change event back into the engine.
#[cfg_attr(test, mockall::automock)]
pub trait FormSurface {
    /// Current state of a field, `None` if the form has no such field
    fn field(&self, id: &str) -> Option<FieldSnapshot>;

    /// Apply a delta; returns true if the field's state actually changed
    fn apply(&mut self, delta: &FieldDelta) -> bool;
}
