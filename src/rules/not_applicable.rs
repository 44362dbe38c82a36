//! "Não se aplica" checkboxes that disable and empty their companion field
//!
//! A flag with id `<base>_nao_se_aplica` controls the field with id `<base>`.
//! Pairs are registered when a template is built, never looked up by
//! matching ids while handling an event.

use super::delta::{FieldDelta, FieldId, FormSurface};

/// Suffix that marks a field as a "does not apply" flag
pub const NOT_APPLICABLE_SUFFIX: &str = "_nao_se_aplica";

/// A flag checkbox and the field it switches off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusivityPair {
    flag: FieldId,
    companion: FieldId,
}

impl ExclusivityPair {
    /// Pair for `companion`, whose flag is `<companion>_nao_se_aplica`
    pub fn for_companion(companion: &str) -> Self {
        Self {
            flag: format!("{companion}{NOT_APPLICABLE_SUFFIX}"),
            companion: companion.to_string(),
        }
    }

    /// Pair for a flag id; `None` if the id does not follow the convention
    pub fn from_flag_id(flag: &str) -> Option<Self> {
        match flag.strip_suffix(NOT_APPLICABLE_SUFFIX) {
            Some(base) if !base.is_empty() => Some(Self {
                flag: flag.to_string(),
                companion: base.to_string(),
            }),
            _ => None,
        }
    }

    /// Register a pair for every flag id whose companion is also present.
    ///
    /// A flag without a companion is a template defect; it is logged and
    /// left without a rule.
    pub fn discover<'a>(ids: impl IntoIterator<Item = &'a str> + Clone) -> Vec<Self> {
        let known: Vec<&str> = ids.clone().into_iter().collect();
        ids.into_iter()
            .filter_map(Self::from_flag_id)
            .filter(|pair| {
                let found = known.contains(&pair.companion.as_str());
                if !found {
                    tracing::warn!(
                        "Flag {} has no companion field {}; ignoring it",
                        pair.flag,
                        pair.companion
                    );
                }
                found
            })
            .collect()
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    #[cfg(test)]
    pub fn companion(&self) -> &str {
        &self.companion
    }

    /// Load-time sync: an empty companion means "does not apply"
    pub fn initialize(&self, form: &dyn FormSurface) -> Vec<FieldDelta> {
        let Some(companion) = form.field(&self.companion) else {
            tracing::warn!("Companion field {} is missing from the form", self.companion);
            return Vec::new();
        };
        if companion.value.is_empty() {
            vec![
                FieldDelta::checked(self.flag.as_str(), true),
                FieldDelta::disabled(self.companion.as_str(), true),
            ]
        } else {
            Vec::new()
        }
    }

    /// The flag was toggled by the user
    pub fn on_flag_change(&self, form: &dyn FormSurface) -> Vec<FieldDelta> {
        let Some(flag) = form.field(&self.flag) else {
            tracing::warn!("Flag field {} is missing from the form", self.flag);
            return Vec::new();
        };
        if flag.checked {
            vec![
                FieldDelta::disabled(self.companion.as_str(), true),
                FieldDelta::clear(self.companion.as_str()),
            ]
        } else {
            vec![FieldDelta::disabled(self.companion.as_str(), false)]
        }
    }
}
