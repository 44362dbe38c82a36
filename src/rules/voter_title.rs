//! Voter registration fields, mandatory for adults only

use super::age::is_adult;
use super::delta::{FieldDelta, FieldId, FormSurface};
use super::engine::EvalContext;

/// Adults must fill in the voter registration fieldset; for everyone else it
/// stays optional. Visibility and values are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterTitleRule {
    birth_date: FieldId,
    fields: Vec<FieldId>,
}

impl VoterTitleRule {
    pub fn new<I, S>(birth_date: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldId>,
    {
        Self {
            birth_date: birth_date.to_string(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn driver(&self) -> &str {
        &self.birth_date
    }

    /// Same result on load and on every change
    pub fn evaluate(&self, form: &dyn FormSurface, ctx: &EvalContext) -> Vec<FieldDelta> {
        let Some(driver) = form.field(&self.birth_date) else {
            tracing::warn!("Birth date field {} is missing from the form", self.birth_date);
            return Vec::new();
        };
        let required =
            is_adult(&driver.value, ctx.classifier.threshold(), ctx.today) == Some(true);
        self.fields
            .iter()
            .filter(|id| form.field(id).is_some())
            .map(|id| FieldDelta::required(id.as_str(), required))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Form, FormField};
    use chrono::NaiveDate;

    fn ctx() -> EvalContext {
        EvalContext::new(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
    }

    fn rule() -> VoterTitleRule {
        VoterTitleRule::new(
            "id_nascimento",
            ["id_numero_titulo_eleitor", "id_zona_titulo_eleitor"],
        )
    }

    fn form(birth: &str) -> Form {
        Form::new(
            "Test",
            vec![
                FormField::date("id_nascimento", "Nascimento").with_value(birth),
                FormField::text("id_numero_titulo_eleitor", "Número"),
                FormField::text("id_zona_titulo_eleitor", "Zona"),
            ],
        )
    }

    #[test]
    fn test_adult_requires_voter_fields() {
        let deltas = rule().evaluate(&form("10/05/2006"), &ctx());
        assert_eq!(
            deltas,
            vec![
                FieldDelta::required("id_numero_titulo_eleitor", true),
                FieldDelta::required("id_zona_titulo_eleitor", true),
            ]
        );
    }

    #[test]
    fn test_minor_relaxes_voter_fields() {
        let deltas = rule().evaluate(&form("11/05/2006"), &ctx());
        assert!(deltas.iter().all(|d| d.change == crate::rules::FieldChange::SetRequired(false)));
        assert_eq!(deltas.len(), 2);
    }

    #[test]
    fn test_unknown_relaxes_voter_fields() {
        let deltas = rule().evaluate(&form(""), &ctx());
        assert!(deltas.iter().all(|d| d.change == crate::rules::FieldChange::SetRequired(false)));
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let form = Form::new(
            "Test",
            vec![FormField::date("id_nascimento", "Nascimento").with_value("01/01/1990")],
        );
        assert!(rule().evaluate(&form, &ctx()).is_empty());
    }

    #[test]
    fn test_missing_driver_is_noop() {
        let form = Form::new("Test", vec![FormField::text("id_zona_titulo_eleitor", "Zona")]);
        assert!(rule().evaluate(&form, &ctx()).is_empty());
    }
}
