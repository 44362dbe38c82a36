//! Form templates: which fields a form has and which rules tie them together

use serde::{Deserialize, Serialize};

use super::field::FormField;
use super::form_state::Form;
use crate::rules::{
    DependencyEngine, DependencyRule, ExclusivityPair, GuardianRule, VoterTitleRule,
};

pub const BIRTH_DATE: &str = "id_nascimento";
pub const GUARDIAN_NAME: &str = "id_nome_responsavel";
pub const GUARDIAN_RELATIONSHIP: &str = "id_parentesco_responsavel";
pub const GUARDIAN_EMAIL: &str = "id_email_responsavel";

pub const VOTER_TITLE_FIELDS: [&str; 5] = [
    "id_numero_titulo_eleitor",
    "id_zona_titulo_eleitor",
    "id_secao_titulo_eleitor",
    "id_data_emissao_titulo_eleitor",
    "id_uf_titulo_eleitor",
];

/// Relationship choices offered for the guardian
pub const RELATIONSHIPS: [&str; 4] = ["Pai/Mãe", "Avô/Avó", "Tio/Tia", "Outro"];

/// Course fields that may be marked as "does not apply": (id, label)
const COURSE_OPTIONAL_FIELDS: [(&str, &str); 10] = [
    ("id_codigo", "Código"),
    ("id_conceito", "Conceito"),
    ("id_cpc", "CPC"),
    ("id_enade", "ENADE"),
    ("id_ch_estagio", "CH de estágio"),
    ("id_ch_tcc", "CH de TCC"),
    ("id_ch_rel_estagio", "CH de relatório de estágio"),
    ("id_ch_pratica_docente", "CH de prática docente"),
    ("id_ch_atividades_comp", "CH de atividades complementares"),
    ("id_periodo_min_int", "Período mínimo de integralização"),
];

/// The form layouts the front-end knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormTemplate {
    /// Candidate sign-up: personal data plus guardian for minors
    #[default]
    BasicData,
    /// Enrollment of approved candidates: adds guardian e-mail and voter title
    PreEnrollment,
    /// Course registration with "does not apply" flags
    CourseAdmin,
}

impl FormTemplate {
    pub const ALL: [FormTemplate; 3] = [
        FormTemplate::BasicData,
        FormTemplate::PreEnrollment,
        FormTemplate::CourseAdmin,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FormTemplate::BasicData => "Dados Básicos",
            FormTemplate::PreEnrollment => "Pré-Matrícula",
            FormTemplate::CourseAdmin => "Curso no Campus",
        }
    }

    /// Next template in display order (wraps around)
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn fields(self) -> Vec<FormField> {
        match self {
            FormTemplate::BasicData => {
                let mut fields = personal_fields();
                fields.extend(guardian_fields(false));
                fields
            }
            FormTemplate::PreEnrollment => {
                let mut fields = personal_fields();
                fields.extend(guardian_fields(true));
                fields.extend(voter_title_fields());
                fields
            }
            FormTemplate::CourseAdmin => course_fields(),
        }
    }

    /// Rules for a set of fields built from this template
    pub fn engine(self, fields: &[FormField]) -> DependencyEngine {
        match self {
            FormTemplate::BasicData => DependencyEngine::new().with_rule(DependencyRule::Guardian(
                GuardianRule::new(BIRTH_DATE, [GUARDIAN_NAME, GUARDIAN_RELATIONSHIP]),
            )),
            FormTemplate::PreEnrollment => DependencyEngine::new()
                .with_rule(DependencyRule::Guardian(GuardianRule::new(
                    BIRTH_DATE,
                    [GUARDIAN_NAME, GUARDIAN_RELATIONSHIP, GUARDIAN_EMAIL],
                )))
                .with_rule(DependencyRule::VoterTitle(VoterTitleRule::new(
                    BIRTH_DATE,
                    VOTER_TITLE_FIELDS,
                ))),
            FormTemplate::CourseAdmin => DependencyEngine::new().with_rules(
                ExclusivityPair::discover(fields.iter().map(|f| f.id.as_str()))
                    .into_iter()
                    .map(DependencyRule::NotApplicable),
            ),
        }
    }

    /// Build an unevaluated form
    pub fn build(self) -> Form {
        Form::new(self.title(), self.fields())
    }
}

fn personal_fields() -> Vec<FormField> {
    vec![
        FormField::text("id_cpf", "CPF").with_required(true),
        FormField::text("id_nome", "Nome").with_required(true),
        FormField::date(BIRTH_DATE, "Data de nascimento").with_required(true),
    ]
}

fn guardian_fields(with_email: bool) -> Vec<FormField> {
    let mut fields = vec![
        FormField::text(GUARDIAN_NAME, "Nome do responsável"),
        FormField::select(GUARDIAN_RELATIONSHIP, "Grau de parentesco", &RELATIONSHIPS),
    ];
    if with_email {
        fields.push(FormField::text(GUARDIAN_EMAIL, "E-mail do responsável"));
    }
    fields
}

fn voter_title_fields() -> Vec<FormField> {
    let labels = ["Título de eleitor", "Zona", "Seção", "Data de emissão", "Estado emissor"];
    VOTER_TITLE_FIELDS
        .iter()
        .zip(labels)
        .map(|(id, label)| {
            if *id == "id_data_emissao_titulo_eleitor" {
                FormField::date(id, label)
            } else {
                FormField::text(id, label)
            }
        })
        .collect()
}

fn course_fields() -> Vec<FormField> {
    let mut fields = vec![FormField::text("id_nome_curso", "Nome do curso").with_required(true)];
    for (id, label) in COURSE_OPTIONAL_FIELDS {
        let pair = ExclusivityPair::for_companion(id);
        fields.push(FormField::text(id, label));
        fields.push(FormField::checkbox(pair.flag(), "Não se aplica"));
    }
    fields.push(FormField::text("id_ch_minima", "CH mínima").with_required(true));
    fields
}
