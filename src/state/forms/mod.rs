//! Form domain layer
//!
//! Fields, forms and the templates that describe which fields a form has
//! and which dependency rules connect them.

mod field;
mod form_state;
mod template;

pub use field::{FieldKind, FormField};
pub use form_state::Form;
pub use template::{
    FormTemplate, BIRTH_DATE, GUARDIAN_EMAIL, GUARDIAN_NAME, GUARDIAN_RELATIONSHIP,
    VOTER_TITLE_FIELDS,
};
