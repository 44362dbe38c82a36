//! Form dependency rules
//!
//! Each rule reads its driving field through a [`FormSurface`] and answers
//! with [`FieldDelta`]s. Deciding and applying are separate steps, so every
//! rule can be exercised without a UI.

pub mod age;
mod delta;
mod engine;
mod guardian;
mod not_applicable;
mod session;
mod voter_title;

pub use age::{AdultThreshold, AgeClassifier, Classification};
pub use delta::{FieldChange, FieldDelta, FieldId, FieldSnapshot, FormSurface};
pub use engine::{ChangeEvent, ClearPolicy, DependencyEngine, DependencyRule, EvalContext};
pub use guardian::GuardianRule;
pub use not_applicable::ExclusivityPair;
pub use session::FormSession;
pub use voter_title::VoterTitleRule;
