//! In-memory questionnaire tree model: fields, options, steps, ordering,
//! visibility and integrity checks.

pub mod answers;
pub mod capability;
pub mod field;
pub mod identity;
pub mod ordering;
pub mod sync;
pub mod validate;
pub mod visibility;

pub use answers::{AnswerEntry, AnswerSet};
pub use field::{Field, FieldInstance, FieldOption, FieldType, Questionnaire, Step};
pub use identity::{IdentitySubForm, extract_identity_field};
pub use ordering::{MoveDirection, next_position, reorder_adjacent};
pub use sync::SyncState;
pub use validate::{IntegrityFinding, validate_questionnaire};
pub use visibility::Visibility;
