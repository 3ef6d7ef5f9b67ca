pub mod category;
pub mod field;
pub mod issue;
pub mod options;
pub mod schema;

pub use category::Category;
pub use field::{FieldEnvelope, RawFieldEntry, WidgetKind};
pub use issue::{ValueIssue, ValueIssueKind};
pub use options::{NormalizerOptions, RequiredDuplicateMode};
pub use schema::{FallbackReason, FormSchema, InputKind, NormalizedFormField, SchemaOrigin};
