use serde::{Deserialize, Serialize};
use std::fmt;

/// Problem found in a user-entered value before document generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueIssue {
    /// Normalized key of the offending field.
    pub key: String,
    pub kind: ValueIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ValueIssueKind {
    /// Required field left empty or blank.
    MissingRequired,
    /// Value longer than the field's character cap.
    TooLong { max: u32, actual: usize },
    /// Email field that does not look like an address.
    InvalidEmail,
}

impl fmt::Display for ValueIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueIssueKind::MissingRequired => write!(f, "{}: required value missing", self.key),
            ValueIssueKind::TooLong { max, actual } => {
                write!(f, "{}: {actual} characters exceeds limit of {max}", self.key)
            }
            ValueIssueKind::InvalidEmail => write!(f, "{}: not a valid email address", self.key),
        }
    }
}
