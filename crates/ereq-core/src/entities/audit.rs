use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::UserProfile;

/// Number of changelog columns: timestamp, actor email, actor name, record
/// key, field name, old value, new value.
pub const AUDIT_COLUMNS: usize = 7;

/// A single field-level change, before it is stamped into an audit entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldChange {
    pub field_name: String,
    pub old_value: String,
    pub new_value: String,
}

/// An immutable changelog row recording one field-level change.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEntry {
    pub timestamp: String,
    pub actor_email: String,
    pub actor_name: String,
    pub record_key: String,
    pub field_name: String,
    pub old_value: String,
    pub new_value: String,
}

impl AuditEntry {
    /// Stamp a change with the acting user and a timestamp.
    #[must_use]
    pub fn stamp(timestamp: &str, actor: &UserProfile, record_key: &str, change: FieldChange) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            actor_email: actor.email.clone(),
            actor_name: actor.name.clone().unwrap_or_default(),
            record_key: record_key.to_string(),
            field_name: change.field_name,
            old_value: change.old_value,
            new_value: change.new_value,
        }
    }

    /// Parse a changelog row, padding missing trailing cells with empty values.
    #[must_use]
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Self {
        let cell = |idx: usize| row.get(idx).map_or_else(String::new, |c| c.as_ref().to_string());
        Self {
            timestamp: cell(0),
            actor_email: cell(1),
            actor_name: cell(2),
            record_key: cell(3),
            field_name: cell(4),
            old_value: cell(5),
            new_value: cell(6),
        }
    }

    /// Render the entry as a changelog row, in column order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.actor_email.clone(),
            self.actor_name.clone(),
            self.record_key.clone(),
            self.field_name.clone(),
            self.old_value.clone(),
            self.new_value.clone(),
        ]
    }

    /// Who made the change: the actor name, else the email.
    #[must_use]
    pub fn actor(&self) -> &str {
        if self.actor_name.trim().is_empty() {
            &self.actor_email
        } else {
            &self.actor_name
        }
    }
}

/// Most recent change for one record, derived from the changelog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LastUpdate {
    pub timestamp: String,
    pub actor: String,
}

impl From<&AuditEntry> for LastUpdate {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            timestamp: entry.timestamp.clone(),
            actor: entry.actor().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn actor() -> UserProfile {
        UserProfile {
            email: "ada@example.edu".into(),
            name: Some("Ada".into()),
            picture: None,
        }
    }

    #[test]
    fn stamp_copies_identity_and_change() {
        let entry = AuditEntry::stamp(
            "2024-03-07 09:05:01",
            &actor(),
            "CS",
            FieldChange {
                field_name: "Maths".into(),
                old_value: String::new(),
                new_value: "A".into(),
            },
        );
        assert_eq!(
            entry.to_row(),
            vec!["2024-03-07 09:05:01", "ada@example.edu", "Ada", "CS", "Maths", "", "A"]
        );
    }

    #[test]
    fn short_row_is_padded() {
        let entry = AuditEntry::from_row(&["2024-03-07 09:05:01", "ada@example.edu", "", "CS", "Maths"]);
        assert_eq!(entry.old_value, "");
        assert_eq!(entry.new_value, "");
        assert_eq!(entry.to_row().len(), AUDIT_COLUMNS);
    }

    #[test]
    fn actor_falls_back_to_email() {
        let entry = AuditEntry::from_row(&["t", "ada@example.edu", " ", "CS"]);
        assert_eq!(entry.actor(), "ada@example.edu");
        assert_eq!(LastUpdate::from(&entry).actor, "ada@example.edu");
    }
}
