//! Store error types for ereq-store.

use ereq_core::CoreError;
use ereq_sheets::SheetsError;
use thiserror::Error;

/// Errors from loading, reading, and committing records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A bulk read of the sheet failed.
    #[error("could not load {what}: {source}")]
    RemoteRead {
        what: &'static str,
        #[source]
        source: SheetsError,
    },

    /// The record overwrite was rejected; nothing was changed.
    #[error("Save failed: {0}")]
    Save(#[source] SheetsError),

    /// The record was saved but the changelog append failed.
    #[error("saved, but the changelog was not updated: {0}")]
    AuditWrite(#[source] SheetsError),

    /// Signed in, but not on the access list.
    #[error("{email} does not have access to this sheet")]
    AccessDenied { email: String },

    /// The sheet contents do not form a usable table.
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Input failed validation against the schema.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("cannot move {entity} from {from} to {to}")]
    InvalidTransition {
        entity: String,
        from: String,
        to: String,
    },

    /// The session was reset (signed out) or never opened.
    #[error("not signed in")]
    NotAuthenticated,
}

impl From<CoreError> for StoreError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidTransition {
                entity, from, to, ..
            } => Self::InvalidTransition { entity, from, to },
            CoreError::Schema(msg) => Self::Schema(msg),
            CoreError::Validation(msg) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_error_carries_remote_message() {
        let err = StoreError::Save(SheetsError::Api {
            status: 403,
            message: "The caller does not have permission".into(),
        });
        assert_eq!(err.to_string(), "Save failed: The caller does not have permission");
    }

    #[test]
    fn core_errors_keep_their_kind() {
        let err: StoreError = CoreError::Schema("header row is empty".into()).into();
        assert!(matches!(err, StoreError::Schema(_)));

        let err: StoreError = CoreError::InvalidTransition {
            entity: "edit".into(),
            key: "CS".into(),
            from: "idle".into(),
            to: "saving".into(),
        }
        .into();
        assert_eq!(err.to_string(), "cannot move edit from idle to saving");
    }
}
