//! Errors raised while building domain values from sheet cells.
//!
//! Remote and storage failures live in their own crates (`SheetsError`,
//! `StoreError`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// An edit session was asked to move somewhere its state does not allow.
    #[error("Invalid state transition: {entity} '{key}' from {from} to {to}")]
    InvalidTransition {
        entity: String,
        key: String,
        from: String,
        to: String,
    },

    /// The header row does not describe a usable schema.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A value or field name does not fit the schema.
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    fn transition_error_names_the_record() {
        let err = CoreError::InvalidTransition {
            entity: "edit".into(),
            key: "Law".into(),
            from: "idle".into(),
            to: "saving".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid state transition: edit 'Law' from idle to saving"
        );
    }
}
