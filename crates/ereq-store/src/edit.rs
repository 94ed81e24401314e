//! State of one in-progress record edit.

use std::collections::BTreeMap;

use ereq_core::CoreError;
use ereq_core::entities::Record;
use ereq_core::enums::EditState;

use crate::error::StoreError;

/// A draft of a record's field values plus where the edit is in its
/// lifecycle (see [`EditState`]).
///
/// The draft survives a failed save so the user can retry without
/// re-entering anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    index: usize,
    record_key: String,
    state: EditState,
    draft: BTreeMap<String, String>,
}

impl EditSession {
    /// An idle edit of the record at `index`.
    #[must_use]
    pub fn new(index: usize, record_key: &str) -> Self {
        Self {
            index,
            record_key: record_key.to_string(),
            state: EditState::Idle,
            draft: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn record_key(&self) -> &str {
        &self.record_key
    }

    #[must_use]
    pub const fn state(&self) -> EditState {
        self.state
    }

    #[must_use]
    pub const fn draft(&self) -> &BTreeMap<String, String> {
        &self.draft
    }

    /// Open the edit form, seeding the draft from the cached record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTransition` unless idle.
    pub fn begin(&mut self, current: &Record) -> Result<(), StoreError> {
        self.transition(EditState::Editing)?;
        self.draft.clone_from(&current.fields);
        Ok(())
    }

    /// Change one value of the draft.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTransition` unless editing.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), StoreError> {
        self.require(EditState::Editing)?;
        self.draft.insert(field.to_string(), value.to_string());
        Ok(())
    }

    /// Discard the draft and go back to idle.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTransition` unless editing or saved.
    pub fn close(&mut self) -> Result<(), StoreError> {
        self.transition(EditState::Idle)?;
        self.draft.clear();
        Ok(())
    }

    /// Go back to editing after a failed save, keeping the draft.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTransition` unless the save failed.
    pub fn resume(&mut self) -> Result<(), StoreError> {
        self.transition(EditState::Editing)
    }

    /// Enter `saving` on an explicit commit.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTransition` unless editing.
    pub fn start_save(&mut self) -> Result<(), StoreError> {
        self.transition(EditState::Saving)
    }

    /// Record how the save ended.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTransition` unless saving.
    pub fn finish_save(&mut self, succeeded: bool) -> Result<(), StoreError> {
        self.transition(if succeeded {
            EditState::Saved
        } else {
            EditState::SaveFailed
        })
    }

    fn require(&self, expected: EditState) -> Result<(), StoreError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(expected))
        }
    }

    fn transition(&mut self, next: EditState) -> Result<(), StoreError> {
        if !self.state.can_transition_to(next) {
            return Err(self.invalid(next));
        }
        tracing::debug!(key = %self.record_key, from = %self.state, to = %next, "edit state");
        self.state = next;
        Ok(())
    }

    fn invalid(&self, to: EditState) -> StoreError {
        CoreError::InvalidTransition {
            entity: "edit".into(),
            key: self.record_key.clone(),
            from: self.state.to_string(),
            to: to.to_string(),
        }
        .into()
    }
}
