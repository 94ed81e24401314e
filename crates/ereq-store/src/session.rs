//! The signed-in session: who is editing and what they loaded.

use std::collections::BTreeMap;

use ereq_core::entities::UserProfile;
use ereq_sheets::{SheetLayout, SheetsApi};

use crate::access;
use crate::commit::CommitOutcome;
use crate::edit::EditSession;
use crate::error::StoreError;
use crate::store::EntryStore;

struct Active<S> {
    profile: UserProfile,
    store: EntryStore<S>,
}

/// One signed-in user and their loaded sheet.
///
/// Everything belongs to the session object; [`Session::reset`] on sign-out
/// drops the profile, the cache, the changelog and the derived index at once.
pub struct Session<S> {
    active: Option<Active<S>>,
}

impl<S: SheetsApi> Session<S> {
    /// Check the user against the access list, then load the sheet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` for users not on the list,
    /// `StoreError::RemoteRead` if the access list or records cannot be read,
    /// and `StoreError::Schema` for a malformed records tab.
    pub async fn open(
        sheets: S,
        layout: SheetLayout,
        profile: UserProfile,
    ) -> Result<Self, StoreError> {
        access::verify(&sheets, &layout, &profile.email).await?;
        let store = EntryStore::load(sheets, layout).await?;
        tracing::info!(
            email = %profile.email,
            records = store.records().len(),
            changelog = store.audit().len(),
            "session opened"
        );
        Ok(Self {
            active: Some(Active { profile, store }),
        })
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.active.as_ref().map(|a| &a.profile)
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotAuthenticated` after a reset.
    pub fn store(&self) -> Result<&EntryStore<S>, StoreError> {
        self.active
            .as_ref()
            .map(|a| &a.store)
            .ok_or(StoreError::NotAuthenticated)
    }

    fn active_mut(&mut self) -> Result<&mut Active<S>, StoreError> {
        self.active.as_mut().ok_or(StoreError::NotAuthenticated)
    }

    /// Forget the user and everything loaded for them.
    pub fn reset(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::debug!(email = %active.profile.email, "session reset");
        }
    }

    /// # Errors
    ///
    /// See [`EntryStore::reload`]; `StoreError::NotAuthenticated` after a reset.
    pub async fn reload(&mut self) -> Result<(), StoreError> {
        self.active_mut()?.store.reload().await
    }

    /// Full-form save as the signed-in user.
    ///
    /// # Errors
    ///
    /// See [`EntryStore::commit_record_edit`]; `StoreError::NotAuthenticated`
    /// after a reset.
    pub async fn commit_record_edit(
        &mut self,
        index: usize,
        values: &BTreeMap<String, String>,
    ) -> Result<CommitOutcome, StoreError> {
        let Active { profile, store } = self.active_mut()?;
        store.commit_record_edit(profile, index, values).await
    }

    /// Quick single-field save as the signed-in user.
    ///
    /// # Errors
    ///
    /// See [`EntryStore::commit_field_edit`]; `StoreError::NotAuthenticated`
    /// after a reset.
    pub async fn commit_field_edit(
        &mut self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<CommitOutcome, StoreError> {
        let Active { profile, store } = self.active_mut()?;
        store.commit_field_edit(profile, index, field, value).await
    }

    /// Start editing the record with `key`, draft seeded from the cache.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown key.
    pub fn begin_edit(&self, key: &str) -> Result<EditSession, StoreError> {
        let records = self.store()?.records();
        let index = records.index_of(key)?;
        let record = records.get(index)?;
        let mut edit = EditSession::new(index, &record.key);
        edit.begin(record)?;
        Ok(edit)
    }

    /// Commit the whole draft of `edit`.
    ///
    /// On failure `edit` ends in `save_failed` with its draft intact.
    ///
    /// # Errors
    ///
    /// See [`Session::commit_record_edit`], plus
    /// `StoreError::InvalidTransition` if `edit` is not being edited.
    pub async fn save_edit(&mut self, edit: &mut EditSession) -> Result<CommitOutcome, StoreError> {
        edit.start_save()?;
        let result = self.commit_record_edit(edit.index(), edit.draft()).await;
        edit.finish_save(result.is_ok())?;
        result
    }

    /// Commit one field of the draft of `edit` as a single-cell write.
    ///
    /// # Errors
    ///
    /// See [`Session::save_edit`].
    pub async fn save_field(
        &mut self,
        edit: &mut EditSession,
        field: &str,
    ) -> Result<CommitOutcome, StoreError> {
        edit.start_save()?;
        let value = edit.draft().get(field).cloned().unwrap_or_default();
        let result = self.commit_field_edit(edit.index(), field, &value).await;
        edit.finish_save(result.is_ok())?;
        result
    }
}
