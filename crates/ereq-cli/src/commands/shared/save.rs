use ereq_core::responses::SaveResponse;
use ereq_store::{CommitOutcome, EditSession, StoreError};

use crate::cli::GlobalFlags;
use crate::output::output_tabular;
use crate::progress::Progress;

/// Toast-style summary of a successful save.
#[must_use]
pub fn saved_message(programme: &str, fields_changed: usize) -> String {
    match fields_changed {
        0 => format!("\"{programme}\" saved (no changes)"),
        1 => format!("\"{programme}\" saved, 1 field changed"),
        n => format!("\"{programme}\" saved, {n} fields changed"),
    }
}

#[must_use]
pub fn saved_response(programme: &str, outcome: CommitOutcome) -> SaveResponse {
    let fields_changed = outcome.fields_changed();
    SaveResponse {
        programme: programme.to_string(),
        saved: true,
        fields_changed: u32::try_from(fields_changed).unwrap_or(u32::MAX),
        message: saved_message(programme, fields_changed),
        changes: outcome.changes,
        audit_warning: outcome.audit_warning,
        draft: None,
    }
}

/// A rejected save, echoing the unsaved draft so nothing typed is lost.
#[must_use]
pub fn failed_response(edit: &EditSession, error: &StoreError) -> SaveResponse {
    SaveResponse {
        programme: edit.record_key().to_string(),
        saved: false,
        fields_changed: 0,
        changes: Vec::new(),
        audit_warning: None,
        draft: Some(edit.draft().clone()),
        message: error.to_string(),
    }
}

/// Print the outcome of a save attempt and turn a rejection into an error exit.
pub fn report(
    edit: &EditSession,
    result: Result<CommitOutcome, StoreError>,
    spinner: &Progress,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match result {
        Ok(outcome) => {
            let response = saved_response(edit.record_key(), outcome);
            spinner.finish_ok(&response.message);
            if let Some(warning) = &response.audit_warning
                && flags.shows_notes()
            {
                eprintln!("warning: {warning}");
            }
            output_tabular(&response, flags.format)
        }
        Err(error @ StoreError::Save(_)) => {
            spinner.fail();
            output_tabular(&failed_response(edit, &error), flags.format)?;
            Err(error.into())
        }
        Err(error) => {
            spinner.fail();
            Err(error.into())
        }
    }
}
