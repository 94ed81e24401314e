//! Allow-list check against the access tab.

use std::collections::HashSet;

use ereq_sheets::{SheetLayout, SheetsApi};

use crate::error::StoreError;

/// Every cell that looks like an email address, trimmed and lower-cased.
#[must_use]
pub fn allowed_identities<R: AsRef<[S]>, S: AsRef<str>>(rows: &[R]) -> HashSet<String> {
    rows.iter()
        .flat_map(|row| row.as_ref().iter())
        .map(|cell| cell.as_ref().trim().to_lowercase())
        .filter(|cell| cell.contains('@'))
        .collect()
}

/// Check that `email` is on the access list.
///
/// # Errors
///
/// Returns `StoreError::RemoteRead` if the list cannot be read and
/// `StoreError::AccessDenied` if the email is not on it.
pub async fn verify<S: SheetsApi + ?Sized>(
    sheets: &S,
    layout: &SheetLayout,
    email: &str,
) -> Result<(), StoreError> {
    let rows = sheets
        .read_range(&layout.access_range())
        .await
        .map_err(|source| StoreError::RemoteRead {
            what: "access list",
            source,
        })?;

    let allowed = allowed_identities(&rows);
    if allowed.contains(&email.trim().to_lowercase()) {
        tracing::debug!(email, "access granted");
        Ok(())
    } else {
        tracing::warn!(email, allowed = allowed.len(), "access denied");
        Err(StoreError::AccessDenied {
            email: email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemorySheets;
    use pretty_assertions::assert_eq;

    #[test]
    fn identities_are_normalised() {
        let allowed = allowed_identities(&[
            vec!["Email".to_string()],
            vec!["  Ana@Uni.EDU ".to_string()],
            vec![String::new()],
            vec!["not an address".to_string()],
            vec!["bo@uni.edu".to_string(), "extra@uni.edu".to_string()],
        ]);
        let mut sorted: Vec<&str> = allowed.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        assert_eq!(sorted, ["ana@uni.edu", "bo@uni.edu", "extra@uni.edu"]);
    }

    #[tokio::test]
    async fn listed_email_passes_case_insensitively() {
        let sheets = MemorySheets::new().with_range("Access!A:A", &[&["Email"], &["ana@uni.edu"]]);
        verify(&sheets, &SheetLayout::default(), "Ana@Uni.edu")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unlisted_email_is_denied() {
        let sheets = MemorySheets::new().with_range("Access!A:A", &[&["ana@uni.edu"]]);
        let err = verify(&sheets, &SheetLayout::default(), "eve@else.com")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "eve@else.com does not have access to this sheet");
    }

    #[tokio::test]
    async fn unreadable_list_is_remote_read() {
        let sheets = MemorySheets::new();
        sheets.fail_read("Access!A:A", "Unable to parse range: Access!A:A");
        let result = verify(&sheets, &SheetLayout::default(), "ana@uni.edu").await;
        assert!(matches!(result, Err(StoreError::RemoteRead { what: "access list", .. })));
    }
}
