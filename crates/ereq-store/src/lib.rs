//! # ereq-store
//!
//! Sheet-backed record store with an append-only changelog.
//!
//! Loads the records tab into a [`RecordCache`] and the changelog into an
//! [`AuditLog`] (newest first, with a last-updated index per record). Saves
//! overwrite the record remotely, update the cache, and append one changelog
//! row per changed field. A failed changelog append is reported as a warning,
//! never as a failed save.

pub mod access;
pub mod audit;
pub mod commit;
pub mod edit;
pub mod error;
pub mod records;
pub mod session;
pub mod store;
mod test_support;

pub use audit::AuditLog;
pub use commit::{CommitOutcome, compute_changes};
pub use edit::EditSession;
pub use error::StoreError;
pub use records::RecordCache;
pub use session::Session;
pub use store::EntryStore;
