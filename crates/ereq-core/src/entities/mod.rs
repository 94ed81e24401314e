//! Entity structs mirroring the spreadsheet.
//!
//! The requirements sheet maps to [`FieldSchema`] + [`Record`], the changelog
//! sheet to [`AuditEntry`]. All serializable entities derive `JsonSchema` for
//! JSON roundtrip and schema validation.

mod audit;
mod profile;
mod record;
mod schema;

pub use audit::{AUDIT_COLUMNS, AuditEntry, FieldChange, LastUpdate};
pub use profile::UserProfile;
pub use record::{Record, percent_complete};
pub use schema::FieldSchema;
