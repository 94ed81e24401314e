//! CLI response types returned as JSON by `ereq` commands.
//!
//! These structs define the shape of output for `ereq list`, `ereq view`,
//! `ereq edit`/`ereq set`, `ereq history`, and `ereq changelog`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AuditEntry, FieldChange, LastUpdate};

/// One programme line of `ereq list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProgrammeSummary {
    pub programme: String,
    pub filled: u32,
    pub total: u32,
    pub percent_complete: u8,
    pub last_updated: Option<LastUpdate>,
}

/// Response from `ereq list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProgrammeListResponse {
    pub query: Option<String>,
    pub programmes: Vec<ProgrammeSummary>,
    pub total_programmes: u32,
}

/// A filled qualification and its requirement text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Requirement {
    pub qualification: String,
    pub requirement: String,
}

/// Response from `ereq view`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProgrammeViewResponse {
    pub programme: String,
    pub summary: String,
    pub requirements: Vec<Requirement>,
    pub last_updated: Option<LastUpdate>,
}

/// Response from `ereq edit` and `ereq set`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SaveResponse {
    pub programme: String,
    pub saved: bool,
    pub fields_changed: u32,
    pub changes: Vec<FieldChange>,
    /// Set when the row was saved but the changelog append failed.
    pub audit_warning: Option<String>,
    /// Unsaved input, echoed back when the save was rejected.
    pub draft: Option<BTreeMap<String, String>>,
    pub message: String,
}

/// Response from `ereq history` and `ereq changelog`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditListResponse {
    pub programme: Option<String>,
    pub entries: Vec<AuditEntry>,
    pub total_entries: u32,
}
