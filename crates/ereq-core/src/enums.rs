//! Status enums for the entry requirements manager.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! State enums provide `allowed_next_states()` to enforce valid transitions at
//! the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EditState
// ---------------------------------------------------------------------------

/// Lifecycle of a single record edit.
///
/// ```text
/// idle → editing → saving → saved       → idle
///           ↑   ↘ idle        → save_failed → editing
///           └──────────────────────┘
/// ```
///
/// `saving` is entered only on an explicit commit. A failed save returns to
/// `editing` with the draft preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    Idle,
    Editing,
    Saving,
    Saved,
    SaveFailed,
}

impl EditState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Editing],
            Self::Editing => &[Self::Saving, Self::Idle],
            Self::Saving => &[Self::Saved, Self::SaveFailed],
            Self::Saved => &[Self::Idle],
            Self::SaveFailed => &[Self::Editing],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::Saving => "saving",
            Self::Saved => "saved",
            Self::SaveFailed => "save_failed",
        }
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExportFormat
// ---------------------------------------------------------------------------

/// Shape of an exported requirements table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Tab-separated plain text.
    Text,
    /// Bordered HTML table with a heading.
    Html,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
