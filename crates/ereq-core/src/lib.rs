//! # ereq-core
//!
//! Core types shared by every crate of the entry requirements manager:
//! - Field schema and record types mirroring the requirements sheet
//! - Audit entries, field-level changes, and the last-updated view
//! - The signed-in user profile
//! - Edit-session states with their allowed transitions
//! - The sheet timestamp format
//! - CLI response types
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod timestamp;

pub use errors::CoreError;
