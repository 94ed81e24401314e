//! Shared test utilities for ereq-store.

#[cfg(test)]
pub(crate) use fake::MemorySheets;
