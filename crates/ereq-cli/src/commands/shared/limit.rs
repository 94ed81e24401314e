/// Number of entries to show: `--limit` when given, else the configured default.
#[must_use]
pub fn entry_count(flag: Option<u32>, configured: u32) -> usize {
    usize::try_from(flag.unwrap_or(configured)).unwrap_or(usize::MAX)
}

/// Convert a limit into a `take` count.
#[must_use]
pub fn as_count(limit: u32) -> usize {
    usize::try_from(limit).unwrap_or(usize::MAX)
}
