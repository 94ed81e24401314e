use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    /// Overrides `general.default_limit` for history and changelog.
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
}

impl GlobalFlags {
    /// Human-facing notes (summaries, warnings) go to the terminal only when
    /// not quiet.
    #[must_use]
    pub const fn shows_notes(&self) -> bool {
        !self.quiet
    }

    /// Lines printed above a table, which would corrupt JSON output.
    #[must_use]
    pub fn shows_table_notes(&self) -> bool {
        self.shows_notes() && self.format == OutputFormat::Table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            quiet,
            verbose: false,
        }
    }

    #[test]
    fn table_notes_only_for_table_output() {
        assert!(flags(OutputFormat::Table, false).shows_table_notes());
        assert!(!flags(OutputFormat::Json, false).shows_table_notes());
        assert!(!flags(OutputFormat::Table, true).shows_table_notes());
        assert!(flags(OutputFormat::Json, false).shows_notes());
    }
}
