use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLUMNS").ok().as_deref(),
    ));
}

fn resolve(flags: &GlobalFlags, is_tty: bool, no_color: bool, columns: Option<&str>) -> UiPrefs {
    let interactive = is_tty && !flags.quiet;
    UiPrefs {
        table_color: interactive && flags.format == OutputFormat::Table && !no_color,
        progress: interactive && flags.format != OutputFormat::Json,
        term_width: columns
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|width| *width >= 40),
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
    })
}
