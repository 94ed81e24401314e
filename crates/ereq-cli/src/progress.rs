use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// The slow remote steps a command waits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    SignIn,
    LoadSheet,
    Save,
}

impl Phase {
    const fn message(self) -> &'static str {
        match self {
            Self::SignIn => "Signing in…",
            Self::LoadSheet => "Loading sheet…",
            Self::Save => "Saving…",
        }
    }

    const fn failure(self) -> &'static str {
        match self {
            Self::SignIn => "Sign-in failed",
            Self::LoadSheet => "Could not load the sheet",
            Self::Save => "Save failed",
        }
    }
}

/// A spinner on stderr naming the current phase, or nothing when output is
/// not interactive.
pub struct Progress {
    bar: Option<ProgressBar>,
    phase: Phase,
}

impl Progress {
    #[must_use]
    pub fn start(phase: Phase) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None, phase };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(phase.message());
        Self {
            bar: Some(bar),
            phase,
        }
    }

    /// Move the same spinner on to the next phase.
    pub fn advance(&mut self, phase: Phase) {
        self.phase = phase;
        if let Some(bar) = &self.bar {
            bar.set_message(phase.message());
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(format!("✔ {message}"));
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Leave the phase's failure text on screen.
    pub fn fail(&self) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(format!("✖ {}", self.phase.failure()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Phase;

    #[test]
    fn every_phase_names_its_failure() {
        for phase in [Phase::SignIn, Phase::LoadSheet, Phase::Save] {
            assert!(phase.message().ends_with('…'));
            assert!(!phase.failure().is_empty());
        }
    }
}
