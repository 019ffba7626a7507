use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a one-shot command waits on the provider.
///
/// Only drawn for human output on a terminal; otherwise the wait is logged.
pub struct FetchSpinner {
    spinner: Option<ProgressBar>,
}

impl FetchSpinner {
    pub fn start(message: impl Into<String>, output: &Output) -> Self {
        let message = message.into();
        if !(is_interactive() && output.is_human()) {
            tracing::info!(operation = "fetch", message = %message, "Waiting for movie provider");
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
        {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));

        Self { spinner: Some(spinner) }
    }

    pub fn finish(self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
