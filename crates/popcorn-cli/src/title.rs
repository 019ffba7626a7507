use popcorn_core::DisplaySurface;
use std::io::{self, IsTerminal, Write};
use tracing::debug;

/// Window title of the hosting terminal, set through the OSC 0 escape
pub struct TerminalTitle {
    enabled: bool,
}

impl TerminalTitle {
    pub fn new() -> Self {
        Self {
            enabled: io::stdout().is_terminal(),
        }
    }
}

impl DisplaySurface for TerminalTitle {
    fn set_title(&mut self, title: &str) {
        debug!("Terminal title: {}", title);
        if !self.enabled {
            return;
        }
        let mut stdout = io::stdout();
        if write!(stdout, "{}", osc_title(title)).and_then(|_| stdout.flush()).is_err() {
            // Nowhere left to show it
            self.enabled = false;
        }
    }
}

fn osc_title(title: &str) -> String {
    // Control characters would terminate the sequence early
    let clean: String = title.chars().filter(|c| !c.is_control()).collect();
    format!("\x1b]0;{}\x07", clean)
}
