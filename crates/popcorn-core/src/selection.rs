use popcorn_models::MovieId;
use tracing::debug;

/// Which movie, if any, is open for detail viewing
#[derive(Debug, Default, Clone)]
pub struct SelectionController {
    current: Option<MovieId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `id`, or close it if it is already the open movie.
    /// Returns the selection after the toggle.
    pub fn select(&mut self, id: &str) -> Option<&str> {
        if self.current.as_deref() == Some(id) {
            debug!("Selection toggled closed: {}", id);
            self.current = None;
        } else {
            debug!("Selected {}", id);
            self.current = Some(id.to_string());
        }
        self.current()
    }

    pub fn close(&mut self) {
        if let Some(id) = self.current.take() {
            debug!("Closed selection {}", id);
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}
