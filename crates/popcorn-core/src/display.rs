/// Title shown whenever no movie detail is open
pub const DEFAULT_TITLE: &str = "usePopcorn";

/// An external place the app can label with the movie being viewed
/// (a window title, a terminal title)
pub trait DisplaySurface: Send {
    fn set_title(&mut self, title: &str);
}

/// Surface for environments without one
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl DisplaySurface for NullSurface {
    fn set_title(&mut self, _title: &str) {}
}

pub fn movie_title(title: &str) -> String {
    format!("Movie | {}", title)
}
