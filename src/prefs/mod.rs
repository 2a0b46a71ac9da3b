use crate::domain::theme::{THEME_KEY, Theme};

pub mod memory;
pub mod sqlite;

/// Key/value store for user preferences. Neither call may fail from the
/// caller's point of view: an unreadable store reads as absent and a failed
/// write is dropped.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for Box<P> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) {
        (**self).write(key, value)
    }
}

pub fn load_theme<P: PreferenceStore + ?Sized>(prefs: &P) -> Theme {
    match prefs.read(THEME_KEY) {
        Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(value = %raw, "ignoring unknown stored theme");
            Theme::default()
        }),
        None => Theme::default(),
    }
}

pub fn save_theme<P: PreferenceStore + ?Sized>(prefs: &mut P, theme: Theme) {
    prefs.write(THEME_KEY, theme.as_str());
}
