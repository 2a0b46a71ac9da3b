use std::collections::HashMap;

use super::PreferenceStore;

#[derive(Debug, Default, Clone)]
pub struct InMemoryPrefs {
    entries: HashMap<String, String>,
}

impl InMemoryPrefs {
    #[cfg(test)]
    pub fn with_entries<K, V>(seed: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut prefs = Self::default();
        prefs
            .entries
            .extend(seed.into_iter().map(|(k, v)| (k.into(), v.into())));
        prefs
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStore for InMemoryPrefs {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}
