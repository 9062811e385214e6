//! Registry-like key/value lookup, abstracted for testability.
//!
//! The Steam and GOG scanners originally read the Windows registry.
//! Scanners take a [`KeyValueView`] instead of touching the OS, so the
//! frontend decides what backs it (a real registry reader on Windows,
//! nothing elsewhere) and tests supply [`StaticKeyValueView`].
//!
//! Key paths use backslash separators, matching the conventional
//! registry notation (`Software\Valve\Steam`).

use std::collections::BTreeMap;

/// Read-only view over a hierarchical string key/value store.
pub trait KeyValueView {
    /// The string value `name` under `key`, if both exist.
    fn string_value(&self, key: &str, name: &str) -> Option<String>;

    /// Immediate child key names under `key`, in stable order.
    fn subkeys(&self, key: &str) -> Vec<String>;
}

/// A view with nothing in it. The production default on hosts without a
/// registry; every lookup misses and scanners fall back to their
/// conventional-path lists.
#[derive(Debug, Default)]
pub struct EmptyKeyValueView;

impl KeyValueView for EmptyKeyValueView {
    fn string_value(&self, _key: &str, _name: &str) -> Option<String> {
        None
    }

    fn subkeys(&self, _key: &str) -> Vec<String> {
        Vec::new()
    }
}

/// An in-memory view populated up front. Used by tests and by frontends
/// that snapshot the real store once at startup.
#[derive(Debug, Default)]
pub struct StaticKeyValueView {
    // (key path, value name) -> value
    values: BTreeMap<(String, String), String>,
}

impl StaticKeyValueView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, creating the key path implicitly.
    pub fn with_value(
        mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.values
            .insert((key.into(), name.into()), value.into());
        self
    }
}

impl KeyValueView for StaticKeyValueView {
    fn string_value(&self, key: &str, name: &str) -> Option<String> {
        self.values
            .get(&(key.to_string(), name.to_string()))
            .cloned()
    }

    fn subkeys(&self, key: &str) -> Vec<String> {
        let prefix = format!("{key}\\");
        let mut children: Vec<String> = self
            .values
            .keys()
            .filter_map(|(stored_key, _)| stored_key.strip_prefix(&prefix))
            .map(|rest| match rest.find('\\') {
                Some(pos) => rest[..pos].to_string(),
                None => rest.to_string(),
            })
            .collect();
        children.sort();
        children.dedup();
        children
    }
}
