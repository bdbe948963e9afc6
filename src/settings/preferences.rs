//! Host preference store
//!
//! A string-keyed value store standing in for the host's preferences
//! object, plus the one-shot promotion that makes newly registered
//! settings visible in the host's settings list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Preference key holding the semicolon-separated visible settings list.
pub const VISIBLE_SETTINGS: &str = "general/visible_settings";

/// Guard flag so visible-settings promotion runs only once per install.
pub const SETTINGS_MADE_VISIBLE: &str = "arcweld/settings_made_visible";

/// String-keyed preference values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    values: HashMap<String, serde_json::Value>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preference with its default, keeping any existing value.
    pub fn add_default<V: Serialize>(&mut self, key: &str, value: V) {
        self.values
            .entry(key.to_string())
            .or_insert_with(|| serde_json::to_value(value).unwrap_or_default());
    }

    pub fn set<V: Serialize>(&mut self, key: &str, value: V) {
        self.values
            .insert(key.to_string(), serde_json::to_value(value).unwrap_or_default());
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(|v| v.as_bool())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    /// Append newly registered setting keys to the visible-settings list.
    ///
    /// Runs at most once: the guard flag is set afterwards and later calls
    /// are no-ops. Returns whether the visible list changed.
    pub fn promote_visible_settings(&mut self, keys: &[String]) -> bool {
        if self.get_bool(SETTINGS_MADE_VISIBLE).unwrap_or(false) {
            return false;
        }

        let mut visible = self.get_string(VISIBLE_SETTINGS).unwrap_or_default();
        let mut changed = false;
        for key in keys {
            if !visible.split(';').any(|entry| entry == key) {
                visible.push(';');
                visible.push_str(key);
                changed = true;
            }
        }

        if changed {
            self.set(VISIBLE_SETTINGS, visible);
        }
        self.set(SETTINGS_MADE_VISIBLE, true);

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_default_keeps_existing_value() {
        let mut preferences = Preferences::new();
        preferences.set("a", 1);
        preferences.add_default("a", 2);
        preferences.add_default("b", 3);

        assert_eq!(preferences.values.get("a"), Some(&serde_json::json!(1)));
        assert_eq!(preferences.values.get("b"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn test_promotion_appends_missing_keys() {
        let mut preferences = Preferences::new();
        preferences.set(VISIBLE_SETTINGS, "infill_density;retraction_enable");

        let keys = vec![
            "arcwelder_enable".to_string(),
            "retraction_enable".to_string(),
        ];
        let changed = preferences.promote_visible_settings(&keys);

        assert!(changed);
        assert_eq!(
            preferences.get_string(VISIBLE_SETTINGS).unwrap(),
            "infill_density;retraction_enable;arcwelder_enable"
        );
        assert_eq!(preferences.get_bool(SETTINGS_MADE_VISIBLE), Some(true));
    }

    #[test]
    fn test_promotion_runs_only_once() {
        let mut preferences = Preferences::new();
        preferences.set(VISIBLE_SETTINGS, "infill_density");

        let keys = vec!["arcwelder_enable".to_string()];
        assert!(preferences.promote_visible_settings(&keys));

        let keys = vec!["arcwelder_tolerance".to_string()];
        assert!(!preferences.promote_visible_settings(&keys));
        assert!(!preferences
            .get_string(VISIBLE_SETTINGS)
            .unwrap()
            .contains("arcwelder_tolerance"));
    }
}
