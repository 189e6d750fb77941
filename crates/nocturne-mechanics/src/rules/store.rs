//! Rule-table storage and dotted-path lookup.

use std::collections::HashMap;

use nocturne_core::RuleValue;

/// Loaded rule sets, keyed by rule-set name.
///
/// Rule sets are handed over once by the loading collaborator and
/// treated as read-only afterwards. Lookups never mutate the store and
/// never fail — an absent rule set or path resolves to `None` so the
/// caller can fall back to its documented default.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    sets: HashMap<String, RuleValue>,
}

impl RuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a rule set.
    pub fn insert(&mut self, name: impl Into<String>, rules: RuleValue) {
        self.sets.insert(name.into(), rules);
    }

    /// Insert a rule set from raw JSON.
    pub fn insert_json(&mut self, name: impl Into<String>, rules: serde_json::Value) {
        self.insert(name, RuleValue::from(rules));
    }

    /// Get a whole rule set by name.
    pub fn rule_set(&self, name: &str) -> Option<&RuleValue> {
        self.sets.get(name)
    }

    /// Navigate a rule set by a dot-separated path (e.g.
    /// `"skills.stealth.ability"`). Returns `None` if any segment is
    /// absent or a non-table value is traversed into.
    pub fn rule(&self, name: &str, path: &str) -> Option<&RuleValue> {
        let mut current = self.rule_set(name)?;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Names of the loaded rule sets.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }
}
