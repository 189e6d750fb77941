//! Rule resolution: lookups, derived statistics, and check procedures.
//!
//! A [`Resolver`] owns the loaded [`RuleStore`] and computes every
//! derived numeric value the engine needs, routing dice requests to
//! [`crate::dice`]. There is no process-wide rule state — construct a
//! resolver with whatever tables the session loaded.

pub mod checks;
pub mod combat;
pub mod derive;
pub mod store;

pub use checks::{AbilityCheck, CheckMode, SkillCheck};
pub use combat::{AttackResult, DamageRoll};
pub use derive::ability_modifier;
pub use store::RuleStore;

use nocturne_core::RuleValue;

/// Owns rule tables and resolves derived values and checks.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    rules: RuleStore,
}

impl Resolver {
    /// Create a resolver over the given rule store.
    pub fn new(rules: RuleStore) -> Self {
        Self { rules }
    }

    /// Access the underlying rule store.
    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    /// Look up a rule by set name and dotted path. See
    /// [`RuleStore::rule`].
    pub fn rule(&self, set: &str, path: &str) -> Option<&RuleValue> {
        self.rules.rule(set, path)
    }
}
