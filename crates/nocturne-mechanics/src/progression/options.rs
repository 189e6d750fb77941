//! Level-up options: what a character may buy upon becoming eligible.
//!
//! Options come from the class's leveling rules when present, otherwise
//! from a built-in default table. Each option reports a cost and, where
//! applicable, a max-uses bound; the engine reports the bound but does
//! not enforce it — that is the caller's responsibility.

use nocturne_core::{Character, RuleValue};
use serde::{Deserialize, Serialize};

use crate::rules::Resolver;

/// What kind of improvement an option grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// Increase one attribute by a point.
    Attribute,
    /// Increase one skill by a rank.
    Skill,
    /// Gain a named ability.
    Ability,
}

/// A discrete, costed way a character may improve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelUpOption {
    /// The kind of improvement.
    pub kind: OptionKind,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Experience cost of taking the option.
    pub cost: i64,
    /// How many times the option may be taken, when bounded. Reported
    /// only; not enforced here.
    pub max_uses: Option<u32>,
}

/// The caller's selection details for applying an option.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelUpChoice {
    /// Target attribute for an attribute improvement.
    pub attribute: Option<String>,
    /// Target skill for a skill improvement.
    pub skill: Option<String>,
}

/// Enumerate the level-up options available to a character.
///
/// Class-specific rules are read from `character_creation` at
/// `leveling.<class>`; a class with no entry falls back to the default
/// table (attribute improvement every fourth level, skill improvement
/// always).
pub fn level_up_options(resolver: &Resolver, character: &Character) -> Vec<LevelUpOption> {
    let path = format!("leveling.{}", character.class_name);
    let Some(rules) = resolver.rule("character_creation", &path) else {
        return default_options(character.level);
    };

    let mut options = Vec::new();

    if flag(rules, "attribute_improvements") {
        options.push(LevelUpOption {
            kind: OptionKind::Attribute,
            name: "Improve Attribute".to_string(),
            description: "Increase one attribute by 1 point".to_string(),
            cost: int(rules, "attribute_cost", 1000),
            max_uses: Some(uses(rules, "max_attribute_improvements", 1)),
        });
    }

    if flag(rules, "skill_improvements") {
        options.push(LevelUpOption {
            kind: OptionKind::Skill,
            name: "Improve Skill".to_string(),
            description: "Increase one skill by 1 rank".to_string(),
            cost: int(rules, "skill_cost", 500),
            max_uses: Some(uses(rules, "max_skill_improvements", 2)),
        });
    }

    if flag(rules, "new_abilities") {
        for ability in rules
            .get("abilities")
            .and_then(RuleValue::as_list)
            .unwrap_or_default()
        {
            let unlock_level = ability
                .get("level")
                .and_then(RuleValue::as_i64)
                .unwrap_or(1);
            if unlock_level <= i64::from(character.level) {
                options.push(LevelUpOption {
                    kind: OptionKind::Ability,
                    name: text(ability, "name", "New Ability"),
                    description: text(ability, "description", "A new ability"),
                    cost: int(ability, "cost", 1000),
                    max_uses: None,
                });
            }
        }
    }

    options
}

/// The default option table used when a class has no leveling rules.
fn default_options(level: u32) -> Vec<LevelUpOption> {
    let mut options = Vec::new();

    // Attribute improvements unlock every fourth level.
    if level % 4 == 0 {
        options.push(LevelUpOption {
            kind: OptionKind::Attribute,
            name: "Improve Attribute".to_string(),
            description: "Increase one attribute by 1 point".to_string(),
            cost: 1000,
            max_uses: Some(1),
        });
    }

    options.push(LevelUpOption {
        kind: OptionKind::Skill,
        name: "Improve Skill".to_string(),
        description: "Increase one skill by 1 rank".to_string(),
        cost: 500,
        max_uses: Some(2),
    });

    options
}

fn flag(rules: &RuleValue, key: &str) -> bool {
    rules.get(key).and_then(RuleValue::as_bool).unwrap_or(false)
}

fn int(rules: &RuleValue, key: &str, default: i64) -> i64 {
    rules.get(key).and_then(RuleValue::as_i64).unwrap_or(default)
}

fn uses(rules: &RuleValue, key: &str, default: u32) -> u32 {
    rules
        .get(key)
        .and_then(RuleValue::as_i64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default)
}

fn text(rules: &RuleValue, key: &str, default: &str) -> String {
    rules
        .get(key)
        .and_then(RuleValue::as_str)
        .unwrap_or(default)
        .to_string()
}
