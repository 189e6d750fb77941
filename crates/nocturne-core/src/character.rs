//! Character records: identity, traits, derived caches, and side tables.
//!
//! A [`Character`] is the persistent record the persistence collaborator
//! loads and saves. The mechanics engine reads it and applies validated
//! mutations; it never serializes it to disk itself. Two invariants hold
//! across all mutations: `experience_points` never decreases through
//! engine operations, and `level` is only advanced by the progression
//! engine's level-up completion step.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a character record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Generate a new random character ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A single piece of equipped gear contributing to derived stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GearPiece {
    /// Display name of the item.
    pub name: String,
    /// Armor class contribution while equipped.
    pub ac_bonus: i64,
    /// Attack roll contribution while wielded.
    pub attack_bonus: i64,
    /// Damage expression (e.g., "1d8+1"); `None` falls back to the
    /// engine's defaults.
    pub damage: Option<String>,
    /// Whether this is a ranged weapon (attacks use dexterity).
    pub ranged: bool,
}

/// Equipped gear slots read by the derived-stat calculators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    /// Worn armor, if any.
    pub armor: Option<GearPiece>,
    /// Carried shield, if any.
    pub shield: Option<GearPiece>,
    /// Wielded weapon, if any.
    pub weapon: Option<GearPiece>,
}

/// An ability gained through level-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GainedAbility {
    /// Display name of the ability.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// The character level at which the ability was gained.
    pub gained_at_level: u32,
}

/// A temporary or permanent condition on a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Display name of the effect.
    pub name: String,
    /// Remaining duration in turns; `None` lasts until removed.
    pub duration: Option<u32>,
    /// Free-text description.
    pub description: String,
}

/// A persistent character record.
///
/// Attribute and skill dots are flat name-to-dots maps. Pool-based
/// attributes run 1–5; legacy d20 ability scores run 1–20 and default
/// to 10 when absent. Free-form extensions (bonus overrides, gained
/// abilities, status effects) live in typed side tables rather than a
/// dynamic map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Character class, driving hit-point and leveling rules.
    pub class_name: String,
    /// Current level (1-based). Advanced only by level-up completion.
    pub level: u32,
    /// Lifetime experience points. Monotonically non-decreasing.
    pub experience_points: u64,
    /// Attribute dots by name.
    pub attributes: HashMap<String, i64>,
    /// Skill ranks by name.
    pub skills: HashMap<String, i64>,
    /// Miscellaneous per-skill bonus overrides.
    pub skill_bonuses: HashMap<String, i64>,
    /// Miscellaneous armor-class bonus overrides (keyed, e.g. "misc").
    pub ac_bonuses: HashMap<String, i64>,
    /// Natural armor contribution to armor class.
    pub natural_armor: i64,
    /// Equipped gear.
    pub equipment: Equipment,
    /// Cached maximum hit points, recomputed by the engine on level-up.
    pub max_hit_points: i64,
    /// Current hit points.
    pub current_hit_points: i64,
    /// Abilities gained through progression.
    pub abilities: Vec<GainedAbility>,
    /// Active status effects.
    pub status_effects: Vec<StatusEffect>,
    /// Carried items by name.
    pub inventory: Vec<String>,
    /// Timestamp when the record was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Create a fresh level-1 character with no traits assigned.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CharacterId::new(),
            name: name.into(),
            class_name: "fighter".to_string(),
            level: 1,
            experience_points: 0,
            attributes: HashMap::new(),
            skills: HashMap::new(),
            skill_bonuses: HashMap::new(),
            ac_bonuses: HashMap::new(),
            natural_armor: 0,
            equipment: Equipment::default(),
            max_hit_points: 10,
            current_hit_points: 10,
            abilities: Vec::new(),
            status_effects: Vec::new(),
            inventory: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Get an attribute value, defaulting to 10 (the d20 baseline) when
    /// the attribute is not assigned.
    pub fn attribute(&self, name: &str) -> i64 {
        self.attributes.get(name).copied().unwrap_or(10)
    }

    /// Get a skill's ranks, defaulting to 0 (untrained).
    pub fn skill(&self, name: &str) -> i64 {
        self.skills.get(name).copied().unwrap_or(0)
    }

    /// Set an attribute value.
    pub fn set_attribute(&mut self, name: impl Into<String>, dots: i64) {
        self.attributes.insert(name.into(), dots);
        self.touch();
    }

    /// Set a skill's ranks.
    pub fn set_skill(&mut self, name: impl Into<String>, ranks: i64) {
        self.skills.insert(name.into(), ranks);
        self.touch();
    }

    /// Add experience points. Returns the new lifetime total.
    pub fn add_experience(&mut self, amount: u64) -> u64 {
        self.experience_points += amount;
        self.touch();
        self.experience_points
    }

    /// Advance to the next level. Returns the new level.
    ///
    /// Intended for the progression engine's level-up completion step —
    /// nothing else should raise a character's level.
    pub fn advance_level(&mut self) -> u32 {
        self.level += 1;
        self.touch();
        self.level
    }

    /// Overwrite both hit-point fields.
    pub fn set_hit_points(&mut self, current: i64, max: i64) {
        self.current_hit_points = current;
        self.max_hit_points = max;
        self.touch();
    }

    /// Record an ability gained through progression.
    pub fn gain_ability(&mut self, ability: GainedAbility) {
        self.abilities.push(ability);
        self.touch();
    }

    /// Apply a status effect.
    pub fn add_status_effect(&mut self, effect: StatusEffect) {
        self.status_effects.push(effect);
        self.touch();
    }

    /// Remove every status effect with the given name. Returns true if
    /// any were removed.
    pub fn remove_status_effect(&mut self, name: &str) -> bool {
        let before = self.status_effects.len();
        self.status_effects.retain(|e| e.name != name);
        let removed = self.status_effects.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
