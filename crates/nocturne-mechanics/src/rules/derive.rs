//! Derived statistics: modifiers, skill bonuses, armor class, hit
//! points, and experience thresholds.
//!
//! Every calculator tolerates missing data — absent rules, traits, or
//! gear contribute their documented default instead of failing.

use nocturne_core::{Character, RuleValue};

use super::Resolver;

/// Compute a d20 ability modifier: `(score - 10) / 2`, rounded toward
/// negative infinity.
pub fn ability_modifier(score: i64) -> i64 {
    (score - 10).div_euclid(2)
}

impl Resolver {
    /// Compute a character's total bonus for a skill.
    ///
    /// The governing ability comes from the `character_creation` rule
    /// set (`skills.<name>.ability`, defaulting to intelligence); the
    /// bonus is that ability's modifier plus skill ranks plus any
    /// miscellaneous override. A skill with no rule entry has a bonus
    /// of 0, matching the missing-rule policy.
    pub fn skill_bonus(&self, character: &Character, skill: &str) -> i64 {
        let Some(info) = self.rule("character_creation", &format!("skills.{skill}")) else {
            return 0;
        };
        let ability = info
            .get("ability")
            .and_then(RuleValue::as_str)
            .unwrap_or("intelligence");
        let misc = character.skill_bonuses.get(skill).copied().unwrap_or(0);
        ability_modifier(character.attribute(ability)) + character.skill(skill) + misc
    }

    /// Compute a character's armor class.
    ///
    /// Base 10 plus dexterity modifier, equipped armor and shield
    /// bonuses, natural armor, and the miscellaneous override. Absent
    /// pieces contribute 0.
    pub fn armor_class(&self, character: &Character) -> i64 {
        let armor = character.equipment.armor.as_ref().map_or(0, |g| g.ac_bonus);
        let shield = character
            .equipment
            .shield
            .as_ref()
            .map_or(0, |g| g.ac_bonus);
        let misc = character.ac_bonuses.get("misc").copied().unwrap_or(0);
        10 + ability_modifier(character.attribute("dexterity"))
            + armor
            + shield
            + character.natural_armor
            + misc
    }

    /// Compute a character's maximum hit points from class and level.
    ///
    /// Per-level base is a fixed class table (unknown classes use the
    /// default of 8) plus the constitution modifier, multiplied across
    /// levels and floored at 1.
    pub fn hit_points(&self, character: &Character) -> i64 {
        let per_level = match character.class_name.as_str() {
            "fighter" => 10,
            "wizard" => 6,
            "rogue" | "cleric" => 8,
            _ => 8,
        };
        let base = per_level + ability_modifier(character.attribute("constitution"));
        let total = base + (i64::from(character.level) - 1) * base;
        total.max(1)
    }

    /// Experience points required to reach a level.
    ///
    /// Levels 1–10 use the fixed table; beyond it the threshold is
    /// `level × 5000`.
    pub fn xp_threshold(&self, level: u32) -> u64 {
        match level {
            1 => 0,
            2 => 1000,
            3 => 3000,
            4 => 6000,
            5 => 10_000,
            6 => 15_000,
            7 => 21_000,
            8 => 28_000,
            9 => 36_000,
            10 => 45_000,
            n => u64::from(n) * 5000,
        }
    }

    /// Whether the character has enough experience for the next level.
    pub fn is_level_up_ready(&self, character: &Character) -> bool {
        character.experience_points >= self.xp_threshold(character.level + 1)
    }
}
