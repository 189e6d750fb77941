//! Ability and skill check resolution with advantage and disadvantage.

use nocturne_core::Character;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{Resolver, ability_modifier};
use crate::dice::{D20Check, roll_check};

/// How a check's dice were drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// A single roll.
    Straight,
    /// Two rolls, keep the higher total.
    Advantage,
    /// Two rolls, keep the lower total.
    Disadvantage,
}

impl std::fmt::Display for CheckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Straight => write!(f, "straight"),
            Self::Advantage => write!(f, "advantage"),
            Self::Disadvantage => write!(f, "disadvantage"),
        }
    }
}

/// The result of an ability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCheck {
    /// The ability tested.
    pub ability: String,
    /// The ability score used.
    pub score: i64,
    /// The modifier derived from the score.
    pub modifier: i64,
    /// Which mode was applied.
    pub mode: CheckMode,
    /// The kept roll.
    pub roll: D20Check,
    /// The discarded roll when two dice were drawn.
    pub discarded: Option<D20Check>,
}

/// The result of a skill check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCheck {
    /// The skill tested.
    pub skill: String,
    /// The total skill bonus applied.
    pub bonus: i64,
    /// Which mode was applied.
    pub mode: CheckMode,
    /// The kept roll.
    pub roll: D20Check,
    /// The discarded roll when two dice were drawn.
    pub discarded: Option<D20Check>,
}

/// Resolve the advantage/disadvantage flags into a mode. Both set at
/// once cancel out to a straight roll.
fn check_mode(advantage: bool, disadvantage: bool) -> CheckMode {
    match (advantage, disadvantage) {
        (true, false) => CheckMode::Advantage,
        (false, true) => CheckMode::Disadvantage,
        _ => CheckMode::Straight,
    }
}

/// Roll once or twice per the mode, returning the kept and discarded
/// results.
fn roll_with_mode(
    rng: &mut StdRng,
    bonus: i64,
    difficulty: i64,
    mode: CheckMode,
) -> (D20Check, Option<D20Check>) {
    match mode {
        CheckMode::Straight => (roll_check(rng, bonus, difficulty), None),
        CheckMode::Advantage => {
            let first = roll_check(rng, bonus, difficulty);
            let second = roll_check(rng, bonus, difficulty);
            if first.total >= second.total {
                (first, Some(second))
            } else {
                (second, Some(first))
            }
        }
        CheckMode::Disadvantage => {
            let first = roll_check(rng, bonus, difficulty);
            let second = roll_check(rng, bonus, difficulty);
            if first.total <= second.total {
                (first, Some(second))
            } else {
                (second, Some(first))
            }
        }
    }
}

impl Resolver {
    /// Resolve an ability check for a character.
    pub fn resolve_ability_check(
        &self,
        rng: &mut StdRng,
        character: &Character,
        ability: &str,
        difficulty: i64,
        advantage: bool,
        disadvantage: bool,
    ) -> AbilityCheck {
        let score = character.attribute(ability);
        let modifier = ability_modifier(score);
        let mode = check_mode(advantage, disadvantage);
        let (roll, discarded) = roll_with_mode(rng, modifier, difficulty, mode);
        AbilityCheck {
            ability: ability.to_string(),
            score,
            modifier,
            mode,
            roll,
            discarded,
        }
    }

    /// Resolve a skill check for a character, using the full skill
    /// bonus from [`Resolver::skill_bonus`].
    pub fn resolve_skill_check(
        &self,
        rng: &mut StdRng,
        character: &Character,
        skill: &str,
        difficulty: i64,
        advantage: bool,
        disadvantage: bool,
    ) -> SkillCheck {
        let bonus = self.skill_bonus(character, skill);
        let mode = check_mode(advantage, disadvantage);
        let (roll, discarded) = roll_with_mode(rng, bonus, difficulty, mode);
        SkillCheck {
            skill: skill.to_string(),
            bonus,
            mode,
            roll,
            discarded,
        }
    }
}
