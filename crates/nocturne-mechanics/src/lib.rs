//! Game mechanics resolution engine for Nocturne.
//!
//! Turns raw character traits and player intent into dice outcomes,
//! success/failure classifications, derived statistics, and character
//! progression. Two rule regimes are supported: the d10 pool system
//! (hunger dice, messy criticals, bestial failures) and a legacy d20
//! mode (expression rolls, ability/skill checks, attack resolution).
//!
//! The engine is synchronous and pure over its inputs plus one
//! caller-supplied RNG. It performs no I/O: rule tables arrive loaded,
//! character records arrive owned, and every result is a serializable
//! value object the caller may journal, narrate, or discard.

pub mod dice;
pub mod error;
pub mod progression;
pub mod rules;
pub mod validate;

pub use dice::{
    D20Check, DiceCategory, DiceExpression, ExpressionRoll, InitiativeRoll, PoolRoll, RouseCheck,
    WillpowerRoll, roll_check, roll_initiative, roll_pool, roll_willpower, rouse_check,
};
pub use error::{MechError, MechResult};
pub use progression::{
    LevelUpChoice, LevelUpOption, OptionKind, XpAward, XpProgress, apply_option,
    award_experience, complete_level_up, encounter_xp, experience_progress, level_up_options,
};
pub use rules::{
    AbilityCheck, AttackResult, CheckMode, DamageRoll, Resolver, RuleStore, SkillCheck,
    ability_modifier,
};
pub use validate::{ValidationIssue, ValidationReport, validate_character};
