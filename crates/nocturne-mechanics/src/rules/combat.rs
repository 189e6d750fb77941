//! Combat attack resolution.
//!
//! Attack bonus is a simplified base-attack progression
//! (`(level - 1) / 4 + 1`) plus the wielder's strength modifier — or
//! dexterity for ranged weapons — plus the weapon's own bonus. The
//! attack hits when `1d20 + bonus` meets the target's computed armor
//! class; a natural 20 on the raw face is a critical hit regardless of
//! the total.

use nocturne_core::{Character, GearPiece};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{Resolver, ability_modifier};
use crate::dice::{D20Check, DiceExpression, ExpressionRoll, roll_check};
use crate::error::MechResult;

/// Damage expression for an armed attacker whose weapon has none.
const DEFAULT_WEAPON_DAMAGE: &str = "1d4";
/// Damage expression for an unarmed strike.
const UNARMED_DAMAGE: &str = "1d3";

/// A resolved damage roll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageRoll {
    /// The dice rolled for the weapon.
    pub roll: ExpressionRoll,
    /// Ability modifier added on top (0 for ranged attacks).
    pub bonus: i64,
    /// Final damage dealt.
    pub total: i64,
}

/// The result of a combat attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackResult {
    /// Total attack bonus applied to the d20.
    pub attack_bonus: i64,
    /// The attack roll against the target's armor class.
    pub roll: D20Check,
    /// The target's computed armor class.
    pub target_ac: i64,
    /// Whether the attack hit.
    pub hit: bool,
    /// The raw d20 face was a natural 20.
    pub critical_hit: bool,
    /// Damage dealt on a hit; `None` on a miss.
    pub damage: Option<DamageRoll>,
}

impl Resolver {
    /// Resolve an attack from one character against another.
    ///
    /// With no weapon the attack is an unarmed melee strike. Fails only
    /// if the weapon carries a malformed damage expression.
    pub fn resolve_attack(
        &self,
        rng: &mut StdRng,
        attacker: &Character,
        target: &Character,
        weapon: Option<&GearPiece>,
    ) -> MechResult<AttackResult> {
        let base_attack = (i64::from(attacker.level) - 1) / 4 + 1;
        let ranged = weapon.is_some_and(|w| w.ranged);
        let ability = if ranged { "dexterity" } else { "strength" };
        let attack_modifier = ability_modifier(attacker.attribute(ability));
        let weapon_bonus = weapon.map_or(0, |w| w.attack_bonus);
        let attack_bonus = base_attack + attack_modifier + weapon_bonus;

        let target_ac = self.armor_class(target);
        let roll = roll_check(rng, attack_bonus, target_ac);
        let hit = roll.success;

        let damage = if hit {
            let expression = match weapon {
                Some(w) => w.damage.as_deref().unwrap_or(DEFAULT_WEAPON_DAMAGE),
                None => UNARMED_DAMAGE,
            };
            let dice: DiceExpression = expression.parse()?;
            let damage_roll = dice.roll(rng);
            let bonus = if ranged { 0 } else { attack_modifier };
            Some(DamageRoll {
                total: damage_roll.total + bonus,
                bonus,
                roll: damage_roll,
            })
        } else {
            None
        };

        Ok(AttackResult {
            attack_bonus,
            critical_hit: roll.critical_success,
            roll,
            target_ac,
            hit,
            damage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::error::MechError;

    fn attacker(level: u32, strength: i64, dexterity: i64) -> Character {
        let mut c = Character::new("Attacker");
        c.level = level;
        c.set_attribute("strength", strength);
        c.set_attribute("dexterity", dexterity);
        c
    }

    fn sword() -> GearPiece {
        GearPiece {
            name: "Sword".to_string(),
            attack_bonus: 1,
            damage: Some("1d8".to_string()),
            ..GearPiece::default()
        }
    }

    fn bow() -> GearPiece {
        GearPiece {
            name: "Bow".to_string(),
            damage: Some("1d6".to_string()),
            ranged: true,
            ..GearPiece::default()
        }
    }

    #[test]
    fn melee_attack_bonus_uses_strength() {
        let resolver = Resolver::default();
        let a = attacker(5, 16, 10);
        let t = Character::new("Target");
        let mut rng = StdRng::seed_from_u64(4);
        let result = resolver
            .resolve_attack(&mut rng, &a, &t, Some(&sword()))
            .unwrap();
        // base (5-1)/4 + 1 = 2, str +3, weapon +1
        assert_eq!(result.attack_bonus, 6);
        assert_eq!(result.target_ac, 10);
        assert_eq!(result.hit, result.roll.total >= result.target_ac);
    }

    #[test]
    fn ranged_attack_bonus_uses_dexterity_and_no_damage_bonus() {
        let resolver = Resolver::default();
        let a = attacker(1, 18, 14);
        let t = Character::new("Target");
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = resolver
                .resolve_attack(&mut rng, &a, &t, Some(&bow()))
                .unwrap();
            // base 1, dex +2
            assert_eq!(result.attack_bonus, 3);
            if let Some(damage) = &result.damage {
                assert_eq!(damage.bonus, 0);
                assert_eq!(damage.total, damage.roll.total);
            }
        }
    }

    #[test]
    fn unarmed_attack_rolls_one_d3_plus_strength() {
        let resolver = Resolver::default();
        let a = attacker(1, 14, 10);
        let t = Character::new("Target");
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = resolver.resolve_attack(&mut rng, &a, &t, None).unwrap();
            if let Some(damage) = &result.damage {
                assert_eq!(damage.roll.expression, "1d3");
                assert_eq!(damage.bonus, 2);
                assert!((1..=3).contains(&damage.roll.rolls[0]));
            }
        }
    }

    #[test]
    fn miss_deals_no_damage() {
        let resolver = Resolver::default();
        let a = attacker(1, 10, 10);
        let mut t = Character::new("Target");
        t.ac_bonuses.insert("misc".to_string(), 100);
        let mut rng = StdRng::seed_from_u64(4);
        let result = resolver.resolve_attack(&mut rng, &a, &t, None).unwrap();
        assert!(!result.hit);
        assert!(result.damage.is_none());
    }

    #[test]
    fn critical_hit_tracks_the_natural_face() {
        let resolver = Resolver::default();
        let a = attacker(1, 30, 10);
        let t = Character::new("Target");
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = resolver.resolve_attack(&mut rng, &a, &t, None).unwrap();
            assert_eq!(result.critical_hit, result.roll.roll == 20);
        }
    }

    #[test]
    fn malformed_weapon_damage_is_a_parse_error() {
        let resolver = Resolver::default();
        let a = attacker(1, 30, 10);
        let t = Character::new("Target");
        let cursed = GearPiece {
            name: "Cursed blade".to_string(),
            damage: Some("broken".to_string()),
            ..GearPiece::default()
        };
        // Strength 30 against AC 10 cannot miss, so the damage
        // expression is always reached.
        let mut rng = StdRng::seed_from_u64(4);
        let err = resolver
            .resolve_attack(&mut rng, &a, &t, Some(&cursed))
            .unwrap_err();
        assert!(matches!(err, MechError::InvalidExpression(_)));
    }
}
